//! CSV serialization of the report shapes, for the export endpoints.

use crate::cutlist::{CutListReport, SizeGroup};
use crate::error::Result;
use crate::optimizer::StockPlan;
use crate::summary::{JambKitReport, PickListReport, SummaryReport};

use super::fmt_num;

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(data).expect("CSV output is UTF-8"))
}

/// Render the purchasing summary as CSV.
pub fn summary_csv(report: &SummaryReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Part Number", "Description", "Type", "Unit", "Total Qty"])?;
    for line in &report.lines {
        writer.write_record([
            line.part_number.as_str(),
            line.name.as_str(),
            &line.part_type.to_string(),
            &line.unit.to_string(),
            &fmt_num(line.total_quantity),
        ])?;
    }
    finish(writer)
}

/// Render the full cut list as CSV, one section row per size group.
pub fn cut_list_csv(report: &CutListReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    cut_list_header(&mut writer)?;
    for group in &report.groups {
        write_size_group(&mut writer, group)?;
    }
    for cut in &report.misc {
        writer.write_record([
            "MISC",
            "",
            "",
            cut.part_number.as_str(),
            cut.name.as_str(),
            "",
            "",
            &fmt_num(cut.total_cuts as f64),
            &fmt_num(cut.cut_length),
            "",
            &cut.openings.join("; "),
        ])?;
    }
    finish(writer)
}

/// Render one size group as its own CSV document (the per-group filtered
/// export).
pub fn size_group_csv(group: &SizeGroup) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    cut_list_header(&mut writer)?;
    write_size_group(&mut writer, group)?;
    finish(writer)
}

fn cut_list_header(writer: &mut csv::Writer<Vec<u8>>) -> Result<()> {
    writer.write_record([
        "Product",
        "Size",
        "Units",
        "Part Number",
        "Description",
        "Type",
        "Qty/Unit",
        "Total Qty",
        "Cut Length",
        "Milled",
        "Openings",
    ])?;
    Ok(())
}

fn write_size_group(writer: &mut csv::Writer<Vec<u8>>, group: &SizeGroup) -> Result<()> {
    for line in &group.lines {
        writer.write_record([
            group.product_id.as_str(),
            group.size_label.as_str(),
            &group.unit_count.to_string(),
            line.part_number.as_str(),
            line.name.as_str(),
            &line.part_type.to_string(),
            &fmt_num(line.qty_per_unit),
            &fmt_num(line.total_qty),
            &line.cut_length.map(fmt_num).unwrap_or_default(),
            if line.is_milled { "Yes" } else { "No" },
            "",
        ])?;
    }
    Ok(())
}

/// Render stock plans as CSV, one row per (part, stock length) group.
pub fn stock_plans_csv(plans: &[StockPlan]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "Part Number",
        "Stock Length",
        "Pieces Needed",
        "Total Stock",
        "Total Cut",
        "Waste",
        "Waste %",
    ])?;
    for plan in plans {
        writer.write_record([
            plan.part_number.as_str(),
            &fmt_num(plan.stock_length),
            &plan.stock_pieces_needed.to_string(),
            &fmt_num(plan.total_stock_length),
            &fmt_num(plan.total_cut_length),
            &fmt_num(plan.waste_length),
            &format!("{:.1}", plan.waste_percent),
        ])?;
    }
    finish(writer)
}

/// Render the pick list as CSV.
pub fn pick_list_csv(report: &PickListReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Product", "Part Number", "Description", "Unit", "Total Qty"])?;
    for group in &report.groups {
        for line in &group.lines {
            writer.write_record([
                group.product_id.as_str(),
                line.part_number.as_str(),
                line.name.as_str(),
                &line.unit.to_string(),
                &fmt_num(line.total_quantity),
            ])?;
        }
    }
    finish(writer)
}

/// Render the jamb kit list as CSV.
pub fn jamb_kit_csv(report: &JambKitReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Opening", "Part Number", "Description", "Unit", "Total Qty"])?;
    for group in &report.groups {
        for line in &group.lines {
            writer.write_record([
                group.opening.as_str(),
                line.part_number.as_str(),
                line.name.as_str(),
                &line.unit.to_string(),
                &fmt_num(line.total_quantity),
            ])?;
        }
    }
    finish(writer)
}
