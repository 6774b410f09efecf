//! Plain-text report rendering for terminal output.

use std::fmt::Write;

use crate::cutlist::CutListReport;
use crate::optimizer::StockPlan;
use crate::resolver::ResolutionFailure;
use crate::summary::{JambKitReport, PickListReport, SummaryReport};

use super::fmt_num;

fn write_errors(output: &mut String, errors: &[ResolutionFailure]) {
    if errors.is_empty() {
        return;
    }
    writeln!(output).unwrap();
    writeln!(output, "Errors:").unwrap();
    for failure in errors {
        let part = if failure.part_number.is_empty() {
            "-"
        } else {
            failure.part_number.as_str()
        };
        writeln!(output, "  {} [{}]: {}", failure.opening, part, failure.error).unwrap();
    }
}

/// Render the purchasing summary for the terminal.
pub fn summary_text(report: &SummaryReport) -> String {
    let mut output = String::new();
    writeln!(output, "Purchasing Summary - {}", report.project_id).unwrap();
    for line in &report.lines {
        writeln!(
            output,
            "  {:<16} {:<28} {:>10} {}",
            line.part_number,
            line.name,
            fmt_num(line.total_quantity),
            line.unit
        )
        .unwrap();
    }
    write_errors(&mut output, &report.errors);
    output
}

/// Render the cut list for the terminal.
pub fn cut_list_text(report: &CutListReport) -> String {
    let mut output = String::new();
    writeln!(output, "Cut List - {}", report.project_id).unwrap();

    for group in &report.groups {
        writeln!(
            output,
            "\n{} @ {} ({} units)",
            group.product_id, group.size_label, group.unit_count
        )
        .unwrap();
        for line in &group.lines {
            let length = line
                .cut_length
                .map(|len| format!(" cut {}\"", fmt_num(len)))
                .unwrap_or_default();
            let milled = if line.is_milled { " milled" } else { "" };
            writeln!(
                output,
                "  {:<16} {:<28} {:>6} x{}{}{}",
                line.part_number,
                line.name,
                fmt_num(line.qty_per_unit),
                fmt_num(line.total_qty),
                length,
                milled
            )
            .unwrap();
        }
    }

    if !report.misc.is_empty() {
        writeln!(output, "\nMiscellaneous cuts").unwrap();
        for cut in &report.misc {
            writeln!(
                output,
                "  {:<16} {:<28} {:>4} @ {}\"  ({})",
                cut.part_number,
                cut.name,
                cut.total_cuts,
                fmt_num(cut.cut_length),
                cut.openings.join(", ")
            )
            .unwrap();
        }
    }

    write_errors(&mut output, &report.errors);
    output
}

/// Render stock plans for the terminal, including the per-piece layout.
pub fn stock_plans_text(plans: &[StockPlan]) -> String {
    let mut output = String::new();
    writeln!(output, "Stock Optimization").unwrap();

    for plan in plans {
        writeln!(
            output,
            "\n{}: {} pieces of {}\" stock, waste {}\" ({:.1}%)",
            plan.part_number,
            plan.stock_pieces_needed,
            fmt_num(plan.stock_length),
            fmt_num(plan.waste_length),
            plan.waste_percent
        )
        .unwrap();
        for (idx, piece) in plan.pieces.iter().enumerate() {
            let cuts: Vec<String> = piece.cuts.iter().map(|&c| fmt_num(c)).collect();
            writeln!(
                output,
                "  piece {}: [{}] rem {}\"",
                idx + 1,
                cuts.join(", "),
                fmt_num(piece.remaining)
            )
            .unwrap();
        }
    }

    output
}

/// Render the pick list for the terminal.
pub fn pick_list_text(report: &PickListReport) -> String {
    let mut output = String::new();
    writeln!(output, "Pick List - {}", report.project_id).unwrap();
    for group in &report.groups {
        writeln!(output, "\n{}", group.product_id).unwrap();
        for line in &group.lines {
            writeln!(
                output,
                "  {:<16} {:<28} {:>10} {}",
                line.part_number,
                line.name,
                fmt_num(line.total_quantity),
                line.unit
            )
            .unwrap();
        }
    }
    write_errors(&mut output, &report.errors);
    output
}

/// Render the jamb kit list for the terminal.
pub fn jamb_kit_text(report: &JambKitReport) -> String {
    let mut output = String::new();
    writeln!(output, "Jamb Kits - {}", report.project_id).unwrap();
    for group in &report.groups {
        writeln!(output, "\n{}", group.opening).unwrap();
        for line in &group.lines {
            writeln!(
                output,
                "  {:<16} {:<28} {:>10} {}",
                line.part_number,
                line.name,
                fmt_num(line.total_quantity),
                line.unit
            )
            .unwrap();
        }
    }
    write_errors(&mut output, &report.errors);
    output
}
