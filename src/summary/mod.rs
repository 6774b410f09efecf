//! Purchasing summary, pick list, and jamb kit builders.
//!
//! All three are grouped sums over resolved demands, independent of cut and
//! packing structure. Every downstream export (CSV, PDF) consumes these
//! shapes directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Unit;
use crate::model::{PartCatalog, PartType};
use crate::resolver::{ProjectBom, ResolutionFailure};

/// Total quantity for one part number across the whole project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub part_number: String,
    pub name: String,
    pub part_type: PartType,
    pub unit: Unit,
    pub total_quantity: f64,
}

/// Project-wide purchasing totals by part number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub project_id: String,
    pub lines: Vec<SummaryLine>,
    pub errors: Vec<ResolutionFailure>,
}

/// Pick-list parts for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickListGroup {
    pub product_id: String,
    pub lines: Vec<SummaryLine>,
}

/// Warehouse pick list: catalog-flagged parts grouped by product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickListReport {
    pub project_id: String,
    pub groups: Vec<PickListGroup>,
    pub errors: Vec<ResolutionFailure>,
}

/// Jamb kit contents for one opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JambKitGroup {
    pub opening: String,
    pub lines: Vec<SummaryLine>,
}

/// Jamb kit list: catalog-flagged hardware grouped per opening, in
/// snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JambKitReport {
    pub project_id: String,
    pub groups: Vec<JambKitGroup>,
    pub errors: Vec<ResolutionFailure>,
}

fn sort_summary_lines(lines: &mut [SummaryLine]) {
    lines.sort_by(|a, b| {
        a.part_type
            .priority()
            .cmp(&b.part_type.priority())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.part_number.cmp(&b.part_number))
    });
}

fn accumulate(
    lines: &mut BTreeMap<String, SummaryLine>,
    part_number: &str,
    name: &str,
    part_type: PartType,
    unit: Unit,
    quantity: f64,
) {
    lines
        .entry(part_number.to_string())
        .or_insert_with(|| SummaryLine {
            part_number: part_number.to_string(),
            name: name.to_string(),
            part_type,
            unit,
            total_quantity: 0.0,
        })
        .total_quantity += quantity;
}

/// Roll every resolved demand into total-quantity-by-part-number.
///
/// Accessory cuts are included, counted in pieces.
pub fn summarize(bom: &ProjectBom) -> SummaryReport {
    let mut lines: BTreeMap<String, SummaryLine> = BTreeMap::new();

    for resolved in &bom.resolved {
        let units = resolved.instance.quantity as f64;
        for demand in &resolved.demands {
            accumulate(
                &mut lines,
                &demand.part_number,
                &demand.name,
                demand.part_type,
                demand.unit,
                demand.quantity_per_unit * units,
            );
        }
    }

    for accessory in &bom.accessories {
        accumulate(
            &mut lines,
            &accessory.part_number,
            &accessory.name,
            PartType::Extrusion,
            Unit::Each,
            accessory.quantity as f64,
        );
    }

    let mut lines: Vec<SummaryLine> = lines.into_values().collect();
    sort_summary_lines(&mut lines);

    SummaryReport {
        project_id: bom.project_id.clone(),
        lines,
        errors: bom.errors.clone(),
    }
}

/// Build the warehouse pick list: parts flagged `include_on_pick_list` in
/// the catalog, grouped by product.
pub fn pick_list(bom: &ProjectBom, catalog: &PartCatalog) -> PickListReport {
    let mut groups: BTreeMap<String, BTreeMap<String, SummaryLine>> = BTreeMap::new();

    for resolved in &bom.resolved {
        let units = resolved.instance.quantity as f64;
        for demand in &resolved.demands {
            if !catalog.is_on_pick_list(&demand.part_number) {
                continue;
            }
            let lines = groups
                .entry(resolved.instance.product_id.clone())
                .or_default();
            accumulate(
                lines,
                &demand.part_number,
                &demand.name,
                demand.part_type,
                demand.unit,
                demand.quantity_per_unit * units,
            );
        }
    }

    let groups = groups
        .into_iter()
        .map(|(product_id, lines)| {
            let mut lines: Vec<SummaryLine> = lines.into_values().collect();
            sort_summary_lines(&mut lines);
            PickListGroup { product_id, lines }
        })
        .collect();

    PickListReport {
        project_id: bom.project_id.clone(),
        groups,
        errors: bom.errors.clone(),
    }
}

/// Build per-opening jamb kits: hardware and fasteners flagged
/// `include_on_jamb_kit`, one group per opening in snapshot order.
pub fn jamb_kit_list(bom: &ProjectBom, catalog: &PartCatalog) -> JambKitReport {
    let mut groups = Vec::new();

    for resolved in &bom.resolved {
        let units = resolved.instance.quantity as f64;
        let mut lines: BTreeMap<String, SummaryLine> = BTreeMap::new();

        for demand in &resolved.demands {
            let kit_part = matches!(demand.part_type, PartType::Hardware | PartType::Fastener);
            if !kit_part || !catalog.is_on_jamb_kit(&demand.part_number) {
                continue;
            }
            accumulate(
                &mut lines,
                &demand.part_number,
                &demand.name,
                demand.part_type,
                demand.unit,
                demand.quantity_per_unit * units,
            );
        }

        if lines.is_empty() {
            continue;
        }
        let mut lines: Vec<SummaryLine> = lines.into_values().collect();
        sort_summary_lines(&mut lines);
        groups.push(JambKitGroup {
            opening: resolved.instance.name.clone(),
            lines,
        });
    }

    JambKitReport {
        project_id: bom.project_id.clone(),
        groups,
        errors: bom.errors.clone(),
    }
}
