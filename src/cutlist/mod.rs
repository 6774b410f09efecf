//! Cut-list aggregation: grouping resolved demands by product and size.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Unit;
use crate::model::PartType;
use crate::resolver::{ProjectBom, ResolutionFailure};

/// One part line within a size group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutListLine {
    pub part_number: String,
    pub name: String,
    pub part_type: PartType,
    pub unit: Unit,
    /// Quantity per single unit at this size.
    pub qty_per_unit: f64,
    /// Quantity for the whole group (`qty_per_unit × unit_count`).
    pub total_qty: f64,
    pub cut_length: Option<f64>,
    pub is_milled: bool,
}

/// All demands for one (product, size) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeGroup {
    pub product_id: String,
    pub size_key: String,
    pub size_label: String,
    pub width: f64,
    pub height: f64,
    /// Sum of instance quantities sharing this size.
    pub unit_count: u32,
    pub lines: Vec<CutListLine>,
}

/// A miscellaneous cut from an opening-level accessory, keyed by part and
/// length, with the contributing openings listed for shop-floor tracing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscCut {
    pub part_number: String,
    pub name: String,
    pub cut_length: f64,
    pub total_cuts: u32,
    pub openings: Vec<String>,
}

/// The full cut list for a project snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutListReport {
    pub project_id: String,
    pub groups: Vec<SizeGroup>,
    pub misc: Vec<MiscCut>,
    pub errors: Vec<ResolutionFailure>,
}

impl CutListReport {
    /// Project one size group down to a partial production run of
    /// `batch_size` units. Pure projection: the full-run report is never
    /// mutated. `batch_size` is clamped to the group's unit count.
    pub fn batch(&self, product_id: &str, size_key: &str, batch_size: u32) -> Option<SizeGroup> {
        let group = self
            .groups
            .iter()
            .find(|g| g.product_id == product_id && g.size_key == size_key)?;

        let batch = batch_size.min(group.unit_count);
        let mut scaled = group.clone();
        scaled.unit_count = batch;
        for line in &mut scaled.lines {
            line.total_qty = line.qty_per_unit * batch as f64;
        }
        Some(scaled)
    }
}

/// Sort lines by part-type priority, then name, then part number. A
/// presentation contract: stable and reproducible, not a correctness one.
fn sort_lines(lines: &mut [CutListLine]) {
    lines.sort_by(|a, b| {
        a.part_type
            .priority()
            .cmp(&b.part_type.priority())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.part_number.cmp(&b.part_number))
    });
}

struct LineAccum {
    name: String,
    part_type: PartType,
    unit: Unit,
    total_qty: f64,
    cut_length: Option<f64>,
    is_milled: bool,
}

struct GroupAccum {
    width: f64,
    height: f64,
    size_label: String,
    unit_count: u32,
    lines: BTreeMap<String, LineAccum>,
}

/// Aggregate a resolved project into its cut list.
pub fn aggregate(bom: &ProjectBom) -> CutListReport {
    let mut groups: BTreeMap<(String, String), GroupAccum> = BTreeMap::new();

    for resolved in &bom.resolved {
        let instance = &resolved.instance;
        let key = (instance.product_id.clone(), instance.size_key());
        let group = groups.entry(key).or_insert_with(|| GroupAccum {
            width: instance.width,
            height: instance.height,
            size_label: instance.size_label(),
            unit_count: 0,
            lines: BTreeMap::new(),
        });
        group.unit_count += instance.quantity;

        for demand in &resolved.demands {
            let line = group
                .lines
                .entry(demand.part_number.clone())
                .or_insert_with(|| LineAccum {
                    name: demand.name.clone(),
                    part_type: demand.part_type,
                    unit: demand.unit,
                    total_qty: 0.0,
                    cut_length: demand.cut_length,
                    is_milled: demand.is_milled,
                });
            line.total_qty += demand.quantity_per_unit * instance.quantity as f64;
        }
    }

    let groups: Vec<SizeGroup> = groups
        .into_iter()
        .map(|((product_id, size_key), accum)| {
            let unit_count = accum.unit_count;
            let mut lines: Vec<CutListLine> = accum
                .lines
                .into_iter()
                .map(|(part_number, line)| CutListLine {
                    part_number,
                    name: line.name,
                    part_type: line.part_type,
                    unit: line.unit,
                    qty_per_unit: if unit_count > 0 {
                        line.total_qty / unit_count as f64
                    } else {
                        0.0
                    },
                    total_qty: line.total_qty,
                    cut_length: line.cut_length,
                    is_milled: line.is_milled,
                })
                .collect();
            sort_lines(&mut lines);

            SizeGroup {
                product_id,
                size_key,
                size_label: accum.size_label,
                width: accum.width,
                height: accum.height,
                unit_count,
                lines,
            }
        })
        .collect();

    let misc = aggregate_misc(bom);

    debug!(
        groups = groups.len(),
        misc = misc.len(),
        "cut list aggregated"
    );

    CutListReport {
        project_id: bom.project_id.clone(),
        groups,
        misc,
        errors: bom.errors.clone(),
    }
}

fn aggregate_misc(bom: &ProjectBom) -> Vec<MiscCut> {
    // Lengths are non-negative here, so the bit pattern orders numerically.
    let mut misc: BTreeMap<(String, u64), MiscCut> = BTreeMap::new();

    for accessory in &bom.accessories {
        let key = (accessory.part_number.clone(), accessory.cut_length.to_bits());
        let entry = misc.entry(key).or_insert_with(|| MiscCut {
            part_number: accessory.part_number.clone(),
            name: accessory.name.clone(),
            cut_length: accessory.cut_length,
            total_cuts: 0,
            openings: Vec::new(),
        });
        entry.total_cuts += accessory.quantity;
        if !entry.openings.contains(&accessory.opening) {
            entry.openings.push(accessory.opening.clone());
        }
    }

    let mut misc: Vec<MiscCut> = misc.into_values().collect();
    for cut in &mut misc {
        cut.openings.sort();
    }
    misc
}
