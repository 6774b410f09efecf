//! Resolved demand records, the output of part resolution.

use serde::{Deserialize, Serialize};

use crate::config::Unit;
use crate::model::PartType;

/// One resolved part requirement for a single unit of a component instance.
///
/// Produced fresh per instance by the resolver and never mutated afterward.
/// When `cut_length` is present it is guaranteed finite and non-negative;
/// formulas that evaluate negative or non-finite fail resolution instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDemand {
    pub part_number: String,
    pub name: String,
    pub part_type: PartType,
    pub unit: Unit,
    /// Quantity needed per single unit of the instance.
    pub quantity_per_unit: f64,
    /// Formula-derived cut length in inches, for length-cut parts only.
    pub cut_length: Option<f64>,
    pub is_milled: bool,
}

/// One physical cut to be packed into stock: the broadcast form of a cut
/// part's demand. A demand with quantity 2 on an instance of quantity 3
/// broadcasts into six entries, because each is an individually packed cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutEntry {
    pub part_number: String,
    /// Cut length in inches.
    pub length: f64,
}
