//! Product and part definitions, the read-only input from the product catalog.

use serde::{Deserialize, Serialize};

use crate::config::Unit;
use crate::formula::Dimension;

/// Category of a BOM part. The declaration order is the presentation
/// priority used when sorting report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    /// Extruded profile cut to a formula-derived length.
    Extrusion,
    /// Non-extruded raw stock cut to length (wood, steel bar).
    CutStock,
    /// Discrete hardware (rollers, locks, handles).
    Hardware,
    /// Screws, rivets, anchors.
    Fastener,
    /// Glass or infill panels.
    Glass,
    /// Part contributed by a product option selection.
    OptionLinked,
}

impl PartType {
    /// Sort priority for report ordering (lower sorts first).
    pub fn priority(&self) -> u8 {
        match self {
            PartType::Extrusion => 0,
            PartType::CutStock => 1,
            PartType::Hardware => 2,
            PartType::Fastener => 3,
            PartType::Glass => 4,
            PartType::OptionLinked => 5,
        }
    }

    /// Whether parts of this type are physically cut from stock.
    pub fn is_cut(&self) -> bool {
        matches!(self, PartType::Extrusion | PartType::CutStock)
    }
}

impl std::fmt::Display for PartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartType::Extrusion => write!(f, "Extrusion"),
            PartType::CutStock => write!(f, "Cut Stock"),
            PartType::Hardware => write!(f, "Hardware"),
            PartType::Fastener => write!(f, "Fastener"),
            PartType::Glass => write!(f, "Glass"),
            PartType::OptionLinked => write!(f, "Option"),
        }
    }
}

/// How a part's per-unit quantity is determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QuantityMode {
    /// Fixed at design time.
    Fixed { quantity: f64 },
    /// Chosen per instance within [min, max] by the opening builder.
    Range { min: f64, max: f64, default: f64 },
}

impl Default for QuantityMode {
    fn default() -> Self {
        QuantityMode::Fixed { quantity: 1.0 }
    }
}

/// One part line in a product's bill of materials.
///
/// Created and edited by the product-editing UI; read-only input here.
/// Stock length and export flags are not owned by the definition — they
/// come from the master-parts catalog keyed by `part_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub part_number: String,
    pub name: String,
    pub part_type: PartType,
    pub unit: Unit,
    /// Arithmetic formula over width/height, e.g. `"width - 4"`.
    #[serde(default)]
    pub formula: Option<String>,
    /// Dimension this part's formula deducts from when it starts with a
    /// bare operator (`"- 5"` on a width part means `width - 5`).
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default)]
    pub quantity_mode: QuantityMode,
    /// Whether the cut requires a milling operation after cutting.
    #[serde(default)]
    pub is_milled: bool,
}

/// A product template: an identifier plus its part definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub parts: Vec<PartDefinition>,
}
