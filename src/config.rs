//! Configuration constants and shared helpers for the BOM pipeline.

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Decimal places used when deriving size keys from dimensions.
pub const SIZE_KEY_PRECISION: usize = 4;

use serde::{Deserialize, Serialize};

/// Unit of measure for a part quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Counted pieces (EA).
    #[default]
    Each,
    /// Lineal feet (LF).
    LinealFeet,
    /// Inches (IN).
    Inches,
    /// Square feet (SF), used for glass.
    SquareFeet,
}

impl Unit {
    /// Whether quantities in this unit are lengths (and may be formula-computed).
    pub fn is_length_based(&self) -> bool {
        matches!(self, Unit::LinealFeet | Unit::Inches)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Each => write!(f, "EA"),
            Unit::LinealFeet => write!(f, "LF"),
            Unit::Inches => write!(f, "IN"),
            Unit::SquareFeet => write!(f, "SF"),
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}
