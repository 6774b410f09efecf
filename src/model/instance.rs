//! Component instances (openings) and opening-level accessory demands.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::SIZE_KEY_PRECISION;

/// One physical unit in a project: a manufactured opening with concrete
/// dimensions and a count of identical units.
///
/// Created and edited by the opening-builder UI; read-only input here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Opening label, carried through reports for shop-floor traceability.
    pub name: String,
    /// The product template this instance is built from.
    pub product_id: String,
    /// Width in inches (positive).
    pub width: f64,
    /// Height in inches (positive).
    pub height: f64,
    /// Count of identical units.
    pub quantity: u32,
    /// Concrete quantities chosen by the opening builder for parts with a
    /// range quantity mode, keyed by part number.
    #[serde(default)]
    pub range_selections: HashMap<String, f64>,
}

impl ComponentInstance {
    /// Deterministic grouping key for instances sharing a product and size.
    ///
    /// Dimensions are fixed to [`SIZE_KEY_PRECISION`] decimal places so that
    /// two instances with equal stored dimensions always collide.
    pub fn size_key(&self) -> String {
        format!(
            "{}:{:.prec$}x{:.prec$}",
            self.product_id,
            self.width,
            self.height,
            prec = SIZE_KEY_PRECISION
        )
    }

    /// Human-readable size label, e.g. `36 x 96`.
    pub fn size_label(&self) -> String {
        format!("{} x {}", trim_dim(self.width), trim_dim(self.height))
    }
}

/// An accessory cut attached directly to an opening rather than through a
/// product's BOM (e.g. a filler extrusion run along one jamb). These feed
/// the cut list's miscellaneous group and the stock optimizer, but carry
/// no formula — the length is already concrete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryDemand {
    /// Name of the opening this accessory belongs to.
    pub opening: String,
    pub part_number: String,
    pub name: String,
    /// Concrete cut length in inches.
    pub cut_length: f64,
    /// Number of identical cuts.
    pub quantity: u32,
}

fn trim_dim(value: f64) -> String {
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instance(product: &str, width: f64, height: f64) -> ComponentInstance {
        ComponentInstance {
            name: "Opening 101".to_string(),
            product_id: product.to_string(),
            width,
            height,
            quantity: 1,
            range_selections: HashMap::new(),
        }
    }

    #[test]
    fn test_size_key_deterministic() {
        let a = instance("SD-200", 36.0, 96.0);
        let b = instance("SD-200", 36.0, 96.0);
        assert_eq!(a.size_key(), b.size_key());
    }

    #[test]
    fn test_size_key_distinguishes_sizes() {
        let a = instance("SD-200", 36.0, 96.0);
        let b = instance("SD-200", 36.5, 96.0);
        assert_ne!(a.size_key(), b.size_key());
    }

    #[test]
    fn test_size_key_distinguishes_products() {
        let a = instance("SD-200", 36.0, 96.0);
        let b = instance("FX-100", 36.0, 96.0);
        assert_ne!(a.size_key(), b.size_key());
    }

    #[test]
    fn test_size_key_format() {
        assert_eq!(
            instance("SD-200", 36.0, 96.0).size_key(),
            "SD-200:36.0000x96.0000"
        );
    }

    #[test]
    fn test_size_label() {
        assert_eq!(instance("SD-200", 36.0, 96.0).size_label(), "36 x 96");
        assert_eq!(instance("SD-200", 36.125, 95.75).size_label(), "36.125 x 95.75");
    }
}
