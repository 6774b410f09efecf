//! Master-parts catalog lookup data.
//!
//! The pipeline never queries the catalog store itself: the caller resolves
//! every part number it needs up front and passes the result in as part of
//! the project snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Unit;

/// Catalog attributes for one part number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Length of one purchased stock piece, in inches. Parts without a
    /// stock length are excluded from stock optimization.
    #[serde(default)]
    pub stock_length: Option<f64>,
    /// Catalog unit of measure; overrides the definition's unit when set.
    #[serde(default)]
    pub unit: Option<Unit>,
    /// Include this part on the warehouse pick list.
    #[serde(default)]
    pub include_on_pick_list: bool,
    /// Include this part in per-opening jamb kits.
    #[serde(default)]
    pub include_on_jamb_kit: bool,
}

/// Part-number keyed catalog lookup, pre-fetched by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl PartCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, part_number: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(part_number.into(), entry);
    }

    pub fn get(&self, part_number: &str) -> Option<&CatalogEntry> {
        self.entries.get(part_number)
    }

    /// Stock length for a part, if one is configured.
    pub fn stock_length(&self, part_number: &str) -> Option<f64> {
        self.entries.get(part_number).and_then(|e| e.stock_length)
    }

    /// Catalog unit override for a part.
    pub fn unit(&self, part_number: &str) -> Option<Unit> {
        self.entries.get(part_number).and_then(|e| e.unit)
    }

    pub fn is_on_pick_list(&self, part_number: &str) -> bool {
        self.entries
            .get(part_number)
            .map(|e| e.include_on_pick_list)
            .unwrap_or(false)
    }

    pub fn is_on_jamb_kit(&self, part_number: &str) -> bool {
        self.entries
            .get(part_number)
            .map(|e| e.include_on_jamb_kit)
            .unwrap_or(false)
    }
}
