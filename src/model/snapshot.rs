//! The caller-assembled project snapshot the pipeline operates on.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BomError, Result};
use crate::model::{AccessoryDemand, ComponentInstance, PartCatalog, Product};

/// Everything the pipeline needs for one project, fetched up front by the
/// surrounding application. The pipeline performs no I/O of its own; all
/// reports are pure recomputations of this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project_id: String,
    /// Product templates referenced by the openings.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Component instances (openings) in the project.
    #[serde(default)]
    pub openings: Vec<ComponentInstance>,
    /// Accessory cuts attached directly to openings.
    #[serde(default)]
    pub accessories: Vec<AccessoryDemand>,
    /// Pre-fetched master-parts catalog data.
    #[serde(default)]
    pub catalog: PartCatalog,
}

impl ProjectSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BomError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&contents)?;
        Ok(snapshot)
    }

    /// Index products by id for resolution.
    pub fn products_by_id(&self) -> HashMap<&str, &Product> {
        self.products.iter().map(|p| (p.id.as_str(), p)).collect()
    }
}
