//! cutplan - BOM formula engine and cut-list/stock-optimization pipeline.
//!
//! Given product templates whose parts are defined by arithmetic formulas
//! over component width/height, and a set of manufactured component
//! instances (openings) with concrete dimensions and quantities, this
//! library evaluates each part's formula to a cut length, aggregates
//! identical cuts into purchasing and cutting work orders, and packs the
//! required cuts into raw stock with a First-Fit Decreasing heuristic.
//!
//! All inputs arrive pre-fetched in a [`ProjectSnapshot`]; the pipeline
//! performs no I/O and every report is a pure recomputation of that
//! snapshot.
//!
//! # Example
//!
//! ```
//! use cutplan::{get_purchasing_summary, get_stock_optimization, ProjectSnapshot};
//!
//! let snapshot: ProjectSnapshot = serde_json::from_str(r#"{
//!     "project_id": "P-1001",
//!     "products": [{
//!         "id": "SD-200", "name": "Sliding Door",
//!         "parts": [{
//!             "part_number": "EXT-100", "name": "Head Rail",
//!             "part_type": "Extrusion", "unit": "Each",
//!             "formula": "width - 4",
//!             "quantity_mode": { "mode": "fixed", "quantity": 2.0 }
//!         }]
//!     }],
//!     "openings": [{
//!         "name": "Opening 101", "product_id": "SD-200",
//!         "width": 36.0, "height": 96.0, "quantity": 5
//!     }],
//!     "catalog": { "EXT-100": { "stock_length": 144.0 } }
//! }"#).unwrap();
//!
//! let summary = get_purchasing_summary(&snapshot);
//! assert_eq!(summary.lines[0].total_quantity, 10.0);
//!
//! let optimization = get_stock_optimization(&snapshot);
//! assert_eq!(optimization.plans[0].stock_pieces_needed, 3);
//! ```

pub mod config;
pub mod cutlist;
pub mod error;
pub mod formula;
pub mod model;
pub mod optimizer;
pub mod report;
pub mod resolver;
pub mod summary;

// Re-exports for convenience
pub use config::Unit;
pub use cutlist::{CutListReport, SizeGroup};
pub use error::{BomError, FormulaError, OptimizationError, ResolutionError, Result};
pub use formula::{evaluate, parse, Ast, Bindings, Dimension};
pub use model::{
    AccessoryDemand, CatalogEntry, ComponentInstance, CutEntry, PartCatalog, PartDefinition,
    PartDemand, PartType, Product, ProjectSnapshot, QuantityMode,
};
pub use optimizer::{optimize, StockOptimizationReport, StockPlan};
pub use resolver::{ProjectBom, ResolutionFailure};
pub use summary::{JambKitReport, PickListReport, SummaryReport};

/// Filters for [`get_cut_list`].
#[derive(Debug, Clone, Default)]
pub struct CutListFilter {
    /// Keep only groups for this product id.
    pub product: Option<String>,
    /// Keep only the group with this size key.
    pub size_key: Option<String>,
    /// Project each kept group down to a partial run of this many units.
    pub batch_size: Option<u32>,
}

/// Roll every resolved part into total-quantity-by-part-number.
pub fn get_purchasing_summary(snapshot: &ProjectSnapshot) -> SummaryReport {
    summary::summarize(&ProjectBom::resolve(snapshot))
}

/// Build the project cut list, optionally filtered and batch-scaled.
pub fn get_cut_list(snapshot: &ProjectSnapshot, filter: &CutListFilter) -> CutListReport {
    let mut report = cutlist::aggregate(&ProjectBom::resolve(snapshot));

    if let Some(product) = &filter.product {
        report.groups.retain(|g| &g.product_id == product);
    }
    if let Some(size_key) = &filter.size_key {
        report.groups.retain(|g| &g.size_key == size_key);
    }
    if let Some(batch) = filter.batch_size {
        let scaled: Vec<SizeGroup> = report
            .groups
            .iter()
            .filter_map(|g| report.batch(&g.product_id, &g.size_key, batch))
            .collect();
        report.groups = scaled;
    }

    report
}

/// Pack every cut group into stock pieces and report waste.
pub fn get_stock_optimization(snapshot: &ProjectSnapshot) -> StockOptimizationReport {
    let bom = ProjectBom::resolve(snapshot);
    let (plans, packing_failures) = optimizer::plan_project(&bom.cuts, &snapshot.catalog);

    // Packing failures belong to a cut group, not a single opening.
    let mut errors = bom.errors;
    errors.extend(packing_failures.into_iter().map(|f| ResolutionFailure {
        opening: "-".to_string(),
        part_number: f.part_number,
        error: f.error,
    }));

    StockOptimizationReport {
        project_id: bom.project_id,
        plans,
        errors,
    }
}

/// Build the warehouse pick list (catalog-flagged parts by product).
pub fn get_pick_list(snapshot: &ProjectSnapshot) -> PickListReport {
    summary::pick_list(&ProjectBom::resolve(snapshot), &snapshot.catalog)
}

/// Build per-opening jamb kits (catalog-flagged hardware by opening).
pub fn get_jamb_kit_list(snapshot: &ProjectSnapshot) -> JambKitReport {
    summary::jamb_kit_list(&ProjectBom::resolve(snapshot), &snapshot.catalog)
}
