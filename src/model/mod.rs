//! Data model for BOM resolution: part definitions, component instances,
//! resolved demand records, the master-parts catalog, and the project
//! snapshot assembled by the caller.

mod catalog;
mod demand;
mod instance;
mod part;
mod snapshot;

pub use catalog::{CatalogEntry, PartCatalog};
pub use demand::{CutEntry, PartDemand};
pub use instance::{AccessoryDemand, ComponentInstance};
pub use part::{PartDefinition, PartType, Product, QuantityMode};
pub use snapshot::ProjectSnapshot;
