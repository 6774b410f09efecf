//! Part resolution: turning part definitions plus a component instance into
//! concrete demand records and physical cut entries.
//!
//! Resolution is error-isolated: one bad formula in a 500-part BOM reports
//! an error for that part and keeps resolving the other 499. Demands that
//! fail are excluded from downstream totals but surfaced in the `errors`
//! collection of every report.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::float_cmp;
use crate::error::ResolutionError;
use crate::formula::{self, Bindings, Dimension};
use crate::model::{
    ComponentInstance, CutEntry, PartCatalog, PartDefinition, PartDemand, PartType,
    ProjectSnapshot, QuantityMode,
};

/// A per-part resolution failure within one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartFailure {
    pub part_number: String,
    pub error: ResolutionError,
}

/// A resolution failure located to an opening, as surfaced in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub opening: String,
    pub part_number: String,
    pub error: ResolutionError,
}

/// Output of resolving one component instance against its product's parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceResolution {
    /// Per-part demand records (one per part definition that resolved).
    pub demands: Vec<PartDemand>,
    /// Broadcast physical cuts for the whole instance:
    /// `quantity_per_unit × instance.quantity` entries per cut part.
    pub cuts: Vec<CutEntry>,
    /// Per-part failures; siblings keep resolving.
    pub errors: Vec<PartFailure>,
}

/// One opening's resolved demands, paired for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceDemands {
    pub instance: ComponentInstance,
    pub demands: Vec<PartDemand>,
}

/// Fully resolved project: the input every report is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectBom {
    pub project_id: String,
    pub resolved: Vec<InstanceDemands>,
    /// All physical cuts in the project, accessories included.
    pub cuts: Vec<CutEntry>,
    /// Accessory demands that passed validation.
    pub accessories: Vec<crate::model::AccessoryDemand>,
    pub errors: Vec<ResolutionFailure>,
}

/// Prefix the owning dimension onto a formula that starts with a bare
/// operator. `"- 5"` on a width part becomes `"width - 5"`. This is a
/// domain convention owned by the resolver; the parser never guesses a
/// missing left operand.
pub fn apply_dimension_prefix(formula: &str, dimension: Dimension) -> String {
    let trimmed = formula.trim_start();
    match trimmed.chars().next() {
        Some('+' | '-' | '*' | '/') => format!("{} {}", dimension.as_str(), trimmed),
        _ => formula.to_string(),
    }
}

/// Resolve every part definition of a product against one instance.
pub fn resolve_instance(
    parts: &[PartDefinition],
    instance: &ComponentInstance,
    catalog: &PartCatalog,
) -> InstanceResolution {
    let bindings = Bindings::new(instance.width, instance.height);
    let mut result = InstanceResolution::default();

    for part in parts {
        match resolve_part(part, instance, catalog, &bindings) {
            Ok(demand) => {
                broadcast_cuts(&demand, instance, &mut result.cuts);
                result.demands.push(demand);
            }
            Err(error) => result.errors.push(PartFailure {
                part_number: part.part_number.clone(),
                error,
            }),
        }
    }

    result
}

fn resolve_part(
    part: &PartDefinition,
    instance: &ComponentInstance,
    catalog: &PartCatalog,
    bindings: &Bindings,
) -> Result<PartDemand, ResolutionError> {
    let quantity = select_quantity(part, instance)?;
    let unit = catalog.unit(&part.part_number).unwrap_or(part.unit);

    let mut cut_length = None;
    let mut quantity_per_unit = quantity;

    if part.part_type.is_cut() {
        // Cut parts: the formula yields a length; the quantity field is a
        // count of identical cuts per unit, independent of the formula.
        if let Some(text) = &part.formula {
            cut_length = Some(evaluate_length(text, part.dimension, bindings)?);
        }
    } else if matches!(part.part_type, PartType::Hardware | PartType::Fastener)
        && unit.is_length_based()
    {
        // Length-based hardware (weatherstrip by the foot): the formula,
        // when present, computes the quantity itself. Glass and
        // option-linked parts always keep their fixed quantity.
        if let Some(text) = &part.formula {
            quantity_per_unit = evaluate_length(text, part.dimension, bindings)?;
        }
    }

    Ok(PartDemand {
        part_number: part.part_number.clone(),
        name: part.name.clone(),
        part_type: part.part_type,
        unit,
        quantity_per_unit,
        cut_length,
        is_milled: part.is_milled,
    })
}

/// Evaluate a dimension formula to a finite, non-negative length.
fn evaluate_length(
    text: &str,
    dimension: Dimension,
    bindings: &Bindings,
) -> Result<f64, ResolutionError> {
    let prefixed = apply_dimension_prefix(text, dimension);
    let ast = formula::parse(&prefixed)?;
    let value = formula::evaluate(&ast, bindings)?;
    if value < 0.0 {
        return Err(ResolutionError::NegativeLength { length: value });
    }
    Ok(value)
}

fn select_quantity(
    part: &PartDefinition,
    instance: &ComponentInstance,
) -> Result<f64, ResolutionError> {
    match part.quantity_mode {
        QuantityMode::Fixed { quantity } => Ok(quantity),
        QuantityMode::Range { min, max, .. } => {
            let chosen = instance
                .range_selections
                .get(&part.part_number)
                .copied()
                .ok_or(ResolutionError::MissingRangeSelection)?;
            if !float_cmp::in_range(chosen, min, max) {
                return Err(ResolutionError::RangeSelectionOutOfBounds { chosen, min, max });
            }
            Ok(chosen)
        }
    }
}

/// Broadcast a cut part's demand into individual physical cut entries.
///
/// Each entry is one cut to be packed, so a demand of 2 cuts per unit on an
/// instance of 3 units emits 6 entries, never one entry with quantity 6.
fn broadcast_cuts(demand: &PartDemand, instance: &ComponentInstance, cuts: &mut Vec<CutEntry>) {
    let length = match (demand.part_type.is_cut(), demand.cut_length) {
        (true, Some(length)) => length,
        _ => return,
    };

    let count = (demand.quantity_per_unit * instance.quantity as f64).round() as usize;
    for _ in 0..count {
        cuts.push(CutEntry {
            part_number: demand.part_number.clone(),
            length,
        });
    }
}

impl ProjectBom {
    /// Resolve a whole project snapshot.
    ///
    /// Openings resolve independently and in parallel; results merge in
    /// snapshot order, so completion order never affects the output.
    pub fn resolve(snapshot: &ProjectSnapshot) -> ProjectBom {
        let products = snapshot.products_by_id();

        let per_opening: Vec<(ComponentInstance, InstanceResolution)> = snapshot
            .openings
            .par_iter()
            .map(|opening| {
                let resolution = match products.get(opening.product_id.as_str()) {
                    Some(product) => resolve_instance(&product.parts, opening, &snapshot.catalog),
                    None => InstanceResolution {
                        errors: vec![PartFailure {
                            part_number: String::new(),
                            error: ResolutionError::PartNotFound {
                                product_id: opening.product_id.clone(),
                            },
                        }],
                        ..Default::default()
                    },
                };
                (opening.clone(), resolution)
            })
            .collect();

        let mut bom = ProjectBom {
            project_id: snapshot.project_id.clone(),
            ..Default::default()
        };

        for (instance, resolution) in per_opening {
            for failure in resolution.errors {
                warn!(
                    opening = %instance.name,
                    part = %failure.part_number,
                    "part resolution failed: {}",
                    failure.error
                );
                bom.errors.push(ResolutionFailure {
                    opening: instance.name.clone(),
                    part_number: failure.part_number,
                    error: failure.error,
                });
            }
            bom.cuts.extend(resolution.cuts);
            bom.resolved.push(InstanceDemands {
                instance,
                demands: resolution.demands,
            });
        }

        for accessory in &snapshot.accessories {
            if accessory.cut_length < 0.0 {
                warn!(
                    opening = %accessory.opening,
                    part = %accessory.part_number,
                    "accessory has a negative cut length"
                );
                bom.errors.push(ResolutionFailure {
                    opening: accessory.opening.clone(),
                    part_number: accessory.part_number.clone(),
                    error: ResolutionError::NegativeLength {
                        length: accessory.cut_length,
                    },
                });
                continue;
            }
            for _ in 0..accessory.quantity {
                bom.cuts.push(CutEntry {
                    part_number: accessory.part_number.clone(),
                    length: accessory.cut_length,
                });
            }
            bom.accessories.push(accessory.clone());
        }

        debug!(
            openings = bom.resolved.len(),
            cuts = bom.cuts.len(),
            errors = bom.errors.len(),
            "project resolved"
        );

        bom
    }
}
