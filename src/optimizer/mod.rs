//! 1-D cutting-stock optimization: packing required cut lengths into the
//! fewest fixed-length stock pieces.
//!
//! The heuristic is First-Fit Decreasing: polynomial, deterministic, and
//! within ⌈11/9·OPT⌉+1 pieces of optimal, which is the right trade for a
//! shop-floor cut plan. It is a strategy behind the [`optimize`] contract
//! and can be swapped without changing the output shape.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EPS;
use crate::error::ResolutionError;
use crate::model::{CutEntry, PartCatalog};
use crate::resolver::{PartFailure, ResolutionFailure};

/// One stock piece in a plan: the cuts assigned to it and what is left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPiece {
    /// Cut lengths assigned to this piece, in packing order.
    pub cuts: Vec<f64>,
    /// Unused length remaining on the piece.
    pub remaining: f64,
}

/// Packing result for one (part number, stock length) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPlan {
    pub part_number: String,
    pub stock_length: f64,
    pub stock_pieces_needed: usize,
    /// Per-piece cut layout for the saw operator.
    pub pieces: Vec<StockPiece>,
    pub total_stock_length: f64,
    pub total_cut_length: f64,
    pub waste_length: f64,
    /// Waste as a percentage of purchased stock, in [0, 100).
    pub waste_percent: f64,
}

/// Pack a multiset of cut lengths into stock pieces using First-Fit
/// Decreasing.
///
/// Precondition: every cut fits in one stock piece; callers reject
/// oversized cuts before calling (see [`plan_project`]). Empty input
/// yields a plan of zero pieces and zero waste.
pub fn optimize(part_number: &str, stock_length: f64, cuts: &[f64]) -> StockPlan {
    let mut sorted = cuts.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut pieces: Vec<StockPiece> = Vec::new();
    for &cut in &sorted {
        // First open piece with room; EPS so an exact fit packs.
        match pieces.iter_mut().find(|p| p.remaining + EPS >= cut) {
            Some(piece) => {
                piece.cuts.push(cut);
                piece.remaining -= cut;
            }
            None => pieces.push(StockPiece {
                cuts: vec![cut],
                remaining: stock_length - cut,
            }),
        }
    }

    let stock_pieces_needed = pieces.len();
    let total_stock_length = stock_pieces_needed as f64 * stock_length;
    let total_cut_length: f64 = cuts.iter().sum();
    let waste_length = total_stock_length - total_cut_length;
    let waste_percent = if total_stock_length > 0.0 {
        waste_length / total_stock_length * 100.0
    } else {
        0.0
    };

    StockPlan {
        part_number: part_number.to_string(),
        stock_length,
        stock_pieces_needed,
        pieces,
        total_stock_length,
        total_cut_length,
        waste_length,
        waste_percent,
    }
}

/// Stock plans for a whole project, with resolution and packing failures
/// carried alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockOptimizationReport {
    pub project_id: String,
    pub plans: Vec<StockPlan>,
    pub errors: Vec<ResolutionFailure>,
}

/// Group a project's cuts by (part number, stock length) and pack each
/// group, in parallel.
///
/// A group containing any cut longer than its stock is rejected whole with
/// [`ResolutionError::CutExceedsStock`] before packing — oversized cuts are
/// never dropped or split. Parts with no configured stock length are
/// excluded from optimization (they still appear in the purchasing
/// summary); that exclusion is documented behavior, not an error.
pub fn plan_project(cuts: &[CutEntry], catalog: &PartCatalog) -> (Vec<StockPlan>, Vec<PartFailure>) {
    let mut groups: BTreeMap<String, (f64, Vec<f64>)> = BTreeMap::new();
    let mut skipped = 0usize;

    for cut in cuts {
        let Some(stock_length) = catalog.stock_length(&cut.part_number) else {
            skipped += 1;
            continue;
        };
        groups
            .entry(cut.part_number.clone())
            .or_insert_with(|| (stock_length, Vec::new()))
            .1
            .push(cut.length);
    }

    if skipped > 0 {
        debug!(skipped, "cuts without stock length excluded from packing");
    }

    let results: Vec<Result<StockPlan, PartFailure>> = groups
        .into_par_iter()
        .map(|(part_number, (stock_length, lengths))| {
            if let Some(&oversize) = lengths
                .iter()
                .find(|&&len| len > stock_length + EPS)
            {
                return Err(PartFailure {
                    part_number,
                    error: ResolutionError::CutExceedsStock {
                        cut_length: oversize,
                        stock_length,
                    },
                });
            }
            Ok(optimize(&part_number, stock_length, &lengths))
        })
        .collect();

    let mut plans = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(plan) => plans.push(plan),
            Err(failure) => failures.push(failure),
        }
    }

    (plans, failures)
}
