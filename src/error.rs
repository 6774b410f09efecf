//! Error types for BOM resolution and stock optimization.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing or evaluating a part formula.
///
/// These carry serde derives because per-part failures are embedded in the
/// report shapes returned to callers.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum FormulaError {
    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Empty formula")]
    EmptyFormula,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Formula result is not a finite number")]
    NonFiniteResult,

    #[error("Unknown variable '{name}': expected 'width' or 'height'")]
    UnknownVariable { name: String },
}

/// Errors produced while resolving part definitions against a component instance.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ResolutionError {
    #[error("Formula failed: {0}")]
    FormulaFailed(#[from] FormulaError),

    #[error("Formula produced a negative cut length: {length}")]
    NegativeLength { length: f64 },

    #[error("Part uses a quantity range but no quantity was selected")]
    MissingRangeSelection,

    #[error("Selected quantity {chosen} is outside the allowed range [{min}, {max}]")]
    RangeSelectionOutOfBounds { chosen: f64, min: f64, max: f64 },

    #[error("Cut length {cut_length} exceeds stock length {stock_length}")]
    CutExceedsStock { cut_length: f64, stock_length: f64 },

    #[error("Product '{product_id}' not found in snapshot")]
    PartNotFound { product_id: String },
}

/// Errors produced by the stock-cutting optimizer.
///
/// Reserved for future packing constraints (kerf, grain, max cuts per
/// piece). Oversized cuts are rejected upstream as
/// [`ResolutionError::CutExceedsStock`] before packing is attempted.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum OptimizationError {}

/// Top-level error for snapshot loading and report generation.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("Snapshot file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, BomError>;
