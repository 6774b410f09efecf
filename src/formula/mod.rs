//! Part formula parsing and evaluation.
//!
//! Formulas are short arithmetic expressions over a component's `width` and
//! `height`, e.g. `"width - 4"` or `"(height / 2) - 0.75"`. They are parsed
//! into a closed, typed AST and evaluated against concrete dimensions; no
//! dynamic code execution is involved, so every failure mode is a
//! [`FormulaError`](crate::error::FormulaError) variant.

mod eval;
mod lexer;
mod parser;

pub use eval::{evaluate, Bindings};
pub use lexer::{tokenize, Token};
pub use parser::parse;

use crate::error::FormulaError;
use serde::{Deserialize, Serialize};

/// A component dimension a formula variable can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Width,
    Height,
}

impl Dimension {
    /// The variable name this dimension binds in a formula.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "width" => Ok(Dimension::Width),
            "height" => Ok(Dimension::Height),
            other => Err(FormulaError::UnknownVariable {
                name: other.to_string(),
            }),
        }
    }
}

/// Arithmetic operator in a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed formula expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ast {
    Number(f64),
    Variable(Dimension),
    Neg(Box<Ast>),
    Binary {
        op: BinOp,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dimension_from_str() {
        assert_eq!(Dimension::from_str("width").unwrap(), Dimension::Width);
        assert_eq!(Dimension::from_str("HEIGHT").unwrap(), Dimension::Height);
        assert_eq!(Dimension::from_str(" Width ").unwrap(), Dimension::Width);
    }

    #[test]
    fn test_dimension_from_str_unknown() {
        let err = Dimension::from_str("depth").unwrap_err();
        assert_eq!(
            err,
            crate::error::FormulaError::UnknownVariable {
                name: "depth".to_string()
            }
        );
    }
}
