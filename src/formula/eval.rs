//! Evaluation of parsed formulas against concrete dimensions.

use crate::error::FormulaError;

use super::{Ast, BinOp, Dimension};

/// Concrete dimension values a formula is evaluated against, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
    pub width: f64,
    pub height: f64,
}

impl Bindings {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}

/// Evaluate a formula tree against the given dimensions.
///
/// Pure IEEE-754 double arithmetic: the same tree and bindings always
/// produce the same value. Division by a zero divisor and non-finite
/// results are typed errors, never panics or silent values.
pub fn evaluate(ast: &Ast, bindings: &Bindings) -> Result<f64, FormulaError> {
    let value = eval_node(ast, bindings)?;
    if !value.is_finite() {
        return Err(FormulaError::NonFiniteResult);
    }
    Ok(value)
}

fn eval_node(ast: &Ast, bindings: &Bindings) -> Result<f64, FormulaError> {
    match ast {
        Ast::Number(value) => Ok(*value),
        Ast::Variable(dim) => Ok(bindings.get(*dim)),
        Ast::Neg(inner) => Ok(-eval_node(inner, bindings)?),
        Ast::Binary { op, lhs, rhs } => {
            let left = eval_node(lhs, bindings)?;
            let right = eval_node(rhs, bindings)?;
            match op {
                BinOp::Add => Ok(left + right),
                BinOp::Sub => Ok(left - right),
                BinOp::Mul => Ok(left * right),
                BinOp::Div => {
                    if right == 0.0 {
                        Err(FormulaError::DivisionByZero)
                    } else {
                        Ok(left / right)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::parse;

    const EPS: f64 = 1e-9;

    fn eval(formula: &str, width: f64, height: f64) -> Result<f64, FormulaError> {
        evaluate(&parse(formula)?, &Bindings::new(width, height))
    }

    #[test]
    fn test_evaluate_constant() {
        assert!((eval("4", 0.0, 0.0).unwrap() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_variables() {
        assert!((eval("width", 36.0, 96.0).unwrap() - 36.0).abs() < EPS);
        assert!((eval("height", 36.0, 96.0).unwrap() - 96.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_deduction() {
        assert!((eval("width - 4", 36.0, 96.0).unwrap() - 32.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert!((eval("2 + 3 * 4", 0.0, 0.0).unwrap() - 14.0).abs() < EPS);
        assert!((eval("(2 + 3) * 4", 0.0, 0.0).unwrap() - 20.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_division() {
        assert!((eval("height / 2", 0.0, 95.5).unwrap() - 47.75).abs() < EPS);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("1/0", 36.0, 96.0).unwrap_err(), FormulaError::DivisionByZero);
    }

    #[test]
    fn test_evaluate_division_by_zero_expression() {
        assert_eq!(
            eval("width / (height - 96)", 36.0, 96.0).unwrap_err(),
            FormulaError::DivisionByZero
        );
    }

    #[test]
    fn test_evaluate_non_finite() {
        // Overflow to infinity via repeated multiplication of huge literals.
        let huge = format!("{0} * {0} * {0}", f64::MAX);
        assert_eq!(
            eval(&huge, 0.0, 0.0).unwrap_err(),
            FormulaError::NonFiniteResult
        );
    }

    #[test]
    fn test_evaluate_unary_minus() {
        assert!((eval("-5 + width", 36.0, 0.0).unwrap() - 31.0).abs() < EPS);
        assert!((eval("- (width / 2)", 36.0, 0.0).unwrap() + 18.0).abs() < EPS);
    }

    #[test]
    fn test_evaluate_purity() {
        let ast = parse("(width - 4) / 2 + height * 0.25").unwrap();
        let bindings = Bindings::new(36.125, 95.75);
        let a = evaluate(&ast, &bindings).unwrap();
        let b = evaluate(&ast, &bindings).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
