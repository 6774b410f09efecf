//! Recursive-descent parser for part formulas.
//!
//! Grammar (standard precedence, unary minus allowed):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | variable | '(' expr ')' | '-' factor
//! ```

use crate::error::FormulaError;

use super::lexer::{tokenize, Token};
use super::{Ast, BinOp};

/// Parse a formula string into an expression tree.
pub fn parse(formula: &str) -> Result<Ast, FormulaError> {
    let tokens = tokenize(formula)?;
    if tokens.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let ast = parser.expr()?;

    // The grammar must consume the whole formula.
    match parser.peek() {
        None => Ok(ast),
        Some((Token::RParen, _)) => Err(FormulaError::UnbalancedParens),
        Some((token, position)) => Err(FormulaError::UnexpectedToken {
            token: token.describe(),
            position: *position,
        }),
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Ast, FormulaError> {
        let mut lhs = self.term()?;

        while let Some((token, _)) = self.peek() {
            let op = match token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn term(&mut self) -> Result<Ast, FormulaError> {
        let mut lhs = self.factor()?;

        while let Some((token, _)) = self.peek() {
            let op = match token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Ast, FormulaError> {
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(Ast::Number(value)),
            Some((Token::Variable(dim), _)) => Ok(Ast::Variable(dim)),
            Some((Token::Minus, _)) => {
                let inner = self.factor()?;
                Ok(Ast::Neg(Box::new(inner)))
            }
            Some((Token::LParen, _)) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(inner),
                    _ => Err(FormulaError::UnbalancedParens),
                }
            }
            Some((token, position)) => Err(FormulaError::UnexpectedToken {
                token: token.describe(),
                position,
            }),
            None => Err(FormulaError::UnexpectedToken {
                token: "end of formula".to_string(),
                position: self
                    .tokens
                    .last()
                    .map(|(_, p)| p + 1)
                    .unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Dimension;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse("42").unwrap(), Ast::Number(42.0));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse("width").unwrap(), Ast::Variable(Dimension::Width));
    }

    #[test]
    fn test_parse_precedence() {
        // 2 + 3 * 4 parses as 2 + (3 * 4)
        let ast = parse("2 + 3 * 4").unwrap();
        assert_eq!(
            ast,
            Ast::Binary {
                op: BinOp::Add,
                lhs: Box::new(Ast::Number(2.0)),
                rhs: Box::new(Ast::Binary {
                    op: BinOp::Mul,
                    lhs: Box::new(Ast::Number(3.0)),
                    rhs: Box::new(Ast::Number(4.0)),
                }),
            }
        );
    }

    #[test]
    fn test_parse_parens_override_precedence() {
        let ast = parse("(2 + 3) * 4").unwrap();
        assert_eq!(
            ast,
            Ast::Binary {
                op: BinOp::Mul,
                lhs: Box::new(Ast::Binary {
                    op: BinOp::Add,
                    lhs: Box::new(Ast::Number(2.0)),
                    rhs: Box::new(Ast::Number(3.0)),
                }),
                rhs: Box::new(Ast::Number(4.0)),
            }
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(parse("-5").unwrap(), Ast::Neg(Box::new(Ast::Number(5.0))));
    }

    #[test]
    fn test_parse_left_associative_subtraction() {
        // 10 - 3 - 2 parses as (10 - 3) - 2
        let ast = parse("10 - 3 - 2").unwrap();
        assert_eq!(
            ast,
            Ast::Binary {
                op: BinOp::Sub,
                lhs: Box::new(Ast::Binary {
                    op: BinOp::Sub,
                    lhs: Box::new(Ast::Number(10.0)),
                    rhs: Box::new(Ast::Number(3.0)),
                }),
                rhs: Box::new(Ast::Number(2.0)),
            }
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap_err(), FormulaError::EmptyFormula);
        assert_eq!(parse("  ").unwrap_err(), FormulaError::EmptyFormula);
    }

    #[test]
    fn test_parse_missing_close_paren() {
        assert_eq!(
            parse("(width - 4").unwrap_err(),
            FormulaError::UnbalancedParens
        );
    }

    #[test]
    fn test_parse_stray_close_paren() {
        assert_eq!(
            parse("width - 4)").unwrap_err(),
            FormulaError::UnbalancedParens
        );
    }

    #[test]
    fn test_parse_dangling_operator() {
        assert!(matches!(
            parse("width -").unwrap_err(),
            FormulaError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_parse_adjacent_operators() {
        assert!(matches!(
            parse("2 + * 3").unwrap_err(),
            FormulaError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_parse_adjacent_numbers() {
        assert!(matches!(
            parse("2 3").unwrap_err(),
            FormulaError::UnexpectedToken { .. }
        ));
    }
}
