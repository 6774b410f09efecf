//! Tokenizer for part formulas.

use crate::error::FormulaError;

use super::Dimension;

/// A single formula token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Variable(Dimension),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    /// Render the token roughly as it appeared in the source, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Variable(d) => d.as_str().to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Tokenize a formula string.
///
/// Recognizes numbers, the whole-word case-insensitive identifiers `width`
/// and `height`, the four arithmetic operators, and parentheses. Whitespace
/// is ignored. Anything else — including an identifier that is not exactly
/// `width` or `height` — is rejected at its first character.
pub fn tokenize(formula: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = formula.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let start = i;

        match ch {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => {
                tokens.push((Token::Plus, start));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, start));
                i += 1;
            }
            '*' => {
                tokens.push((Token::Star, start));
                i += 1;
            }
            '/' => {
                tokens.push((Token::Slash, start));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, start));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, start));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = i;
                let mut seen_dot = false;
                while end < chars.len() {
                    let c = chars[end];
                    if c.is_ascii_digit() {
                        end += 1;
                    } else if c == '.' && !seen_dot {
                        seen_dot = true;
                        end += 1;
                    } else {
                        break;
                    }
                }
                let text: String = chars[i..end].iter().collect();
                let value: f64 = text.parse().map_err(|_| FormulaError::InvalidCharacter {
                    ch,
                    position: start,
                })?;
                tokens.push((Token::Number(value), start));
                i = end;
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = i;
                while end < chars.len() && chars[end].is_ascii_alphabetic() {
                    end += 1;
                }
                let word: String = chars[i..end].iter().collect();
                // Whole-word match only: "heightened" is not a variable.
                let token = match word.to_lowercase().as_str() {
                    "width" => Token::Variable(Dimension::Width),
                    "height" => Token::Variable(Dimension::Height),
                    _ => {
                        return Err(FormulaError::InvalidCharacter {
                            ch: c,
                            position: start,
                        })
                    }
                };
                tokens.push((token, start));
                i = end;
            }
            other => {
                return Err(FormulaError::InvalidCharacter {
                    ch: other,
                    position: start,
                })
            }
        }
    }

    Ok(tokens)
}
