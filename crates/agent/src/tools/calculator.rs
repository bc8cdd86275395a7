//! Safe arithmetic evaluation for the `calculator` tool.
//!
//! A small recursive-descent parser over `+ - * / ^`, parentheses, unary
//! sign and decimal numbers. No names, no calls, no ambient state.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn description(&self) -> &'static str {
        "Evaluate an arithmetic expression (+, -, *, /, ^, parentheses)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let expression = input
            .get("expression")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(match evaluate(expression) {
            Ok(value) => json!({ "result": format_number(value) }),
            Err(message) => json!({ "error": format!("error evaluating expression: {message}") }),
        })
    }
}

pub fn evaluate(expression: &str) -> Result<f64, String> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, position: 0 };
    let value = parser.expression()?;
    if parser.position != parser.tokens.len() {
        return Err("trailing input after expression".to_string());
    }
    Ok(value)
}

/// Render without a trailing `.0` for whole numbers, matching how the
/// result is spliced into model-facing text. Values within float noise of
/// an integer (`450000 * 0.07` comes out as `31500.000000000004`) render
/// as that integer.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.abs() < 1e15 && (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 =
                    literal.parse().map_err(|_| format!("invalid number `{literal}`"))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(format!("unsupported character `{other}`")),
        }
    }

    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// Unary sign binds tighter than `*`/`/` but looser than `^`;
    /// `^` is right-associative.
    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.factor()
            }
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.factor()?)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, String> {
        let base = self.atom()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.advance();
            let exponent = self.factor()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, String> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Open) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::Close) => Ok(value),
                    _ => Err("unbalanced parenthesis".to_string()),
                }
            }
            other => Err(format!("unexpected token {other:?}")),
        }
    }
}
