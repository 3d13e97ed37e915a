//! Arithmetic expression evaluation.
//!
//! Expressions are reduced to a strict character whitelist before parsing,
//! so no identifiers or call syntax ever reach the evaluator. Parsing is a
//! small recursive-descent walk with the usual precedence (`*` `/` over
//! `+` `-`), parenthesised grouping, and unary sign.

use tracing::debug;

use crate::error::{Error, Result};
use crate::functions::Context;

/// The `math()` handler.
///
/// Also serves the implicit bare-paren and minus call forms. Any
/// evaluation failure degrades to `"0"`.
pub fn handler(input: &str, _context: &Context) -> String {
    match eval(input) {
        Ok(value) => format_number(value),
        Err(error) => {
            debug!(%error, input, "math expression degraded to zero");
            format_number(0.0)
        }
    }
}

/// Evaluate a whitelisted arithmetic expression.
///
/// Characters outside `0-9 . * / + - ( )` are stripped before parsing.
/// The result is rounded to 10 decimal places. Malformed expressions,
/// division by zero, and non-finite results are errors.
pub fn eval(expr: &str) -> Result<f64> {
    let sanitized: String = expr
        .chars()
        .filter(|&c| matches!(c, '0'..='9' | '.' | '*' | '/' | '+' | '-' | '(' | ')'))
        .collect();

    let mut parser = Parser {
        bytes: sanitized.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    if parser.pos != parser.bytes.len() {
        return Err(Error::arithmetic("unexpected trailing input", parser.pos));
    }
    // The rounding multiply can push large magnitudes to infinity.
    let value = round_to_places(value, 10);
    if !value.is_finite() {
        return Err(Error::arithmetic("result is not finite", parser.pos));
    }
    Ok(value)
}

/// Format a numeric result without unnecessary trailing zeros.
///
/// Whole numbers print with no decimal point; `-0` normalizes to `0`.
pub(crate) fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{value:.10}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Round half away from zero to `places` decimal places.
fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn expression(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(Error::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'+') => {
                self.pos += 1;
                self.factor()
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(b')') {
                    return Err(Error::arithmetic("expected closing paren", self.pos));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(b'0'..=b'9' | b'.') => self.number(),
            Some(other) => Err(Error::arithmetic(
                format!("unexpected character '{}'", other as char),
                self.pos,
            )),
            None => Err(Error::arithmetic("unexpected end of expression", self.pos)),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
            self.pos += 1;
        }
        let literal = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        literal
            .parse()
            .map_err(|_| Error::arithmetic(format!("bad number '{literal}'"), start))
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }
}
