//! Percentage calculation over fixed-point decimal arithmetic.
//!
//! Percentages are the one place binary floating point is not good
//! enough: the formatted digits must match exact decimal division at a
//! caller-chosen precision. The [`Decimal`] type here carries a `BigInt`
//! mantissa and a power-of-ten scale, and both of its operations truncate
//! toward zero.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use num_bigint::{BigInt, Sign};
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::functions::{Context, math};

/// Fractional digits carried through the intermediate division.
const DIV_SCALE: u32 = 25;

/// Default fractional digits in the formatted percentage.
const DEFAULT_PRECISION: u32 = 7;

/// The `percent()` and `pc()` handler.
///
/// Divides the first argument by the second and formats the quotient as a
/// percentage. The optional third argument sets the number of fractional
/// digits (default 7); trailing zeros and a trailing decimal point are
/// stripped. With fewer than two arguments, or on division by zero, the
/// result is `"0%"`.
pub fn handler(input: &str, context: &Context) -> String {
    let args = parse_math_args(input, context);
    if args.len() < 2 {
        return "0%".to_string();
    }

    let precision = args
        .get(2)
        .and_then(|arg| arg.parse::<f64>().ok())
        .map(|value| value.max(0.0) as u32)
        .unwrap_or(DEFAULT_PRECISION);

    match percentage(&args[0], &args[1], precision) {
        Ok(formatted) => formatted,
        Err(error) => {
            debug!(%error, input, "percentage degraded to zero");
            "0%".to_string()
        }
    }
}

/// Split comma arguments, trimming and dropping empties; any argument
/// that is not a plain signed decimal number is evaluated as a math
/// expression first.
fn parse_math_args(input: &str, context: &Context) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(|arg| {
            if numeric_pattern().is_match(arg) {
                arg.to_string()
            } else {
                math::handler(arg, context)
            }
        })
        .collect()
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?[\.0-9]+$").expect("valid pattern"))
}

fn percentage(numerator: &str, denominator: &str, precision: u32) -> Result<String> {
    let numerator = Decimal::parse(numerator)?;
    let denominator = Decimal::parse(denominator)?;

    let quotient = numerator.div(&denominator, DIV_SCALE)?;
    let scaled = quotient.mul(&Decimal::from_int(100), precision);

    let formatted = scaled.to_string();
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    Ok(format!("{trimmed}%"))
}

/// A fixed-point decimal: `mantissa / 10^scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    fn from_int(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }

    /// Parse a plain signed decimal literal.
    pub(crate) fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (digits, ""),
        };

        let all_digits = int_part.bytes().all(|b| b.is_ascii_digit())
            && frac_part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits || (int_part.is_empty() && frac_part.is_empty()) {
            return Err(Error::invalid_decimal(literal));
        }

        let combined = format!("{int_part}{frac_part}");
        let magnitude =
            BigInt::from_str(&combined).map_err(|_| Error::invalid_decimal(literal))?;
        Ok(Self::new(magnitude * sign, frac_part.len() as u32))
    }

    fn is_zero(&self) -> bool {
        self.mantissa.sign() == Sign::NoSign
    }

    /// Divide to `scale` fractional digits, truncating toward zero.
    pub(crate) fn div(&self, divisor: &Self, scale: u32) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let numerator = &self.mantissa * pow10(divisor.scale + scale);
        let denominator = &divisor.mantissa * pow10(self.scale);
        Ok(Self::new(numerator / denominator, scale))
    }

    /// Multiply, truncating the result to `scale` fractional digits.
    pub(crate) fn mul(&self, other: &Self, scale: u32) -> Self {
        let mantissa = &self.mantissa * &other.mantissa;
        let full_scale = self.scale + other.scale;
        if full_scale > scale {
            Self::new(mantissa / pow10(full_scale - scale), scale)
        } else if full_scale < scale {
            Self::new(mantissa * pow10(scale - full_scale), scale)
        } else {
            Self::new(mantissa, scale)
        }
    }
}

impl fmt::Display for Decimal {
    /// Fixed-point rendering with exactly `scale` fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;

        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);

        if self.mantissa.sign() == Sign::Minus {
            write!(f, "-")?;
        }
        if frac_part.is_empty() {
            write!(f, "{int_part}")
        } else {
            write!(f, "{int_part}.{frac_part}")
        }
    }
}

fn pow10(exp: u32) -> BigInt {
    let mut value = BigInt::from(1);
    let ten = BigInt::from(10);
    for _ in 0..exp {
        value *= &ten;
    }
    value
}
