//! Currency amounts and their customer-facing rendering.
//!
//! Amounts arrive from two places: `numeric` columns read through sqlx, and
//! loosely typed JSON bodies. Both end up as [`Amount`], which remembers
//! whether a usable decimal was supplied at all. Rendering never fails: a
//! malformed amount prints as zero so bad balance data cannot block a
//! reminder.

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Rendering used whenever an amount is missing or unusable.
pub const ZERO_AMOUNT: &str = "$0.00";

/// Largest accepted decimal exponent, in either direction. Inputs such as
/// `"1e999999999"` would otherwise expand to billions of digits.
const MAX_EXPONENT: i64 = 400;

/// A currency amount that may have failed numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Amount(Option<BigDecimal>);

impl Amount {
    pub fn new(value: BigDecimal) -> Self {
        Self(Some(value))
    }

    /// An amount whose source value could not be read as a number.
    pub fn malformed() -> Self {
        Self(None)
    }

    /// Builds an amount from a float using its shortest decimal representation.
    /// Non-finite values are malformed.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::malformed();
        }
        Self(parse_decimal(&value.to_string()))
    }

    /// Lenient coercion from arbitrary JSON: numbers and numeric strings parse,
    /// everything else is malformed.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self(parse_decimal(&n.to_string())),
            Value::String(s) => Self(parse_decimal(s)),
            _ => Self::malformed(),
        }
    }

    pub fn value(&self) -> Option<&BigDecimal> {
        self.0.as_ref()
    }
}

impl From<BigDecimal> for Amount {
    fn from(value: BigDecimal) -> Self {
        Self::new(value)
    }
}

impl From<Option<BigDecimal>> for Amount {
    fn from(value: Option<BigDecimal>) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Amount::from_json(&raw))
    }
}

fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    // BigDecimal accepts only digits, sign, point and exponent, so "NaN" and
    // "inf" fail here.
    if trimmed.is_empty() {
        return None;
    }
    let value = BigDecimal::from_str(trimmed).ok()?;
    let (_, scale) = value.as_bigint_and_exponent();
    (-MAX_EXPONENT..=MAX_EXPONENT)
        .contains(&scale)
        .then_some(value)
}

/// Splits a value rounded to cents into its sign, integer digits and the two
/// fractional digits.
fn to_cents_parts(value: &BigDecimal) -> (bool, String, String) {
    let (cents, _) = value
        .with_scale_round(2, RoundingMode::HalfEven)
        .as_bigint_and_exponent();
    let digits = cents.to_string();
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest.to_string()),
        None => (false, digits),
    };
    let padded = format!("{:0>3}", digits);
    let (int_part, frac_part) = padded.split_at(padded.len() - 2);
    (negative, int_part.to_string(), frac_part.to_string())
}

fn group_thousands(int_part: &str) -> String {
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as `$1,234.50`.
///
/// Missing or malformed input yields [`ZERO_AMOUNT`]. Negative values keep
/// their sign after the symbol (`$-1,234.50`).
pub fn format_money(amount: &Amount) -> String {
    match amount.value() {
        Some(value) => format_decimal_money(value),
        None => ZERO_AMOUNT.to_string(),
    }
}

pub fn format_decimal_money(value: &BigDecimal) -> String {
    let (negative, int_part, frac_part) = to_cents_parts(value);
    format!(
        "${}{}.{}",
        if negative { "-" } else { "" },
        group_thousands(&int_part),
        frac_part
    )
}

/// Two-decimal rendering without symbol or grouping (`1234.50`).
pub fn format_plain_amount(amount: &Amount) -> String {
    let Some(value) = amount.value() else {
        return "0.00".to_string();
    };
    let (negative, int_part, frac_part) = to_cents_parts(value);
    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        int_part,
        frac_part
    )
}
