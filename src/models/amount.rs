//! Amount type for expense and budget values
//!
//! Amounts arrive from the tracker server, CSV files and user input, and may
//! be malformed. An [`Amount`] is always finite and non-negative: anything
//! that cannot be read as such becomes zero. Accumulation stays in full `f64`
//! precision; rounding to cents happens only when formatting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::{Add, AddAssign};

/// A non-negative monetary amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, coercing negative or non-finite values to zero
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// A zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// The raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Best-effort parse of free text
    ///
    /// Reads the longest numeric prefix after optional whitespace, an
    /// optional sign and an optional `$`, so `"12.5abc"` is 12.5 and `"abc"`
    /// is zero. Never fails.
    pub fn parse_lenient(s: &str) -> Self {
        Self::new(leading_number(s).unwrap_or(0.0))
    }

    /// Coerce an arbitrary JSON value
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self::new(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => Self::parse_lenient(s),
            _ => Self::zero(),
        }
    }

    /// Format with two decimals and no symbol (e.g. "1200.00")
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", self.0)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{:.2}", symbol, self.0)
    }
}

/// Longest prefix of `s` that reads as a decimal number
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let bytes = rest.as_bytes();

    let mut end = 0;
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    rest[..end].parse::<f64>().ok().map(|v| sign * v)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_coerces_invalid() {
        assert_eq!(Amount::new(12.5).value(), 12.5);
        assert_eq!(Amount::new(-3.0).value(), 0.0);
        assert_eq!(Amount::new(f64::NAN).value(), 0.0);
        assert_eq!(Amount::new(f64::INFINITY).value(), 0.0);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Amount::parse_lenient("10.50").value(), 10.5);
        assert_eq!(Amount::parse_lenient("  42").value(), 42.0);
        assert_eq!(Amount::parse_lenient("$7.25").value(), 7.25);
        assert_eq!(Amount::parse_lenient("12abc").value(), 12.0);
        assert_eq!(Amount::parse_lenient(".5").value(), 0.5);
        assert_eq!(Amount::parse_lenient("1e3").value(), 1000.0);
        assert_eq!(Amount::parse_lenient("3e").value(), 3.0);
        assert_eq!(Amount::parse_lenient("abc").value(), 0.0);
        assert_eq!(Amount::parse_lenient("").value(), 0.0);
        assert_eq!(Amount::parse_lenient(".").value(), 0.0);
        assert_eq!(Amount::parse_lenient("-20").value(), 0.0);
    }

    #[test]
    fn test_deserialize_any_json() {
        let parsed: Vec<Amount> =
            serde_json::from_str(r#"[12.5, "30", "abc", null, true, {"x": 1}, [1]]"#).unwrap();
        let values: Vec<f64> = parsed.iter().map(Amount::value).collect();
        assert_eq!(values, vec![12.5, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(Amount::new(1200.0).to_fixed(), "1200.00");
        assert_eq!(Amount::new(1.234).to_string(), "1.23");
        assert_eq!(Amount::new(9.5).format_with_symbol("$"), "$9.50");
    }

    #[test]
    fn test_sum() {
        let total: Amount = [1.25, 2.5, 3.0].into_iter().map(Amount::new).sum();
        assert_eq!(total.value(), 6.75);
    }
}
