//! # Lenient Numbers
//!
//! Amounts, rates and terms arrive as user-entered text. They are coerced the
//! way a browser form would coerce them: the longest numeric prefix wins, and
//! anything else becomes NaN. NaN is stored as-is; validation belongs to the
//! view layer.
//!
//! JSON has no literal for non-finite numbers. NaN is persisted as `null`;
//! infinities (a zero-month term, `"Infinity"` typed into a form) are
//! persisted as the strings `"Infinity"` and `"-Infinity"`. Both read back to
//! the value that was written, so a reloaded collection re-serializes to the
//! same bytes.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const POS_INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// A best-effort number that may carry NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Numeric(f64);

impl Numeric {
    pub const NAN: Numeric = Numeric(f64::NAN);
    pub const ZERO: Numeric = Numeric(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Parses the longest decimal prefix of `input` (leading whitespace
    /// skipped). Returns NaN when no digits are found.
    pub fn parse_float(input: &str) -> Self {
        let s = input.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        if s[end..].starts_with("Infinity") {
            let negative = bytes.first() == Some(&b'-');
            return Self(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }

        let int_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end - int_start;

        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            digits += frac_end - frac_start;
            if digits > 0 {
                end = frac_end;
            }
        }

        if digits == 0 {
            return Self::NAN;
        }

        // Exponent only counts when it carries at least one digit
        if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
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

        s[..end].parse::<f64>().map(Self).unwrap_or(Self::NAN)
    }

    /// Parses the longest base-10 integer prefix of `input`.
    /// Returns NaN when no digits are found.
    pub fn parse_int(input: &str) -> Self {
        let s = input.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return Self::NAN;
        }

        s[..end].parse::<f64>().map(Self).unwrap_or(Self::NAN)
    }

    /// Rounds to the nearest integer, halves toward positive infinity.
    pub fn round_half_up(self) -> Self {
        Self((self.0 + 0.5).floor())
    }

    /// Clamps negative values to zero; NaN passes through.
    pub fn clamp_non_negative(self) -> Self {
        if self.0 < 0.0 {
            Self::ZERO
        } else {
            self
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl Add for Numeric {
    type Output = Numeric;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Numeric {
    type Output = Numeric;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Numeric {
    type Output = Numeric;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div for Numeric {
    type Output = Numeric;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl std::iter::Sum for Numeric {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(*self))
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else if self.0 == f64::INFINITY {
            serializer.serialize_str(POS_INFINITY)
        } else if self.0 == f64::NEG_INFINITY {
            serializer.serialize_str(NEG_INFINITY)
        } else {
            serializer.serialize_none()
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, null, or an infinity marker")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Numeric(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Numeric(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Numeric(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            POS_INFINITY => Ok(Numeric(f64::INFINITY)),
            NEG_INFINITY => Ok(Numeric(f64::NEG_INFINITY)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Numeric::NAN)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Numeric::NAN)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

/// Formats an amount with grouped thousands and at most three fractional
/// digits (`50000` → `50,000`, `1234.5` → `1,234.5`).
pub fn format_amount(amount: Numeric) -> String {
    let value = amount.value();
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
    }

    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
