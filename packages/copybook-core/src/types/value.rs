//! Decoded field values.

use std::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};

/// Fixed-point decimal number: `unscaled * 10^-scale`.
///
/// The unscaled digits are arbitrary precision; a field may carry up to
/// 38 integer digits plus 18 fractional ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    /// Digits without the decimal point, signed
    pub unscaled: BigInt,
    /// Number of fractional digits
    pub scale: u32,
}

impl Decimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Lossy conversion to `f64`.
    pub fn to_f64(&self) -> f64 {
        let unscaled = self.unscaled.to_f64().unwrap_or(f64::NAN);
        unscaled / 10f64.powi(self.scale as i32)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled.sign() == Sign::Minus { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let digits = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(BigInt),
    Decimal(Decimal),
    Float(f64),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            // Integers wider than i64 go out as strings so no reader loses digits
            Value::Integer(n) => match n.to_i64() {
                Some(n) => serializer.serialize_i64(n),
                None => serializer.collect_str(n),
            },
            Value::Decimal(d) => d.serialize(serializer),
            Value::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }
}
