use crate::{DecodeError, DecodeResult};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Fixed-point number `mantissa / 10^scale` of arbitrary precision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaledDecimal {
    mantissa: BigInt,
    scale: u32,
}

impl ScaledDecimal {
    /// Creates a new `ScaledDecimal`.
    ///
    /// # Arguments
    ///
    /// * `mantissa` - The unscaled integer value.
    /// * `scale` - Number of decimal places.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// The unscaled integer value.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of decimal places.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Reads a `{ "mantissa": .., "scale": .. }` object.
    ///
    /// The mantissa may be a JSON integer or a decimal string, since 128-bit
    /// integers are decoded as strings.
    pub fn from_value(value: &Value) -> DecodeResult<Self> {
        let mantissa = match value.get("mantissa") {
            Some(Value::Number(n)) => BigInt::from_str(&n.to_string()).ok(),
            Some(Value::String(s)) => BigInt::from_str(s).ok(),
            _ => None,
        }
        .ok_or_else(|| DecodeError::missing_field("mantissa"))?;
        let scale = value
            .get("scale")
            .and_then(Value::as_u64)
            .and_then(|scale| u32::try_from(scale).ok())
            .ok_or_else(|| DecodeError::missing_field("scale"))?;
        Ok(Self::new(mantissa, scale))
    }
}

/// Plain decimal notation without trailing fractional zeros.
impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisor = BigInt::from(10u8).pow(self.scale);
        let (whole, remainder) = (
            &self.mantissa.abs() / &divisor,
            &self.mantissa.abs() % &divisor,
        );
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        if remainder.is_zero() {
            return write!(f, "{sign}{whole}");
        }
        let fraction = format!("{:0>width$}", remainder.to_string(), width = self.scale as usize);
        write!(f, "{sign}{whole}.{}", fraction.trim_end_matches('0'))
    }
}
