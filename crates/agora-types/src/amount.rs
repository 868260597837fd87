//! Fixed-point amounts.
//!
//! Every monetary and voting-power value is a `u128` count of base units.
//! Ratios (quorum, shares of supply) use the same `10^18` scale as token
//! amounts, so `0.2%` is `2 * 10^15`.

use crate::error::TypesError;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Token amount in base units.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Fixed-point scale (10^18).
pub const SCALE: Amount = 1_000_000_000_000_000_000;

/// Number of decimals represented by [`SCALE`].
pub const DECIMALS: u32 = 18;

/// Computes `a * b / denominator` without intermediate overflow.
pub fn mul_div(a: Amount, b: Amount, denominator: Amount) -> Result<Amount, TypesError> {
    if denominator == 0 {
        return Err(TypesError::DivisionByZero);
    }
    let product = BigUint::from(a) * BigUint::from(b);
    (product / BigUint::from(denominator))
        .to_u128()
        .ok_or(TypesError::AmountOverflow)
}

/// Share of `whole` represented by `part`, at [`SCALE`].
///
/// Saturates at `Amount::MAX`. An empty `whole` yields zero for an empty
/// `part` and `Amount::MAX` otherwise.
pub fn ratio(part: Amount, whole: Amount) -> Amount {
    if whole == 0 {
        return if part == 0 { 0 } else { Amount::MAX };
    }
    let scaled = BigUint::from(part) * BigUint::from(SCALE) / BigUint::from(whole);
    scaled.to_u128().unwrap_or(Amount::MAX)
}

/// Parse a decimal string such as `"1.5"` into base units with `decimals` places.
pub fn parse_units(s: &str, decimals: u32) -> Result<Amount, TypesError> {
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(TypesError::InvalidAmountString(s.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(TypesError::InvalidAmountString(format!(
            "{} has more than {} decimals",
            s, decimals
        )));
    }

    let unit = 10u128
        .checked_pow(decimals)
        .ok_or(TypesError::AmountOverflow)?;
    let whole: Amount = if whole.is_empty() { 0 } else { whole.parse()? };
    let frac_value: Amount = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse()?
    };

    whole
        .checked_mul(unit)
        .and_then(|w| w.checked_add(frac_value))
        .ok_or(TypesError::AmountOverflow)
}

/// Render base units as a decimal string with `decimals` places, trimming
/// trailing zeros.
pub fn format_units(amount: Amount, decimals: u32) -> String {
    let unit = 10u128.pow(decimals);
    let whole = amount / unit;
    let frac = amount % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Serde adapter writing amounts as decimal strings.
///
/// TOML integers are 64-bit, so `u128` amounts travel as strings. Plain
/// integers are still accepted on input.
#[cfg(feature = "serde")]
pub mod decimal_string {
    use super::Amount;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(u64),
    }

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.trim().parse().map_err(D::Error::custom),
            Repr::Int(n) => Ok(Amount::from(n)),
        }
    }
}
