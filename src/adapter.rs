//! Adapter layer: converts between the playground's f64 world and the
//! engine's Decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;

/// Convert f64 to Decimal. Non-finite values coerce to zero.
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    d.to_f64().unwrap_or(0.0)
}

/// Clamp a percentage into the 0-100 band.
pub fn clamp_pct(p: Decimal) -> Decimal {
    p.clamp(dec!(0), dec!(100))
}

/// Coerce a rate or weight to a non-negative finite Decimal.
pub fn non_negative(v: f64) -> Decimal {
    to_decimal(v).max(Decimal::ZERO)
}
