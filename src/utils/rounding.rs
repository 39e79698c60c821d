//! Rounding rules shared by every rendered figure.
//!
//! Totals are kept at full precision internally and rounded only when they
//! are shown, always through [`round2`], so recomputing a summary never makes
//! a displayed value drift.

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round up to the next multiple of `step` (a value already on a multiple is kept).
pub fn ceil_to_step(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}
