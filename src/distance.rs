//! RSSI to distance estimation
//!
//! Log-distance path-loss model with a fixed exponent of 2.0:
//! `meters = 10 ^ ((reference_power_dbm - rssi) / 20)`. The result is an
//! order-of-magnitude estimate, not a calibrated measurement; callers should
//! treat it accordingly.

/// Assumed transmit power at 1 m, in dBm
pub const DEFAULT_REFERENCE_POWER_DBM: i32 = -59;

/// Path-loss exponent for free-space-like propagation
const PATH_LOSS_EXPONENT: f64 = 2.0;

/// Estimate distance in meters from an RSSI sample
///
/// Pure and total: always returns a positive value, which may be arbitrarily
/// large for very weak signals or well below 1 m for very strong ones.
#[must_use]
pub fn estimate(rssi: i32, reference_power_dbm: i32) -> f64 {
    let ratio = f64::from(reference_power_dbm - rssi) / (10.0 * PATH_LOSS_EXPONENT);
    10f64.powf(ratio)
}

/// Estimate distance using the default reference power
#[must_use]
pub fn estimate_default(rssi: i32) -> f64 {
    estimate(rssi, DEFAULT_REFERENCE_POWER_DBM)
}
