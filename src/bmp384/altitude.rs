//! Barometric altitude.

/// Standard sea-level pressure, the default reference.
pub const SEA_LEVEL_PA: i32 = 101_325;
/// Lowest accepted reference pressure.
pub const REFERENCE_PA_MIN: i32 = 80_000;
/// Highest accepted reference pressure.
pub const REFERENCE_PA_MAX: i32 = 105_000;

/// Clamps a user-supplied reference pressure to the accepted range.
pub fn clamp_reference_pressure(pa: i32) -> i32 {
    pa.clamp(REFERENCE_PA_MIN, REFERENCE_PA_MAX)
}

/// International barometric formula: altitude in meters of `pressure_pa`
/// relative to the level where the pressure is `reference_pa`.
///
/// Returns 0 for a non-positive (or NaN) pressure instead of NaN.
pub fn pressure_to_altitude(pressure_pa: f64, reference_pa: f64) -> f64 {
    if pressure_pa.is_nan() || pressure_pa <= 0.0 {
        return 0.0;
    }
    44330.0 * (1.0 - libm::pow(pressure_pa / reference_pa, 0.1903))
}
