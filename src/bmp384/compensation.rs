//! Floating-point compensation of raw BMP384 samples.
//!
//! Temperature is compensated first; its linearized value is an input to the
//! pressure polynomial. Both must come from the same [`RawSample`].

use crate::bmp384::{calibration::TrimCoefficients, registers::DATA_LEN};

/// One burst read of the uncompensated pressure and temperature counts.
///
/// Both fields are captured in a single transaction so they always belong to
/// the same conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 24-bit uncompensated pressure from DATA_0..DATA_2.
    pub pressure: u32,
    /// 24-bit uncompensated temperature from DATA_3..DATA_5.
    pub temperature: u32,
}

impl RawSample {
    /// Largest value a 24-bit count can take.
    pub const MAX_COUNT: u32 = (1 << 24) - 1;

    /// Decodes the 6-byte burst starting at register 0x04 (both fields little-endian).
    pub fn from_burst(raw: &[u8; DATA_LEN]) -> Self {
        Self {
            pressure: u32::from_le_bytes([raw[0], raw[1], raw[2], 0]),
            temperature: u32::from_le_bytes([raw[3], raw[4], raw[5], 0]),
        }
    }

    /// An all-zero sample means the bus returned nothing useful.
    pub fn is_zero(&self) -> bool {
        self.pressure == 0 && self.temperature == 0
    }
}

/// Linearized temperature, in approximately °C.
///
/// Only produced by [`TrimCoefficients::compensate_temperature`], so pressure
/// compensation cannot be fed an arbitrary float by mistake.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearizedTemperature(f64);

impl LinearizedTemperature {
    pub fn celsius(self) -> f64 {
        self.0
    }
}

impl TrimCoefficients {
    /// Converts raw temperature counts into linearized temperature.
    pub fn compensate_temperature(&self, uncomp_temp: u32) -> LinearizedTemperature {
        let partial_data1 = f64::from(uncomp_temp) - self.par_t1;
        let partial_data2 = partial_data1 * self.par_t2;
        LinearizedTemperature(partial_data2 + (partial_data1 * partial_data1) * self.par_t3)
    }

    /// Converts raw pressure counts into Pascals.
    ///
    /// `t_lin` must come from the same sample as `uncomp_press`. The result is
    /// not range-checked.
    pub fn compensate_pressure(&self, uncomp_press: u32, t_lin: LinearizedTemperature) -> f64 {
        let t = t_lin.0;
        let t2 = t * t;
        let t3 = t2 * t;

        let quad1 = self.par_p5 + self.par_p6 * t + self.par_p7 * t2 + self.par_p8 * t3;

        let up = f64::from(uncomp_press);
        let up2 = up * up;
        let up3 = up2 * up;

        let quad2 = up * (self.par_p1 + self.par_p2 * t + self.par_p3 * t2 + self.par_p4 * t3)
            + up2 * (self.par_p9 + self.par_p10 * t)
            + up3 * self.par_p11;

        quad1 + quad2
    }

    /// Temperature then pressure for one sample.
    pub fn compensate(&self, sample: &RawSample) -> (LinearizedTemperature, f64) {
        let t_lin = self.compensate_temperature(sample.temperature);
        (t_lin, self.compensate_pressure(sample.pressure, t_lin))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bmp384::calibration::tests::NVM;

    /// pressure = 7_000_000, temperature = 1_379_872
    pub(crate) const SAMPLE: [u8; DATA_LEN] = [0xC0, 0xCF, 0x6A, 0x20, 0x0E, 0x15];

    fn trim() -> TrimCoefficients {
        TrimCoefficients::from_nvm(&NVM)
    }

    #[test]
    fn burst_is_little_endian() {
        let sample = RawSample::from_burst(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(sample.pressure, 0xCCBBAA);
        assert_eq!(sample.temperature, 0xFFEEDD);
        assert_eq!(RawSample::from_burst(&[0xFF; DATA_LEN]).pressure, RawSample::MAX_COUNT);
    }

    #[test]
    fn zero_sample() {
        assert!(RawSample::from_burst(&[0; DATA_LEN]).is_zero());
        assert!(!RawSample::from_burst(&[0, 0, 0, 1, 0, 0]).is_zero());
    }

    #[test]
    fn known_sample() {
        let sample = RawSample::from_burst(&SAMPLE);
        assert_eq!(sample.pressure, 7_000_000);
        assert_eq!(sample.temperature, 1_379_872);

        let (t_lin, pressure) = trim().compensate(&sample);
        assert!((t_lin.celsius() - 24.554_093_305_958).abs() < 1e-6);
        assert!((pressure - 101_518.291_748_168).abs() < 1e-3);
    }

    #[test]
    fn temperature_is_monotonic_in_counts() {
        let trim = trim();
        assert!(trim.par_t2 > 0.0);

        let mut previous = trim.compensate_temperature(0);
        for raw in (65_536..=RawSample::MAX_COUNT).step_by(65_536) {
            let current = trim.compensate_temperature(raw);
            assert!(current > previous, "not increasing at {raw}");
            previous = current;
        }
    }

    #[test]
    fn temperature_at_t1_is_zero() {
        let trim = TrimCoefficients {
            par_t1: 1000.0,
            par_t2: 1e-5,
            par_t3: 1e-14,
            ..TrimCoefficients::default()
        };
        assert_eq!(trim.compensate_temperature(1000).celsius(), 0.0);
    }

    #[test]
    fn zero_counts_at_zero_temperature_yield_p5() {
        let trim = trim();
        let t_lin = LinearizedTemperature(0.0);
        assert_eq!(trim.compensate_pressure(0, t_lin), trim.par_p5);
        assert_eq!(trim.compensate_pressure(0, t_lin), 24158.0 / 8.0);
    }

    #[test]
    fn full_scale_pressure_is_not_clamped() {
        let trim = trim();
        let t_lin = trim.compensate_temperature(1_379_872);
        assert!(trim.compensate_pressure(RawSample::MAX_COUNT, t_lin) > 200_000.0);
    }
}
