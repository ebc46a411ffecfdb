//! BMP384 calibration coefficients.
//!
//! This module loads the factory-trimmed NVM block from the BMP384 (registers
//! 0x31–0x45) and converts it into the floating-point `par_*` coefficients used
//! by the compensation formulas (datasheet section 8.4 "Calibration coefficient").
//!
//! The block is decoded blindly: a missing or misaddressed device yields
//! meaningless coefficients, and noticing that is up to the chip-ID probe.

use embedded_hal::i2c::{Error as _, I2c};

use crate::bmp384::{
    Bmp384, Bmp384Error,
    registers::{Bmp384Register, CALIB_LEN},
};

/// Raw calibration NVM as read from 0x31..=0x45.
pub type RawCalibrationBlock = [u8; CALIB_LEN];

/// Factory-trimmed calibration coefficients, already scaled to floating point.
///
/// Derived once per session from the [`RawCalibrationBlock`]; the driver never
/// changes them until the next initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrimCoefficients {
    /// NVM_PAR_T1 / 2^8
    pub par_t1: f64,
    /// NVM_PAR_T2 / 2^30
    pub par_t2: f64,
    /// NVM_PAR_T3 / 2^48
    pub par_t3: f64,
    /// (NVM_PAR_P1 - 2^14) / 2^20
    pub par_p1: f64,
    /// (NVM_PAR_P2 - 2^14) / 2^29
    pub par_p2: f64,
    pub par_p3: f64,
    pub par_p4: f64,
    pub par_p5: f64,
    pub par_p6: f64,
    pub par_p7: f64,
    pub par_p8: f64,
    pub par_p9: f64,
    pub par_p10: f64,
    pub par_p11: f64,
}

/// P1 and P2 are stored with a 2^14 offset.
const NVM_P_OFFSET: f64 = (1u32 << 14) as f64;

/// `raw / 2^exp`, exact for every exponent the NVM layout uses.
fn scale(raw: f64, exp: i32) -> f64 {
    libm::ldexp(raw, -exp)
}

impl TrimCoefficients {
    /// Decodes the 21-byte NVM block.
    ///
    /// | offset | width | coefficient |
    /// |--------|-------|-------------|
    /// | 0–1    | u16   | T1          |
    /// | 2–3    | u16   | T2          |
    /// | 4      | i8    | T3          |
    /// | 5–6    | i16   | P1          |
    /// | 7–8    | i16   | P2          |
    /// | 9      | i8    | P3          |
    /// | 10     | i8    | P4          |
    /// | 11–12  | u16   | P5          |
    /// | 13–14  | u16   | P6          |
    /// | 15     | i8    | P7          |
    /// | 16     | i8    | P8          |
    /// | 17–18  | i16   | P9          |
    /// | 19     | i8    | P10         |
    /// | 20     | i8    | P11         |
    pub fn from_nvm(b: &RawCalibrationBlock) -> Self {
        let nvm_t1 = u16::from_le_bytes([b[0], b[1]]);
        let nvm_t2 = u16::from_le_bytes([b[2], b[3]]);
        let nvm_t3 = i8::from_le_bytes([b[4]]);
        let nvm_p1 = i16::from_le_bytes([b[5], b[6]]);
        let nvm_p2 = i16::from_le_bytes([b[7], b[8]]);
        let nvm_p3 = i8::from_le_bytes([b[9]]);
        let nvm_p4 = i8::from_le_bytes([b[10]]);
        let nvm_p5 = u16::from_le_bytes([b[11], b[12]]);
        let nvm_p6 = u16::from_le_bytes([b[13], b[14]]);
        let nvm_p7 = i8::from_le_bytes([b[15]]);
        let nvm_p8 = i8::from_le_bytes([b[16]]);
        let nvm_p9 = i16::from_le_bytes([b[17], b[18]]);
        let nvm_p10 = i8::from_le_bytes([b[19]]);
        let nvm_p11 = i8::from_le_bytes([b[20]]);

        Self {
            par_t1: scale(f64::from(nvm_t1), 8),
            par_t2: scale(f64::from(nvm_t2), 30),
            par_t3: scale(f64::from(nvm_t3), 48),
            par_p1: scale(f64::from(nvm_p1) - NVM_P_OFFSET, 20),
            par_p2: scale(f64::from(nvm_p2) - NVM_P_OFFSET, 29),
            par_p3: scale(f64::from(nvm_p3), 32),
            par_p4: scale(f64::from(nvm_p4), 37),
            par_p5: scale(f64::from(nvm_p5), 3),
            par_p6: scale(f64::from(nvm_p6), 6),
            par_p7: scale(f64::from(nvm_p7), 8),
            par_p8: scale(f64::from(nvm_p8), 15),
            par_p9: scale(f64::from(nvm_p9), 48),
            par_p10: scale(f64::from(nvm_p10), 48),
            par_p11: scale(f64::from(nvm_p11), 65),
        }
    }

    /// Reads the 21-byte calibration block starting at 0x31 and decodes it.
    ///
    /// Must be called after soft reset and address probing, so `device.haddr`
    /// points at the sensor.
    ///
    /// # Errors
    /// - `ReadCalibrationRegFailed` if the I²C read fails (NACK, timeout, etc.)
    pub fn read_calib_data<I2C: I2c, D>(
        device: &mut Bmp384<I2C, D>,
    ) -> Result<Self, Bmp384Error> {
        let mut buffer: RawCalibrationBlock = [0u8; CALIB_LEN];
        device
            .i2c
            .write_read(
                device.haddr,
                &[Bmp384Register::CalibStart as u8],
                &mut buffer,
            )
            .map_err(|e| {
                error!("Failed to read calibration data: {:?}", e.kind());
                Bmp384Error::ReadCalibrationRegFailed
            })?;

        let trim = Self::from_nvm(&buffer);
        debug!("Calibration coefficients: {:?}", trim);
        Ok(trim)
    }
}
