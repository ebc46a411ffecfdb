/// BMP384 register map (Bosch Sensortec BMP384 datasheet, BST-BMP384-DS003).
///
/// Only the registers this driver touches are listed.
///
/// All addresses are 8-bit (7-bit I²C slave address + R/W bit handled by HAL).
/// The register pointer auto-increments, so multi-byte fields are read in one
/// burst starting at the lowest address.
///
/// Key groups:
/// - **Measurement results** - 0x04–0x09 (6 bytes): pressure (24-bit LE) + temperature (24-bit LE)
/// - **Control registers** - 0x1B (power), 0x1C (oversampling), 0x1D (data rate), 0x1F (IIR)
/// - **Status** - 0x03 (command ready / data ready bits)
/// - **Command & ID** - 0x7E (soft reset), 0x00 (chip ID)
/// - **Calibration** - 0x31–0x45 (21 bytes, read-only, factory trimmed)
///
/// Usage example:
/// ```rust,ignore
/// let reg_addr = Bmp384Register::Osr as u8;
/// i2c.write(BMP384_PRIMARY_ADDR, &[reg_addr, value])?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bmp384Register {
    // Chip identification number
    // Must be 0x50 after start up
    ChipId = 0x00,
    // bit 4 - cmd ready, bit 5 - pressure ready, bit 6 - temperature ready
    Status = 0x03,
    // Pressure XLSB, first byte of the 6-byte burst
    Data0 = 0x04,
    // Temperature XLSB
    Data3 = 0x07,
    PwrCtrl = 0x1B,
    Osr = 0x1C,
    Odr = 0x1D,
    Config = 0x1F,
    // Calibration values start address
    CalibStart = 0x31,
    // If 0xB6 is written to the register,
    // the device is reset using the complete power-on-reset procedure
    Cmd = 0x7E,
}

pub const BMP384_RESET_CMD: u8 = 0xB6;
pub const BMP384_CHIP_ID: u8 = 0x50;

/// 7-bit address with SDO pulled high.
pub const BMP384_PRIMARY_ADDR: u8 = 0x77;
/// 7-bit address with SDO tied to GND.
pub const BMP384_FALLBACK_ADDR: u8 = 0x76;

/// Calibration NVM spans 0x31..=0x45.
pub const CALIB_LEN: usize = 0x45 - 0x31 + 1;
/// Pressure and temperature, three bytes each.
pub const DATA_LEN: usize = 6;
