use crate::bmp384::registers::{BMP384_RESET_CMD, Bmp384Register};

/// Oversampling setting for pressure (osr_p[2:0] in OSR 0x1C, bits 2:0).
///
/// Controls pressure resolution, RMS noise, and conversion time.
/// Higher oversampling improves resolution/noise at cost of power/time.
///
/// | Variant | osr_p | Resolution | RMS Noise (typ) | Typical use                  |
/// |---------|-------|------------|-----------------|------------------------------|
/// | Px1     | 000   | 16 bit     | ~8.4 Pa         | Lowest power                 |
/// | Px2     | 001   | 17 bit     | ~4.2 Pa         |                              |
/// | Px4     | 010   | 18 bit     | ~2.1 Pa         | Standard                     |
/// | Px8     | 011   | 19 bit     | ~1.1 Pa         | High resolution              |
/// | Px16    | 100   | 20 bit     | ~0.5 Pa         | Ultra-high (indoor nav)      |
/// | Px32    | 101   | 21 bit     | ~0.3 Pa         | Highest resolution           |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PressOversampling {
    Px1 = 0x00,
    Px2 = 0x01,
    Px4 = 0x02,
    Px8 = 0x03,
    Px16 = 0x04,
    Px32 = 0x05,
}

/// Oversampling setting for temperature (osr_t[2:0] in OSR 0x1C, bits 5:3).
///
/// Temperature only feeds pressure compensation, so it rarely needs more than ×2;
/// ×8 keeps the linearized temperature smooth when pressure runs at ×16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TempOversampling {
    Tx1 = 0x00,
    Tx2 = 0x08,
    Tx4 = 0x10,
    Tx8 = 0x18,
    Tx16 = 0x20,
    Tx32 = 0x28,
}

/// Power mode (mode[1:0] in PWR_CTRL 0x1B, bits 5:4).
///
/// | Variant | Value | Behavior                                                          |
/// |---------|-------|-------------------------------------------------------------------|
/// | Sleep   | 0x00  | No measurements; registers readable                               |
/// | Forced  | 0x10  | One measurement, then back to sleep; host must re-trigger         |
/// | Normal  | 0x30  | Continuous measurements at the configured output data rate        |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PowerMode {
    Sleep = 0x00,
    Forced = 0x10,
    Normal = 0x30,
}

/// IIR filter coefficient (iir_filter[2:0] in CONFIG 0x1F, bits 3:1).
///
/// Smooths short-term pressure fluctuations (e.g. wind, door slams).
/// Higher coefficient → stronger smoothing, slower response to real changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum IIRFilter {
    Off = 0x00,
    Coef1 = 0x02,
    Coef3 = 0x04,
    Coef7 = 0x06,
    Coef15 = 0x08,
    Coef31 = 0x0A,
    Coef63 = 0x0C,
    Coef127 = 0x0E,
}

/// Output data rate in Normal mode (odr_sel in ODR 0x1D), as a 200 Hz prescaler.
///
/// The rate must leave room for one full conversion at the selected
/// oversampling, otherwise the sensor flags a configuration error and refuses
/// Normal mode. Pressure ×16 with temperature ×8 needs roughly 50 ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputDataRate {
    Odr200 = 0x00,
    Odr100 = 0x01,
    Odr50 = 0x02,
    Odr25 = 0x03,
    Odr12p5 = 0x04,
    Odr6p25 = 0x05,
    Odr3p1 = 0x06,
    Odr1p5 = 0x07,
}

/// Bits 0 and 1 of PWR_CTRL.
const PRESS_EN: u8 = 0x01;
const TEMP_EN: u8 = 0x02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegValType {
    PowerCtrl,
    Oversampling,
    DataRate,
    Config,
    Reset,
}

/// Register settings written during initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bmp384Config {
    pub tovrs: TempOversampling,
    pub povrs: PressOversampling,
    pub pmode: PowerMode,
    pub press_en: bool,
    pub temp_en: bool,
    pub iir: IIRFilter,
    pub odr: OutputDataRate,
}

impl Bmp384Config {
    /// Order in which the settings reach the sensor.
    ///
    /// Oversampling, data rate and filter are set while the sensor still
    /// sleeps after reset; the power mode goes last so Normal mode starts with
    /// a consistent configuration.
    pub const WRITE_ORDER: [RegValType; 4] = [
        RegValType::Oversampling,
        RegValType::DataRate,
        RegValType::Config,
        RegValType::PowerCtrl,
    ];

    /// Generates a register address + value pair ready for I²C write.
    ///
    /// Returns a 2-byte array: `[register_address, value_to_write]`.
    ///
    /// # Supported register types
    /// - `RegValType::PowerCtrl`    → Writes to `0x1B` (mode + temp_en + press_en)
    /// - `RegValType::Oversampling` → Writes to `0x1C` (osr_t + osr_p)
    /// - `RegValType::DataRate`     → Writes to `0x1D` (odr_sel)
    /// - `RegValType::Config`       → Writes to `0x1F` (iir_filter)
    /// - `RegValType::Reset`        → Writes `0xB6` to `0x7E` (soft reset)
    pub fn make_reg_val(&self, reg_val_type: RegValType) -> [u8; 2] {
        match reg_val_type {
            RegValType::PowerCtrl => {
                let mut value = self.pmode as u8;
                if self.press_en {
                    value |= PRESS_EN;
                }
                if self.temp_en {
                    value |= TEMP_EN;
                }
                [Bmp384Register::PwrCtrl as u8, value]
            }
            RegValType::Oversampling => [
                Bmp384Register::Osr as u8,
                self.tovrs as u8 | self.povrs as u8,
            ],
            RegValType::DataRate => [Bmp384Register::Odr as u8, self.odr as u8],
            RegValType::Config => [Bmp384Register::Config as u8, self.iir as u8],
            RegValType::Reset => [Bmp384Register::Cmd as u8, BMP384_RESET_CMD],
        }
    }
}

impl Default for Bmp384Config {
    /// The fixed configuration used by the driver:
    /// - Temperature oversampling: ×8
    /// - Pressure oversampling: ×16
    /// - Power mode: Normal, both pressure and temperature enabled
    /// - IIR filter: coefficient 31
    /// - Output data rate: 12.5 Hz
    fn default() -> Self {
        Self {
            tovrs: TempOversampling::Tx8,
            povrs: PressOversampling::Px16,
            pmode: PowerMode::Normal,
            press_en: true,
            temp_en: true,
            iir: IIRFilter::Coef31,
            odr: OutputDataRate::Odr12p5,
        }
    }
}
