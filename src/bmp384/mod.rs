pub mod altitude;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod reading;
pub mod registers;

use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as _, I2c},
};

use crate::bmp384::{
    altitude::{SEA_LEVEL_PA, clamp_reference_pressure, pressure_to_altitude},
    calibration::TrimCoefficients,
    compensation::{LinearizedTemperature, RawSample},
    config::{Bmp384Config, RegValType},
    reading::{Fault, Reading, check_pressure},
    registers::{
        BMP384_CHIP_ID, BMP384_FALLBACK_ADDR, BMP384_PRIMARY_ADDR, Bmp384Register, DATA_LEN,
    },
};

/// Settle time after a soft reset.
const RESET_SETTLE_MS: u32 = 10;

/// Possible BMP384 bus failures.
///
/// Each variant names the step that failed; the underlying I²C error kind is
/// logged, not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp384Error {
    /// Soft reset command failed
    ResetFailed,
    /// Failed to read chip ID register (0x00)
    ReadChipIdFailed,
    /// Failed to read calibration coefficients
    ReadCalibrationRegFailed,
    /// Failed to write power control register (0x1B)
    SetPowerCtrlFailed,
    /// Failed to write oversampling register (0x1C)
    SetOsrFailed,
    /// Failed to write output data rate register (0x1D)
    SetOdrFailed,
    /// Failed to write configuration register (0x1F)
    SetConfFailed,
    /// Failed to bulk read starting from register (0x04)
    ReadFailed,
    /// Failed to read status register (0x03)
    ReadStatusFailed,
    /// A reading was requested before `init()` completed
    NotInitialized,
}

impl RegValType {
    fn write_error(self) -> Bmp384Error {
        match self {
            RegValType::PowerCtrl => Bmp384Error::SetPowerCtrlFailed,
            RegValType::Oversampling => Bmp384Error::SetOsrFailed,
            RegValType::DataRate => Bmp384Error::SetOdrFailed,
            RegValType::Config => Bmp384Error::SetConfFailed,
            RegValType::Reset => Bmp384Error::ResetFailed,
        }
    }
}

/// Initialization progress. `Primed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    Uninitialized,
    Resetting,
    AddressProbe,
    Configuring,
    CalibrationLoaded,
    Primed,
}

/// Compensated values from a single burst read.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature_c: f64,
    pub pressure_pa: f64,
    /// Altitude above the tare point, against the current reference pressure.
    pub altitude_m: f64,
}

/// BMP384 driver instance (blocking I²C).
///
/// Owns the bus, the delay provider and the whole sensor session: selected
/// address, calibration, reference pressure and tare baseline. One instance
/// per physical sensor.
pub struct Bmp384<I2C, D> {
    /// Blocking I²C interface
    pub(crate) i2c: I2C,
    /// BMP384 I²C slave address (0x77 or 0x76)
    pub(crate) haddr: u8,
    /// Delay provider (used for reset timing)
    delay: D,
    state: InitState,
    trim: Option<TrimCoefficients>,
    reference_pa: i32,
    tare_altitude_m: f64,
    chip_id_verified: bool,
}

impl<I2C: I2c, D: DelayNs> Bmp384<I2C, D> {
    /// Creates an uninitialized driver. No bus traffic happens until [`init`](Self::init).
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            haddr: BMP384_PRIMARY_ADDR,
            delay,
            state: InitState::Uninitialized,
            trim: None,
            reference_pa: SEA_LEVEL_PA,
            tare_altitude_m: 0.0,
            chip_id_verified: false,
        }
    }

    /// Initializes the BMP384 sensor.
    ///
    /// Sequence:
    /// 1. Soft reset (0x7E ← 0xB6) at 0x77, wait 10 ms
    /// 2. Probe chip ID (0x00 == 0x50) at 0x77, then once at 0x76
    /// 3. Write oversampling, data rate, IIR filter, then power control
    /// 4. Read and decode calibration coefficients
    /// 5. Take and discard one sample
    ///
    /// A chip ID that matches at neither address is not an error: the driver
    /// stays on 0x77 and carries on, with [`chip_id_verified`](Self::chip_id_verified)
    /// reporting `false`. Calling `init` again once primed does nothing.
    ///
    /// # Errors
    /// Returns `Bmp384Error` if configuration, calibration or the priming read
    /// fails on the bus. The session is then back to `Uninitialized`.
    pub fn init(&mut self) -> Result<(), Bmp384Error> {
        if self.state == InitState::Primed {
            trace!("BMP384 already initialized");
            return Ok(());
        }

        let result = self.run_init();
        if result.is_err() {
            self.trim = None;
            self.transition(InitState::Uninitialized);
        }
        result
    }

    fn run_init(&mut self) -> Result<(), Bmp384Error> {
        self.transition(InitState::Resetting);
        self.soft_reset();

        self.transition(InitState::AddressProbe);
        self.probe_address();

        self.transition(InitState::Configuring);
        self.configure()?;

        let trim = TrimCoefficients::read_calib_data(self)?;
        self.trim = Some(trim);
        self.transition(InitState::CalibrationLoaded);

        // The first conversion after reset is not trusted; read it once and drop it.
        let sample = self.burst_read()?;
        let (t_lin, pressure_pa) = trim.compensate(&sample);
        trace!(
            "Priming sample: {} degC, {} Pa",
            t_lin.celsius(),
            pressure_pa
        );

        self.transition(InitState::Primed);
        info!("BMP384 initialized at {:#x}", self.haddr);
        Ok(())
    }

    fn transition(&mut self, next: InitState) {
        trace!("BMP384 state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// A failed reset is not fatal: the sensor may live at the fallback
    /// address, which the probe finds next.
    fn soft_reset(&mut self) {
        if let Err(e) = self.write_reg_val(&Bmp384Config::default(), RegValType::Reset) {
            warn!("Soft reset at {:#x} failed: {:?}", self.haddr, e);
        }
        self.delay.delay_ms(RESET_SETTLE_MS);
    }

    fn probe_address(&mut self) {
        for addr in [BMP384_PRIMARY_ADDR, BMP384_FALLBACK_ADDR] {
            self.haddr = addr;
            match self.chip_id() {
                Ok(BMP384_CHIP_ID) => {
                    debug!("BMP384 found at {:#x}", addr);
                    self.chip_id_verified = true;
                    return;
                }
                Ok(id) => warn!("Chip ID mismatch at {:#x}: {:#x}", addr, id),
                Err(_) => warn!("No chip ID at {:#x}", addr),
            }
        }

        warn!("BMP384 not identified, continuing at {:#x}", BMP384_PRIMARY_ADDR);
        self.haddr = BMP384_PRIMARY_ADDR;
        self.chip_id_verified = false;
    }

    fn configure(&mut self) -> Result<(), Bmp384Error> {
        let cfg = Bmp384Config::default();
        for reg_val_type in Bmp384Config::WRITE_ORDER {
            self.write_reg_val(&cfg, reg_val_type)?;
        }
        Ok(())
    }

    fn write_reg_val(
        &mut self,
        cfg: &Bmp384Config,
        reg_val_type: RegValType,
    ) -> Result<(), Bmp384Error> {
        let reg_val = cfg.make_reg_val(reg_val_type);
        self.i2c.write(self.haddr, &reg_val).map_err(|e| {
            error!(
                "Failed to write {:#x} to register {:#x}: {:?}",
                reg_val[1],
                reg_val[0],
                e.kind()
            );
            reg_val_type.write_error()
        })
    }

    /// Reads the chip identity register at the current address.
    ///
    /// # Errors
    /// - `ReadChipIdFailed` if the I²C read fails
    pub fn chip_id(&mut self) -> Result<u8, Bmp384Error> {
        let mut chip_id: [u8; 1] = [0u8];
        self.i2c
            .write_read(self.haddr, &[Bmp384Register::ChipId as u8], &mut chip_id)
            .map_err(|e| {
                debug!("Failed to read chip ID: {:?}", e.kind());
                Bmp384Error::ReadChipIdFailed
            })?;
        Ok(chip_id[0])
    }

    /// Reads the status register (0x03).
    ///
    /// # Errors
    /// - `ReadStatusFailed` if the I²C read fails
    pub fn read_status(&mut self) -> Result<u8, Bmp384Error> {
        let mut status: [u8; 1] = [0u8];
        self.i2c
            .write_read(self.haddr, &[Bmp384Register::Status as u8], &mut status)
            .map_err(|e| {
                error!("Failed to read status: {:?}", e.kind());
                Bmp384Error::ReadStatusFailed
            })?;
        Ok(status[0])
    }

    fn burst_read(&mut self) -> Result<RawSample, Bmp384Error> {
        let mut raw_data: [u8; DATA_LEN] = [0; DATA_LEN];
        self.i2c
            .write_read(self.haddr, &[Bmp384Register::Data0 as u8], &mut raw_data)
            .map_err(|e| {
                error!("Read failed: {:?}", e.kind());
                Bmp384Error::ReadFailed
            })?;
        Ok(RawSample::from_burst(&raw_data))
    }

    fn primed_trim(&self) -> Result<TrimCoefficients, Bmp384Error> {
        match (self.state, self.trim) {
            (InitState::Primed, Some(trim)) => Ok(trim),
            _ => Err(Bmp384Error::NotInitialized),
        }
    }

    /// Reads one uncompensated sample.
    ///
    /// # Errors
    /// - `NotInitialized` before [`init`](Self::init)
    /// - `ReadFailed` if the burst read fails
    pub fn read_raw(&mut self) -> Result<RawSample, Bmp384Error> {
        self.primed_trim()?;
        self.burst_read()
    }

    /// One burst read, compensated. Faults on an all-zero sample or an
    /// implausible pressure.
    fn sample(&mut self) -> Result<Reading<(LinearizedTemperature, f64)>, Bmp384Error> {
        let trim = self.primed_trim()?;
        let sample = self.burst_read()?;
        if sample.is_zero() {
            warn!("All-zero sample, check wiring");
            return Ok(Reading::Fault(Fault::Wiring));
        }

        let (t_lin, pressure_pa) = trim.compensate(&sample);
        let reading = check_pressure(pressure_pa);
        if !reading.is_valid() {
            warn!("Pressure out of range: {} Pa", pressure_pa);
        }
        Ok(reading.map(|p| (t_lin, p)))
    }

    fn absolute_altitude(&self, pressure_pa: f64) -> f64 {
        pressure_to_altitude(pressure_pa, f64::from(self.reference_pa))
    }

    /// Sets the sea-level reference pressure, clamped to 80000..=105000 Pa.
    pub fn set_reference_pressure(&mut self, pa: i32) {
        self.reference_pa = clamp_reference_pressure(pa);
        debug!("Reference pressure {} Pa", self.reference_pa);
    }

    pub fn reference_pressure(&self) -> i32 {
        self.reference_pa
    }

    /// Makes the current altitude the zero point for [`read_altitude_m`](Self::read_altitude_m).
    ///
    /// Returns the absolute altitude stored as the new baseline. On a faulted
    /// sample the previous baseline is kept and the fault is returned.
    pub fn tare_here(&mut self) -> Result<Reading<f64>, Bmp384Error> {
        let reading = self
            .sample()?
            .map(|(_, pressure_pa)| self.absolute_altitude(pressure_pa));
        if let Reading::Valid(altitude_m) = reading {
            self.tare_altitude_m = altitude_m;
            info!("Tare altitude {} m", altitude_m);
        }
        Ok(reading)
    }

    /// Absolute altitude captured by the last [`tare_here`](Self::tare_here).
    pub fn tare_altitude(&self) -> f64 {
        self.tare_altitude_m
    }

    pub fn read_pressure_pa(&mut self) -> Result<Reading<f64>, Bmp384Error> {
        Ok(self.sample()?.map(|(_, pressure_pa)| pressure_pa))
    }

    /// Temperature does not depend on pressure, so only an all-zero sample
    /// faults it.
    pub fn read_temperature_c(&mut self) -> Result<Reading<f64>, Bmp384Error> {
        let trim = self.primed_trim()?;
        let sample = self.burst_read()?;
        if sample.is_zero() {
            warn!("All-zero sample, check wiring");
            return Ok(Reading::Fault(Fault::Wiring));
        }
        Ok(Reading::Valid(
            trim.compensate_temperature(sample.temperature).celsius(),
        ))
    }

    /// Altitude above the tare point, using the current reference pressure.
    pub fn read_altitude_m(&mut self) -> Result<Reading<f64>, Bmp384Error> {
        Ok(self
            .sample()?
            .map(|(_, pressure_pa)| self.absolute_altitude(pressure_pa) - self.tare_altitude_m))
    }

    /// Same as [`read_altitude_m`](Self::read_altitude_m).
    pub fn read_relative_altitude_m(&mut self) -> Result<Reading<f64>, Bmp384Error> {
        self.read_altitude_m()
    }

    /// Temperature, pressure and relative altitude from one burst read.
    pub fn read_measurement(&mut self) -> Result<Reading<Measurement>, Bmp384Error> {
        Ok(self.sample()?.map(|(t_lin, pressure_pa)| Measurement {
            temperature_c: t_lin.celsius(),
            pressure_pa,
            altitude_m: self.absolute_altitude(pressure_pa) - self.tare_altitude_m,
        }))
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Bus address in use.
    pub fn address(&self) -> u8 {
        self.haddr
    }

    /// Whether the probe saw the expected chip ID at [`address`](Self::address).
    pub fn chip_id_verified(&self) -> bool {
        self.chip_id_verified
    }

    /// Calibration loaded by `init`, if any.
    pub fn trim(&self) -> Option<&TrimCoefficients> {
        self.trim.as_ref()
    }

    /// Gives back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp384::{calibration::tests::NVM, compensation::tests::SAMPLE};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    const PRIMARY: u8 = BMP384_PRIMARY_ADDR;
    const FALLBACK: u8 = BMP384_FALLBACK_ADDR;
    const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    fn reset() -> I2cTransaction {
        I2cTransaction::write(PRIMARY, vec![0x7E, 0xB6])
    }

    fn chip_id(addr: u8, id: u8) -> I2cTransaction {
        I2cTransaction::write_read(addr, vec![0x00], vec![id])
    }

    fn configure(addr: u8) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(addr, vec![0x1C, 0x1C]),
            I2cTransaction::write(addr, vec![0x1D, 0x04]),
            I2cTransaction::write(addr, vec![0x1F, 0x0A]),
            I2cTransaction::write(addr, vec![0x1B, 0x33]),
        ]
    }

    fn calibration(addr: u8) -> I2cTransaction {
        I2cTransaction::write_read(addr, vec![0x31], NVM.to_vec())
    }

    fn burst(addr: u8, data: [u8; DATA_LEN]) -> I2cTransaction {
        I2cTransaction::write_read(addr, vec![0x04], data.to_vec())
    }

    /// Full init against a sensor answering at 0x77.
    fn init_sequence() -> Vec<I2cTransaction> {
        let mut expectations = vec![reset(), chip_id(PRIMARY, 0x50)];
        expectations.extend(configure(PRIMARY));
        expectations.push(calibration(PRIMARY));
        expectations.push(burst(PRIMARY, SAMPLE));
        expectations
    }

    fn initialized(reads: Vec<I2cTransaction>) -> Bmp384<I2cMock, NoopDelay> {
        let mut expectations = init_sequence();
        expectations.extend(reads);
        let mut baro = Bmp384::new(I2cMock::new(&expectations), NoopDelay::new());
        baro.init().unwrap();
        baro
    }

    fn finish(baro: Bmp384<I2cMock, NoopDelay>) {
        let (mut i2c, _) = baro.release();
        // Finalise expectations
        i2c.done();
    }

    #[test]
    fn init_at_primary_address() {
        let baro = initialized(vec![]);
        assert_eq!(baro.state(), InitState::Primed);
        assert_eq!(baro.address(), PRIMARY);
        assert!(baro.chip_id_verified());
        assert_eq!(baro.trim(), Some(&TrimCoefficients::from_nvm(&NVM)));
        finish(baro);
    }

    #[test]
    fn init_is_idempotent() {
        let mut baro = initialized(vec![]);
        baro.init().unwrap();
        baro.init().unwrap();
        assert_eq!(baro.state(), InitState::Primed);
        finish(baro);
    }

    #[test]
    fn init_falls_back_once() {
        let mut expectations = vec![
            reset().with_error(NACK),
            chip_id(PRIMARY, 0x50).with_error(NACK),
            chip_id(FALLBACK, 0x50),
        ];
        expectations.extend(configure(FALLBACK));
        expectations.push(calibration(FALLBACK));
        expectations.push(burst(FALLBACK, SAMPLE));

        let mut baro = Bmp384::new(I2cMock::new(&expectations), NoopDelay::new());
        baro.init().unwrap();
        assert_eq!(baro.address(), FALLBACK);
        assert!(baro.chip_id_verified());
        finish(baro);
    }

    #[test]
    fn init_continues_when_no_address_matches() {
        let mut expectations = vec![reset(), chip_id(PRIMARY, 0x58), chip_id(FALLBACK, 0x00)];
        expectations.extend(configure(PRIMARY));
        expectations.push(calibration(PRIMARY));
        expectations.push(burst(PRIMARY, SAMPLE));

        let mut baro = Bmp384::new(I2cMock::new(&expectations), NoopDelay::new());
        baro.init().unwrap();
        assert_eq!(baro.state(), InitState::Primed);
        assert_eq!(baro.address(), PRIMARY);
        assert!(!baro.chip_id_verified());
        finish(baro);
    }

    #[test]
    fn init_failure_returns_to_uninitialized() {
        let expectations = [
            reset(),
            chip_id(PRIMARY, 0x50),
            I2cTransaction::write(PRIMARY, vec![0x1C, 0x1C]).with_error(ErrorKind::Other),
        ];
        let mut baro = Bmp384::new(I2cMock::new(&expectations), NoopDelay::new());
        assert_eq!(baro.init(), Err(Bmp384Error::SetOsrFailed));
        assert_eq!(baro.state(), InitState::Uninitialized);
        assert_eq!(baro.trim(), None);
        assert_eq!(baro.read_pressure_pa(), Err(Bmp384Error::NotInitialized));
        finish(baro);
    }

    #[test]
    fn calibration_read_failure() {
        let mut expectations = vec![reset(), chip_id(PRIMARY, 0x50)];
        expectations.extend(configure(PRIMARY));
        expectations.push(calibration(PRIMARY).with_error(ErrorKind::Bus));

        let mut baro = Bmp384::new(I2cMock::new(&expectations), NoopDelay::new());
        assert_eq!(baro.init(), Err(Bmp384Error::ReadCalibrationRegFailed));
        assert_eq!(baro.state(), InitState::Uninitialized);
        finish(baro);
    }

    #[test]
    fn reads_before_init_fail() {
        let mut baro = Bmp384::new(I2cMock::new(&[]), NoopDelay::new());
        assert_eq!(baro.read_pressure_pa(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.read_temperature_c(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.read_altitude_m(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.read_measurement(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.read_raw(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.tare_here(), Err(Bmp384Error::NotInitialized));
        assert_eq!(baro.state(), InitState::Uninitialized);
        finish(baro);
    }

    #[test]
    fn read_pressure_and_temperature() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE), burst(PRIMARY, SAMPLE)]);

        let pressure = baro.read_pressure_pa().unwrap().valid().unwrap();
        assert!((pressure - 101_518.291_748).abs() < 1e-3, "{pressure}");

        let temperature = baro.read_temperature_c().unwrap().valid().unwrap();
        assert!((temperature - 24.554_093).abs() < 1e-6, "{temperature}");
        finish(baro);
    }

    #[test]
    fn read_raw_sample() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE)]);
        assert_eq!(
            baro.read_raw(),
            Ok(RawSample {
                pressure: 7_000_000,
                temperature: 1_379_872,
            })
        );
        finish(baro);
    }

    #[test]
    fn zero_sample_is_wiring_fault() {
        let mut baro = initialized(vec![
            burst(PRIMARY, [0; DATA_LEN]),
            burst(PRIMARY, [0; DATA_LEN]),
            burst(PRIMARY, [0; DATA_LEN]),
        ]);
        assert_eq!(baro.read_pressure_pa(), Ok(Reading::Fault(Fault::Wiring)));
        assert_eq!(baro.read_temperature_c(), Ok(Reading::Fault(Fault::Wiring)));
        assert_eq!(baro.read_altitude_m(), Ok(Reading::Fault(Fault::Wiring)));
        finish(baro);
    }

    #[test]
    fn implausible_pressure_is_out_of_range() {
        let saturated = [0xFF, 0xFF, 0xFF, 0x20, 0x0E, 0x15];
        let mut baro = initialized(vec![burst(PRIMARY, saturated), burst(PRIMARY, saturated)]);
        assert_eq!(baro.read_pressure_pa(), Ok(Reading::Fault(Fault::OutOfRange)));
        // Temperature is still usable.
        assert!(baro.read_temperature_c().unwrap().is_valid());
        finish(baro);
    }

    #[test]
    fn altitude_against_reference() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE), burst(PRIMARY, SAMPLE)]);

        let altitude = baro.read_altitude_m().unwrap().valid().unwrap();
        assert!((altitude - -16.080_445).abs() < 1e-3, "{altitude}");

        baro.set_reference_pressure(100_000);
        let altitude = baro.read_relative_altitude_m().unwrap().valid().unwrap();
        assert!((altitude - -127.302_910).abs() < 1e-3, "{altitude}");
        finish(baro);
    }

    #[test]
    fn tare_zeroes_altitude() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE), burst(PRIMARY, SAMPLE)]);

        let baseline = baro.tare_here().unwrap().valid().unwrap();
        assert_eq!(baro.tare_altitude(), baseline);

        let altitude = baro.read_altitude_m().unwrap().valid().unwrap();
        assert!(altitude.abs() < 1e-9, "{altitude}");
        finish(baro);
    }

    #[test]
    fn faulted_tare_keeps_baseline() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE), burst(PRIMARY, [0; DATA_LEN])]);

        let baseline = baro.tare_here().unwrap().valid().unwrap();
        assert_eq!(baro.tare_here(), Ok(Reading::Fault(Fault::Wiring)));
        assert_eq!(baro.tare_altitude(), baseline);
        finish(baro);
    }

    #[test]
    fn measurement_from_one_sample() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE)]);
        let m = baro.read_measurement().unwrap().valid().unwrap();
        assert!((m.temperature_c - 24.554_093).abs() < 1e-6);
        assert!((m.pressure_pa - 101_518.291_748).abs() < 1e-3);
        assert!((m.altitude_m - -16.080_445).abs() < 1e-3);
        finish(baro);
    }

    #[test]
    fn reference_pressure_is_clamped() {
        let mut baro = Bmp384::new(I2cMock::new(&[]), NoopDelay::new());
        assert_eq!(baro.reference_pressure(), 101_325);
        baro.set_reference_pressure(50_000);
        assert_eq!(baro.reference_pressure(), 80_000);
        baro.set_reference_pressure(999_999);
        assert_eq!(baro.reference_pressure(), 105_000);
        baro.set_reference_pressure(101_325);
        assert_eq!(baro.reference_pressure(), 101_325);
        finish(baro);
    }

    #[test]
    fn burst_read_failure() {
        let mut baro = initialized(vec![burst(PRIMARY, SAMPLE).with_error(ErrorKind::Other)]);
        assert_eq!(baro.read_pressure_pa(), Err(Bmp384Error::ReadFailed));
        // A failed read does not undo initialization.
        assert_eq!(baro.state(), InitState::Primed);
        finish(baro);
    }

    #[test]
    fn status_and_chip_id() {
        let mut baro = Bmp384::new(
            I2cMock::new(&[
                I2cTransaction::write_read(PRIMARY, vec![0x03], vec![0x70]),
                chip_id(PRIMARY, 0x50),
                chip_id(PRIMARY, 0x50).with_error(ErrorKind::Other),
            ]),
            NoopDelay::new(),
        );
        assert_eq!(baro.read_status(), Ok(0x70));
        assert_eq!(baro.chip_id(), Ok(0x50));
        assert_eq!(baro.chip_id(), Err(Bmp384Error::ReadChipIdFailed));
        finish(baro);
    }
}
