//! Blocking [`embedded-hal`](embedded_hal) driver for the Bosch BMP384
//! barometric pressure and temperature sensor.
//!
//! The driver owns the I²C bus and a delay provider, finds the sensor at 0x77
//! or 0x76, configures it for continuous high-resolution sampling and turns
//! raw counts into pressure (Pa), temperature (°C) and relative altitude (m).
//!
//! ```rust,ignore
//! use bmp384_baro::Bmp384;
//!
//! let mut baro = Bmp384::new(i2c, delay);
//! baro.init()?;
//! baro.set_reference_pressure(101_325);
//! baro.tare_here()?;
//! if let Some(alt) = baro.read_altitude_m()?.valid() {
//!     // meters above the tare point
//! }
//! ```

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bmp384;

pub use bmp384::{
    Bmp384, Bmp384Error, InitState, Measurement,
    reading::{Fault, Reading},
};
