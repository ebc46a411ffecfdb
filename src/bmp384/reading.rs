//! Sensor readings tagged as valid or faulted.
//!
//! A fault is a plausibility verdict on the data, not a bus error: the
//! transaction succeeded but the numbers cannot be a real measurement.

/// Upper bound (exclusive) of a plausible pressure.
pub const PRESSURE_MAX_PA: f64 = 200_000.0;

/// Why a reading was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Raw pressure and temperature were both zero: nothing answered on the bus.
    Wiring,
    /// Compensated pressure fell outside (0, 200000) Pa.
    OutOfRange,
}

/// A measurement that is either usable or carries the reason it is not.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading<T> {
    Valid(T),
    Fault(Fault),
}

impl<T> Reading<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Reading::Valid(_))
    }

    /// The value, if the reading is valid.
    pub fn valid(self) -> Option<T> {
        match self {
            Reading::Valid(value) => Some(value),
            Reading::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            Reading::Valid(_) => None,
            Reading::Fault(fault) => Some(*fault),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        match self {
            Reading::Valid(value) => Reading::Valid(f(value)),
            Reading::Fault(fault) => Reading::Fault(fault),
        }
    }
}

/// Tags a compensated pressure as valid only inside (0, [`PRESSURE_MAX_PA`]).
pub fn check_pressure(pressure_pa: f64) -> Reading<f64> {
    if pressure_pa > 0.0 && pressure_pa < PRESSURE_MAX_PA {
        Reading::Valid(pressure_pa)
    } else {
        Reading::Fault(Fault::OutOfRange)
    }
}
