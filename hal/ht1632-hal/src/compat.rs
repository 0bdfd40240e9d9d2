//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! Wrap a HAL's SPI bus and GPIO output in [`EhSpi`] / [`EhPin`] to hand them
//! to the driver. Errors are reduced to the portable `ErrorKind` of each
//! `embedded-hal` module so the driver's error type does not depend on the
//! vendor HAL.

use embedded_hal::digital::{self, Error as _};
use embedded_hal::spi::{self, Error as _};

use crate::gpio::OutputPin;
use crate::spi::SpiBus;

/// `embedded-hal` SPI bus adapter
#[derive(Debug)]
pub struct EhSpi<T>(pub T);

impl<T> EhSpi<T> {
    /// Wrap an `embedded-hal` SPI bus
    pub fn new(bus: T) -> Self {
        Self(bus)
    }

    /// Get the wrapped bus back
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: spi::SpiBus<u8>> SpiBus for EhSpi<T> {
    type Error = spi::ErrorKind;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        spi::SpiBus::write(&mut self.0, data).map_err(|e| e.kind())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        spi::SpiBus::flush(&mut self.0).map_err(|e| e.kind())
    }
}

/// `embedded-hal` output pin adapter
#[derive(Debug)]
pub struct EhPin<T>(pub T);

impl<T> EhPin<T> {
    /// Wrap an `embedded-hal` output pin
    pub fn new(pin: T) -> Self {
        Self(pin)
    }

    /// Get the wrapped pin back
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: digital::OutputPin> OutputPin for EhPin<T> {
    type Error = digital::ErrorKind;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        digital::OutputPin::set_high(&mut self.0).map_err(|e| e.kind())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        digital::OutputPin::set_low(&mut self.0).map_err(|e| e.kind())
    }
}
