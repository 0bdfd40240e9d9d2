//! Transaction guard
//!
//! Every exchange with the chip is one transaction:
//!
//! ```text
//!   lock ─► CS assert ─► write unit ─► write unit ─► ... ─► flush ─► CS release ─► unlock
//! ```
//!
//! The lock is taken for exactly one transaction and never held between
//! them. A failed write still releases chip-select and the lock before the
//! error is returned.

use ht1632_core::ChipSelectPolarity;
use ht1632_hal::{BusLock, OutputPin, SpiBus};
use ht1632_protocol::{Cell, Command, FrameEncoder, WireUnit};

use crate::error::Error;

/// Error type produced by a transport over `SPI` and `CS`
pub type TransportError<SPI, CS> = Error<<SPI as SpiBus>::Error, <CS as OutputPin>::Error>;

/// SPI bus, chip-select line and bus lock for one chip
pub struct Transport<SPI, CS, L> {
    spi: SPI,
    cs: CS,
    lock: L,
    polarity: ChipSelectPolarity,
}

impl<SPI, CS, L> Transport<SPI, CS, L>
where
    SPI: SpiBus,
    CS: OutputPin,
    L: BusLock,
{
    pub fn new(spi: SPI, cs: CS, lock: L, polarity: ChipSelectPolarity) -> Self {
        Self {
            spi,
            cs,
            lock,
            polarity,
        }
    }

    /// Drive chip-select to its idle level
    pub fn idle(&mut self) -> Result<(), TransportError<SPI, CS>> {
        self.cs
            .set_state(self.polarity.idle_level())
            .map_err(Error::TransportInit)
    }

    /// Send one command word
    pub fn send_command(&mut self, command: Command) -> Result<(), TransportError<SPI, CS>> {
        let unit = WireUnit::Word(command.word().to_wire());
        self.transaction(core::iter::once(unit))
    }

    /// Send the whole display RAM, starting at address 0
    pub fn send_frame(&mut self, cells: &[Cell]) -> Result<(), TransportError<SPI, CS>> {
        self.transaction(FrameEncoder::new(cells))
    }

    /// Write `units` in order inside one guarded transaction
    ///
    /// Each unit goes out with its own bus write.
    pub fn transaction<I>(&mut self, units: I) -> Result<(), TransportError<SPI, CS>>
    where
        I: IntoIterator<Item = WireUnit>,
    {
        let Self {
            spi,
            cs,
            lock,
            polarity,
        } = self;
        let polarity = *polarity;

        let result = lock.lock(|| -> Result<(), TransportError<SPI, CS>> {
            cs.set_state(polarity.asserted_level())
                .map_err(Error::ChipSelect)?;

            let written = write_units(spi, units);
            let released = cs
                .set_state(polarity.idle_level())
                .map_err(Error::ChipSelect);

            written.and(released)
        });

        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::warn!("HT1632 transaction failed");
        }

        result
    }

    /// Give back the bus, pin and lock
    pub fn release(self) -> (SPI, CS, L) {
        (self.spi, self.cs, self.lock)
    }
}

fn write_units<SPI, PinE, I>(spi: &mut SPI, units: I) -> Result<(), Error<SPI::Error, PinE>>
where
    SPI: SpiBus,
    I: IntoIterator<Item = WireUnit>,
{
    for unit in units {
        spi.write(unit.as_bytes()).map_err(Error::TransportWrite)?;
    }
    spi.flush().map_err(Error::TransportWrite)
}
