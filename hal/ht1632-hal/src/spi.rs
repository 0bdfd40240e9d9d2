//! SPI bus abstractions
//!
//! The HT1632 never answers on the data line, so only the master-to-chip
//! direction is modelled.

/// SPI bus master
///
/// The chip samples data on the rising edge of WR with the clock idling
/// low (mode 0); the bus is expected to be configured that way.
///
/// Writes are complete-or-fail: an implementation either clocks out the
/// whole buffer or reports an error.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every byte handed to [`write`](Self::write) has left the
    /// shift register.
    ///
    /// Must be called before chip-select is released. Buses that complete
    /// writes synchronously can rely on the default.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}
