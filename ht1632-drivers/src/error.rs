//! Driver errors

use ht1632_core::FramebufferError;

/// Errors returned by the HT1632 driver
///
/// Generic over the SPI and chip-select pin error types so the caller keeps
/// the underlying HAL error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    /// Chip-select could not be driven to its idle level during bring-up
    TransportInit(PinE),
    /// Framebuffer could not be sized for the commons mode
    Allocation,
    /// A bus write or flush failed
    TransportWrite(SpiE),
    /// Chip-select could not be asserted or released during a transaction
    ChipSelect(PinE),
    /// The handle has been closed
    Closed,
}

impl<SpiE, PinE> From<FramebufferError> for Error<SpiE, PinE> {
    fn from(err: FramebufferError) -> Self {
        match err {
            FramebufferError::CapacityExceeded => Error::Allocation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_maps_to_allocation() {
        let err: Error<(), ()> = FramebufferError::CapacityExceeded.into();
        assert_eq!(err, Error::Allocation);
    }
}
