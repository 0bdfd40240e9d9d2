//! A single HT1632 RAM location.

/// Number of bits held by one RAM address
pub const BITS_PER_CELL: u8 = 4;

/// Four on/off bits at one chip RAM address
///
/// Bit index 0 is the first bit clocked out for the address, so it is kept
/// in the most-significant position of the nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell(u8);

impl Cell {
    /// All bits off
    pub const OFF: Self = Self(0);
    /// All bits on
    pub const ON: Self = Self(0x0F);

    /// Create an empty cell
    pub const fn new() -> Self {
        Self::OFF
    }

    /// Create a cell from a nibble in transmission order (bit 0 = MSB)
    pub const fn from_nibble(nibble: u8) -> Self {
        Self(nibble & 0x0F)
    }

    /// Create a cell from bits indexed 0..4
    pub fn from_bits(bits: [bool; 4]) -> Self {
        let mut cell = Self::new();
        for (index, value) in (0u8..).zip(bits) {
            cell.set_bit(index, value);
        }
        cell
    }

    /// The four bits as a nibble in transmission order
    pub const fn nibble(self) -> u8 {
        self.0
    }

    /// Read one bit; indices above 3 read as off
    pub const fn bit(self, index: u8) -> bool {
        match Self::mask(index) {
            Some(mask) => self.0 & mask != 0,
            None => false,
        }
    }

    /// Write one bit; indices above 3 are ignored
    pub fn set_bit(&mut self, index: u8, value: bool) {
        if let Some(mask) = Self::mask(index) {
            if value {
                self.0 |= mask;
            } else {
                self.0 &= !mask;
            }
        }
    }

    /// Turn every bit off
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// The two bits (0, 1) that lead this cell on the wire
    pub(crate) const fn leading_pair(self) -> u8 {
        self.0 >> 2
    }

    /// The two bits (2, 3) that trail this cell on the wire
    pub(crate) const fn trailing_pair(self) -> u8 {
        self.0 & 0b11
    }

    const fn mask(index: u8) -> Option<u8> {
        if index < BITS_PER_CELL {
            Some(0b1000 >> index)
        } else {
            None
        }
    }
}
