//! Display RAM write stream.
//!
//! A frame is a single successive-address write starting at address 0:
//!
//! ```text
//! ┌────────┬───────────┬──────────────────────┬─────────────────────────────
//! │ ID 101 │ ADDR 0    │ cell 0 (4) + 1 (2)   │ then 8 data bits per byte ...
//! │ 3 bits │ 7 bits    │ 6 bits               │
//! └────────┴───────────┴──────────────────────┴─────────────────────────────
//! ╰──────────── first 16-bit unit, byte-swapped ─╯
//! ```
//!
//! After each nibble the chip advances its address pointer, so the data bits
//! flow on without headers. The bus only moves whole bytes: every byte after
//! the header carries the two trailing bits of one cell, the full next cell
//! and the two leading bits of the cell after that (`AABB BBCC`). When the
//! cells run out the byte is completed with zero bits and the stream ends.

use heapless::Vec;

use crate::cell::Cell;
use crate::command::{word_to_wire, ADDRESS_LEN, ID_LEN, ID_WRITE};

/// First RAM address written by a frame
pub const START_ADDRESS: u8 = 0;

/// Header bits before the first data nibble (ID + address)
pub const HEADER_BITS: u32 = ID_LEN + ADDRESS_LEN;

/// Data bits that fit in the first 16-bit unit after the header
pub const HEADER_DATA_BITS: u32 = 16 - HEADER_BITS;

/// Largest frame the encoder buffers (96 cells)
pub const MAX_FRAME_CELLS: usize = 96;

/// Bytes on the wire for a frame of `MAX_FRAME_CELLS`
pub const MAX_FRAME_BYTES: usize = frame_byte_count(MAX_FRAME_CELLS);

/// Errors from frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer too small for the encoded frame
    BufferTooSmall,
}

/// One bus write within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireUnit {
    /// Header unit, already in transmission order
    Word([u8; 2]),
    /// Continuation byte, sent as assembled
    Byte(u8),
}

impl WireUnit {
    /// Bytes to put on the bus
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WireUnit::Word(bytes) => &bytes[..],
            WireUnit::Byte(byte) => core::slice::from_ref(byte),
        }
    }
}

/// Number of bus writes for a frame of `cells` cells
///
/// Equals `1 + ceil((cells * 4 - 6) / 8)` for two or more cells: the header
/// unit plus one byte per two cells.
pub const fn frame_unit_count(cells: usize) -> usize {
    1 + cells / 2
}

/// Number of bytes on the wire for a frame of `cells` cells
pub const fn frame_byte_count(cells: usize) -> usize {
    frame_unit_count(cells) + 1
}

/// Numeric (unswapped) value of the header unit
pub fn header_word(cells: &[Cell]) -> u16 {
    let first = cells.first().copied().unwrap_or_default();
    let second = cells.get(1).copied().unwrap_or_default();

    let mut word = ID_WRITE as u16;
    word <<= ADDRESS_LEN;
    word |= START_ADDRESS as u16;
    word <<= HEADER_DATA_BITS;
    word |= ((first.nibble() << 2) | second.leading_pair()) as u16;
    word
}

/// Iterator over the bus writes that transmit `cells`
///
/// Yields the header [`WireUnit::Word`] first and then one
/// [`WireUnit::Byte`] per continuation byte.
#[derive(Debug, Clone)]
pub struct FrameEncoder<'a> {
    cells: &'a [Cell],
    /// Cell whose trailing pair opens the next byte; `None` until the
    /// header has been produced
    cursor: Option<usize>,
}

impl<'a> FrameEncoder<'a> {
    /// Create an encoder over the framebuffer cells
    pub fn new(cells: &'a [Cell]) -> Self {
        Self {
            cells,
            cursor: None,
        }
    }

    fn next_byte(&mut self, mut index: usize) -> Option<u8> {
        let len = self.cells.len();
        if index >= len {
            return None;
        }

        // AA: two bits left over from the previous byte
        let mut byte = self.cells[index].trailing_pair();
        index += 1;

        if index == len {
            byte <<= 6;
        } else {
            // BBBB: the whole next cell
            byte = (byte << 4) | self.cells[index].nibble();
            index += 1;

            if index == len {
                byte <<= 2;
            } else {
                // CC: leading bits of the following cell; its trailing
                // pair opens the next byte
                byte = (byte << 2) | self.cells[index].leading_pair();
            }
        }

        self.cursor = Some(index);
        Some(byte)
    }
}

impl Iterator for FrameEncoder<'_> {
    type Item = WireUnit;

    fn next(&mut self) -> Option<WireUnit> {
        match self.cursor {
            None => {
                self.cursor = Some(1);
                Some(WireUnit::Word(word_to_wire(header_word(self.cells))))
            }
            Some(index) => self.next_byte(index).map(WireUnit::Byte),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.cursor {
            None => frame_unit_count(self.cells.len()),
            Some(index) => self.cells.len().saturating_sub(index).div_ceil(2),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameEncoder<'_> {}

/// Encode a frame into a byte buffer
///
/// Returns the number of bytes written.
pub fn encode_into(cells: &[Cell], buffer: &mut [u8]) -> Result<usize, FrameError> {
    let frame_len = frame_byte_count(cells.len());
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }

    let mut written = 0;
    for unit in FrameEncoder::new(cells) {
        let bytes = unit.as_bytes();
        buffer[written..written + bytes.len()].copy_from_slice(bytes);
        written += bytes.len();
    }

    Ok(written)
}

/// Encode a frame into a heapless Vec
pub fn encode_to_vec(cells: &[Cell]) -> Result<Vec<u8, MAX_FRAME_BYTES>, FrameError> {
    let mut buffer = [0u8; MAX_FRAME_BYTES];
    let len = encode_into(cells, &mut buffer)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(&buffer[..len])
        .map_err(|_| FrameError::BufferTooSmall)?;
    Ok(vec)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::command::swap_bytes;
    use proptest::prelude::*;

    fn blank(len: usize) -> std::vec::Vec<Cell> {
        std::vec![Cell::OFF; len]
    }

    #[test]
    fn test_header_field_widths() {
        // 3-bit WR ID + 7-bit address leaves six data bits in the word
        assert_eq!(HEADER_BITS, ID_LEN + ADDRESS_LEN);
        assert_eq!(HEADER_BITS, 10);
        assert_eq!(HEADER_DATA_BITS, 6);
    }

    #[test]
    fn test_header_of_blank_frame() {
        let cells = blank(64);
        // 101 0000000 000000
        assert_eq!(header_word(&cells), 0b1010_0000_0000_0000);

        let mut encoder = FrameEncoder::new(&cells);
        assert_eq!(encoder.next(), Some(WireUnit::Word([0xA0, 0x00])));
    }

    #[test]
    fn test_header_carries_first_six_bits() {
        let mut cells = blank(64);
        cells[0] = Cell::from_bits([true, false, true, true]);

        let word = header_word(&cells);
        assert_eq!(word >> 13, ID_WRITE as u16);
        assert_eq!((word >> 6) & 0x7F, 0); // start address
        assert_eq!(word & 0x3F, 0b101100);

        let wire = FrameEncoder::new(&cells).next().unwrap();
        assert_eq!(wire, WireUnit::Word(swap_bytes(word).to_le_bytes()));
        assert_eq!(wire.as_bytes(), &[0xA0, 0x2C]);
    }

    #[test]
    fn test_header_takes_leading_pair_of_cell_one() {
        let mut cells = blank(64);
        cells[1] = Cell::from_bits([true, true, false, false]);
        assert_eq!(header_word(&cells) & 0x3F, 0b000011);
    }

    #[test]
    fn test_byte_packing_pattern() {
        let mut cells = blank(8);
        cells[1] = Cell::from_nibble(0b0001); // bits 2,3 = 01 -> AA
        cells[2] = Cell::from_nibble(0b1010); // BBBB
        cells[3] = Cell::from_nibble(0b1101); // CC = 11, next AA = 01

        let units: std::vec::Vec<_> = FrameEncoder::new(&cells).collect();
        assert_eq!(units[1], WireUnit::Byte(0b01_1010_11));
        // second byte: AA from cell 3 (01), cell 4 (0000), CC from cell 5 (00)
        assert_eq!(units[2], WireUnit::Byte(0b01_0000_00));
    }

    #[test]
    fn test_unit_counts() {
        assert_eq!(FrameEncoder::new(&blank(64)).count(), 33);
        assert_eq!(FrameEncoder::new(&blank(96)).count(), 49);
        assert_eq!(frame_byte_count(64), 34);
        assert_eq!(frame_byte_count(96), 50);
        assert_eq!(MAX_FRAME_BYTES, 50);
    }

    #[test]
    fn test_final_byte_padding_even_length() {
        // Even length: the last byte holds only cell N-1's trailing pair
        let mut cells = blank(64);
        cells[63] = Cell::ON;

        let bytes = encode_to_vec(&cells).unwrap();
        assert_eq!(bytes.len(), 34);
        assert_eq!(*bytes.last().unwrap(), 0b11_000000);
    }

    #[test]
    fn test_final_byte_padding_odd_length() {
        // Odd length: trailing pair + full last cell, two zero bits
        let mut cells = blank(5);
        cells[3] = Cell::from_nibble(0b0011);
        cells[4] = Cell::ON;

        let bytes = encode_to_vec(&cells).unwrap();
        assert_eq!(bytes.len(), frame_byte_count(5));
        assert_eq!(*bytes.last().unwrap(), 0b11_1111_00);
    }

    #[test]
    fn test_all_on_frame() {
        let cells = [Cell::ON; 96];
        let bytes = encode_to_vec(&cells).unwrap();

        assert_eq!(&bytes[..2], &[0xA0, 0x3F]);
        assert!(bytes[2..bytes.len() - 1].iter().all(|&b| b == 0xFF));
        assert_eq!(*bytes.last().unwrap(), 0b1100_0000);
    }

    #[test]
    fn test_tiny_frames() {
        assert_eq!(FrameEncoder::new(&[]).count(), 1);

        let one = [Cell::ON];
        let units: std::vec::Vec<_> = FrameEncoder::new(&one).collect();
        assert_eq!(units, [WireUnit::Word([0xA0, 0x3C])]);
    }

    #[test]
    fn test_buffer_too_small() {
        let cells = blank(64);
        let mut buffer = [0u8; 33];
        assert_eq!(
            encode_into(&cells, &mut buffer),
            Err(FrameError::BufferTooSmall)
        );

        let oversized = blank(MAX_FRAME_CELLS + 2);
        assert_eq!(encode_to_vec(&oversized), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let cells = blank(96);
        let mut encoder = FrameEncoder::new(&cells);
        assert_eq!(encoder.len(), 49);
        encoder.next();
        assert_eq!(encoder.len(), 48);
        encoder.next();
        assert_eq!(encoder.len(), 47);
    }

    /// Bit-serial reference: header bits, then every cell bit in order,
    /// zero-padded to a byte boundary
    fn reference_stream(cells: &[Cell]) -> std::vec::Vec<u8> {
        let mut bits = std::vec::Vec::new();
        for i in (0..3).rev() {
            bits.push((ID_WRITE >> i) & 1 == 1);
        }
        bits.extend(core::iter::repeat(false).take(ADDRESS_LEN as usize));
        for cell in cells {
            for b in 0..4 {
                bits.push(cell.bit(b));
            }
        }
        while bits.len() % 8 != 0 || bits.len() < 16 {
            bits.push(false);
        }
        bits.chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_matches_bit_serial_reference(
            nibbles in proptest::collection::vec(0u8..16, 2..=MAX_FRAME_CELLS)
        ) {
            let cells: std::vec::Vec<Cell> =
                nibbles.iter().map(|&n| Cell::from_nibble(n)).collect();
            let encoded = encode_to_vec(&cells).unwrap();
            prop_assert_eq!(&encoded[..], &reference_stream(&cells)[..]);
        }

        #[test]
        fn prop_unit_count_formula(len in 2usize..=MAX_FRAME_CELLS) {
            let expected = 1 + (len * 4 - 6).div_ceil(8);
            prop_assert_eq!(FrameEncoder::new(&blank(len)).count(), expected);
            prop_assert_eq!(frame_unit_count(len), expected);
        }
    }
}
