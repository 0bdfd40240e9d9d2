//! Host-side mirror of the chip's display RAM
//!
//! The framebuffer holds one [`Cell`] per RAM address. Its length is fixed
//! when it is created, from the commons mode, and never changes until the
//! buffer is released on close.
//!
//! Out-of-range addresses and bit indices are ignored on write and read back
//! as off. The check lives in [`Framebuffer::locate`] and nowhere else.

use heapless::Vec;
use ht1632_protocol::{Cell, BITS_PER_CELL, MAX_FRAME_CELLS};

use crate::config::CommonsMode;

/// Largest framebuffer any commons mode needs
pub const MAX_CELLS: usize = MAX_FRAME_CELLS;

/// Framebuffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramebufferError {
    /// Requested length does not fit in [`MAX_CELLS`]
    CapacityExceeded,
}

/// Display RAM mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: Vec<Cell, MAX_CELLS>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Empty framebuffer with no cells
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Framebuffer of `len` cells, all off
    pub fn with_len(len: usize) -> Result<Self, FramebufferError> {
        let mut cells = Vec::new();
        cells
            .resize(len, Cell::OFF)
            .map_err(|_| FramebufferError::CapacityExceeded)?;
        Ok(Self { cells })
    }

    /// Framebuffer sized for a commons mode
    pub fn for_mode(mode: CommonsMode) -> Result<Self, FramebufferError> {
        Self::with_len(mode.cell_count())
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in address order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Set or clear one bit
    ///
    /// Writes outside the buffer are dropped.
    pub fn set(&mut self, address: usize, bit: u8, value: bool) {
        if let Some(index) = self.locate(address, bit) {
            self.cells[index].set_bit(bit, value);
        }
    }

    /// Read one bit; reads outside the buffer return `false`
    pub fn get(&self, address: usize, bit: u8) -> bool {
        self.locate(address, bit)
            .map(|index| self.cells[index].bit(bit))
            .unwrap_or(false)
    }

    /// Replace a whole cell
    pub fn set_cell(&mut self, address: usize, cell: Cell) {
        if let Some(index) = self.locate(address, 0) {
            self.cells[index] = cell;
        }
    }

    /// Whole cell at `address`, off when out of range
    pub fn cell(&self, address: usize) -> Cell {
        self.locate(address, 0)
            .map(|index| self.cells[index])
            .unwrap_or(Cell::OFF)
    }

    /// Turn every bit of every cell off
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }

    /// Turn every bit of every cell on or off
    pub fn fill(&mut self, value: bool) {
        let cell = if value { Cell::ON } else { Cell::OFF };
        self.cells.iter_mut().for_each(|slot| *slot = cell);
    }

    /// Drop every cell; the buffer is empty afterwards
    pub fn release(&mut self) {
        self.cells.clear();
    }

    /// Bounds check shared by every bit access
    fn locate(&self, address: usize, bit: u8) -> Option<usize> {
        (address < self.cells.len() && bit < BITS_PER_CELL).then_some(address)
    }
}
