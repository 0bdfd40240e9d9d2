//! HT1632 serial protocol
//!
//! This crate encodes everything the host sends to an HT1632/HT1632C LED
//! matrix controller. The chip listens on a three-wire bus (CS, WR, DATA)
//! that an SPI master can drive directly, but its words are not byte
//! aligned:
//!
//! ```text
//! Command:  ┌─────┬──────────────┬─────────┐
//!           │ 100 │ code (8)     │ pad (5) │                    16 bits
//!           └─────┴──────────────┴─────────┘
//! Write:    ┌─────┬──────────┬────────┬────────┬────────┬───
//!           │ 101 │ addr (7) │ D (4)  │ D (4)  │ D (4)  │ ...  address
//!           └─────┴──────────┴────────┴────────┴────────┴───   auto-increments
//! ```
//!
//! Both encoders work purely on values and slices; bus access, chip-select
//! and locking live in `ht1632-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod cell;
pub mod command;
pub mod frame;

pub use cell::{Cell, BITS_PER_CELL};
pub use command::{swap_bytes, word_to_wire, Command, CommandWord};
pub use frame::{
    encode_into, encode_to_vec, frame_byte_count, frame_unit_count, FrameEncoder, FrameError,
    WireUnit, MAX_FRAME_BYTES, MAX_FRAME_CELLS,
};
