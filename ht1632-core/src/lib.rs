//! Board-agnostic core of the HT1632 driver
//!
//! This crate holds everything that does not touch the bus:
//!
//! - Framebuffer mirroring the chip's display RAM
//! - Configuration types (commons wiring, clock, role, chip-select polarity)
//! - Lifecycle state machine

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod framebuffer;
pub mod state;

pub use config::{
    cell_count_for_opcode, ChipSelectPolarity, ClockSource, CommonsMode, Ht1632Config, Role,
};
pub use framebuffer::{Framebuffer, FramebufferError, MAX_CELLS};
pub use state::{ChipState, LifecycleEvent};
