//! Blocking driver for HT1632 LED-matrix controllers
//!
//! This crate ties the pieces together:
//!
//! - [`transport`] - Transaction guard (bus lock + chip-select around writes)
//! - [`chip`] - Driver handle: bring-up, frame transmission, close
//! - [`error`] - Driver error type
//!
//! # Example
//!
//! ```ignore
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use ht1632_core::{CommonsMode, Ht1632Config};
//! use ht1632_drivers::Ht1632;
//! use ht1632_hal::lock::{shared_bus_lock, SharedBusLock};
//!
//! static BUS_LOCK: SharedBusLock<CriticalSectionRawMutex> = shared_bus_lock();
//!
//! let config = Ht1632Config::new(CommonsMode::Nmos16);
//! let mut display = Ht1632::initialize(spi, cs, &BUS_LOCK, config)?;
//!
//! display.set_cell(0, 0, true);
//! display.transmit_frame()?;
//! display.set_brightness(8)?;
//! display.close();
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod chip;
pub mod error;
pub mod transport;

pub use chip::{bring_up_sequence, Ht1632};
pub use error::Error;
pub use transport::{Transport, TransportError};
