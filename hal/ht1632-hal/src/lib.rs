//! HT1632 Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits the HT1632 driver consumes. Any
//! host HAL that can clock bytes out over SPI and toggle a GPIO line can
//! drive the chip by implementing them (or by wrapping its `embedded-hal`
//! types in the [`compat`] adapters).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ht1632-drivers (lifecycle, framing)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ht1632-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-hal │       │  board HAL /  │
//! │  via compat   │       │  test mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - Write-only SPI master
//! - [`gpio::OutputPin`] - Chip-select line
//! - [`lock::BusLock`] - Exclusive access to a shared bus for one transaction

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod lock;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use lock::{BusLock, SharedBusLock};
pub use spi::SpiBus;
