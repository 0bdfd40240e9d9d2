//! Driver configuration
//!
//! Everything here is chosen once, when the driver is brought up, and stays
//! fixed for the lifetime of the handle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ht1632_protocol::command::{COM_16_NMOS, COM_16_PMOS, COM_8_NMOS, COM_8_PMOS, PWM_DUTY_MASK};

/// Framebuffer length used when the commons opcode is not recognised
pub const DEFAULT_CELL_COUNT: usize = 96;

/// Cells addressable with 8 commons (32 ROWs x 8 COMs / 4 bits)
pub const CELLS_8_COMMONS: usize = 64;

/// Cells addressable with 16 commons (24 ROWs x 16 COMs / 4 bits)
pub const CELLS_16_COMMONS: usize = 96;

/// COM output wiring
///
/// Selects how many common lines the chip scans and the polarity of the
/// common drivers. NMOS/PMOS variants of the same size behave identically
/// as far as the framebuffer is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommonsMode {
    /// 8 commons, N-MOS open drain
    Nmos8,
    /// 8 commons, P-MOS open drain
    Pmos8,
    /// 16 commons, N-MOS open drain
    #[default]
    Nmos16,
    /// 16 commons, P-MOS open drain
    Pmos16,
}

impl CommonsMode {
    /// Parse from the COM-option command code
    pub fn from_opcode(code: u8) -> Option<Self> {
        match code {
            COM_8_NMOS => Some(CommonsMode::Nmos8),
            COM_8_PMOS => Some(CommonsMode::Pmos8),
            COM_16_NMOS => Some(CommonsMode::Nmos16),
            COM_16_PMOS => Some(CommonsMode::Pmos16),
            _ => None,
        }
    }

    /// COM-option command code
    pub fn opcode(self) -> u8 {
        match self {
            CommonsMode::Nmos8 => COM_8_NMOS,
            CommonsMode::Pmos8 => COM_8_PMOS,
            CommonsMode::Nmos16 => COM_16_NMOS,
            CommonsMode::Pmos16 => COM_16_PMOS,
        }
    }

    /// Number of common lines scanned
    pub fn commons(self) -> u8 {
        match self {
            CommonsMode::Nmos8 | CommonsMode::Pmos8 => 8,
            CommonsMode::Nmos16 | CommonsMode::Pmos16 => 16,
        }
    }

    /// Framebuffer length for this wiring
    pub fn cell_count(self) -> usize {
        match self {
            CommonsMode::Nmos8 | CommonsMode::Pmos8 => CELLS_8_COMMONS,
            CommonsMode::Nmos16 | CommonsMode::Pmos16 => CELLS_16_COMMONS,
        }
    }
}

/// Framebuffer length for a raw COM-option code
///
/// Unrecognised codes keep [`DEFAULT_CELL_COUNT`].
pub fn cell_count_for_opcode(code: u8) -> usize {
    CommonsMode::from_opcode(code).map_or(DEFAULT_CELL_COUNT, CommonsMode::cell_count)
}

/// System clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockSource {
    /// On-chip 256 kHz RC oscillator
    #[default]
    OnChipRc,
    /// Clock fed into the OSC pin
    External,
}

/// Role when several chips are cascaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Drives the SYNC line
    #[default]
    Master,
    /// Follows another chip's SYNC and clock
    Slave,
}

/// Level of the chip-select line during a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChipSelectPolarity {
    /// CS is driven high while a transaction is in progress
    #[default]
    ActiveHigh,
    /// CS is driven low while a transaction is in progress (bare chip)
    ActiveLow,
}

impl ChipSelectPolarity {
    /// Pin level that selects the chip
    pub fn asserted_level(self) -> bool {
        matches!(self, ChipSelectPolarity::ActiveHigh)
    }

    /// Pin level between transactions
    pub fn idle_level(self) -> bool {
        !self.asserted_level()
    }
}

/// HT1632 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ht1632Config {
    /// COM wiring; fixes the framebuffer length
    pub commons: CommonsMode,
    /// Clock source selected during bring-up
    pub clock: ClockSource,
    /// Master or slave
    pub role: Role,
    /// Chip-select polarity
    pub cs_polarity: ChipSelectPolarity,
    /// PWM duty sent during bring-up (0-15)
    pub default_brightness: u8,
}

impl Default for Ht1632Config {
    fn default() -> Self {
        Self::new(CommonsMode::default())
    }
}

impl Ht1632Config {
    /// Configuration for the given wiring with every other option at its
    /// default
    pub const fn new(commons: CommonsMode) -> Self {
        Self {
            commons,
            clock: ClockSource::OnChipRc,
            role: Role::Master,
            cs_polarity: ChipSelectPolarity::ActiveHigh,
            default_brightness: 0,
        }
    }

    /// Use a different clock source
    pub const fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different role
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Use a different chip-select polarity
    pub const fn with_cs_polarity(mut self, polarity: ChipSelectPolarity) -> Self {
        self.cs_polarity = polarity;
        self
    }

    /// Use a different bring-up brightness; only the low 4 bits are kept
    pub const fn with_brightness(mut self, duty: u8) -> Self {
        self.default_brightness = duty & PWM_DUTY_MASK;
        self
    }

    /// Framebuffer length implied by the commons mode
    pub fn cell_count(&self) -> usize {
        self.commons.cell_count()
    }
}
