//! Command words for the HT1632 serial interface.
//!
//! Every command is one 16-bit word:
//!
//! ```text
//! ┌────────┬─────────────────┬──────────┐
//! │ ID 100 │ COMMAND CODE    │ PADDING  │
//! │ 3 bits │ 8 bits          │ 5 bits   │
//! └────────┴─────────────────┴──────────┘
//!  MSB                              LSB
//! ```
//!
//! The chip clocks the most-significant byte in first, so the word is
//! byte-swapped before it is handed to a little-endian bus buffer.

/// 3-bit ID for command mode (`100`)
pub const ID_COMMAND: u8 = 0b100;
/// 3-bit ID for RAM reads (`110`); defined for completeness, never issued
pub const ID_READ: u8 = 0b110;
/// 3-bit ID for RAM writes (`101`)
pub const ID_WRITE: u8 = 0b101;

/// ID field width in bits
pub const ID_LEN: u32 = 3;
/// Command code width in bits
pub const COMMAND_LEN: u32 = 8;
/// RAM address width in bits
pub const ADDRESS_LEN: u32 = 7;
/// Zero bits trailing the command code in a 16-bit command word
pub const COMMAND_PADDING: u32 = 16 - ID_LEN - COMMAND_LEN;

// Command codes (datasheet notation: 8 code bits, trailing X omitted)
/// Turn off system oscillator and LED duty cycle generator
pub const SYS_DIS: u8 = 0x00;
/// Turn on system oscillator
pub const SYS_EN: u8 = 0x01;
/// Turn off LED duty cycle generator
pub const LED_OFF: u8 = 0x02;
/// Turn on LED duty cycle generator
pub const LED_ON: u8 = 0x03;
/// Turn off blinking
pub const BLINK_OFF: u8 = 0x08;
/// Turn on blinking
pub const BLINK_ON: u8 = 0x09;
/// Slave mode, clock and sync signals taken from the master
pub const SLAVE_MODE: u8 = 0x10;
/// Master mode, on-chip RC oscillator drives the sync output
pub const MASTER_MODE: u8 = 0x14;
/// Use the on-chip RC oscillator
pub const RC_CLOCK: u8 = 0x18;
/// Use an external clock source
pub const EXT_CLOCK: u8 = 0x1C;
/// COM option: 8 commons, N-MOS open drain outputs
pub const COM_8_NMOS: u8 = 0x20;
/// COM option: 16 commons, N-MOS open drain outputs
pub const COM_16_NMOS: u8 = 0x24;
/// COM option: 8 commons, P-MOS open drain outputs
pub const COM_8_PMOS: u8 = 0x28;
/// COM option: 16 commons, P-MOS open drain outputs
pub const COM_16_PMOS: u8 = 0x2C;
/// PWM duty cycle; low nibble carries the duty (0 = 1/16 .. 15 = 16/16)
pub const PWM: u8 = 0xA0;

/// Mask for the 4-bit PWM duty value
pub const PWM_DUTY_MASK: u8 = 0x0F;

/// A chip command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Stop the oscillator and the LED duty generator
    SystemDisable,
    /// Start the oscillator
    SystemEnable,
    /// Stop driving the LEDs
    LedOff,
    /// Drive the LEDs
    LedOn,
    /// Stop blinking
    BlinkOff,
    /// Blink the whole display
    BlinkOn,
    /// Take clock and sync from a master chip
    SlaveMode,
    /// Act as master
    MasterMode,
    /// Clock from the on-chip RC oscillator
    RcClock,
    /// Clock from the OSC pin
    ExternalClock,
    /// COM option (one of the `COM_*` codes)
    Commons(u8),
    /// PWM duty, masked to 4 bits on encode
    Pwm(u8),
}

impl Command {
    /// Parse a command from its 8-bit code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            SYS_DIS => Some(Command::SystemDisable),
            SYS_EN => Some(Command::SystemEnable),
            LED_OFF => Some(Command::LedOff),
            LED_ON => Some(Command::LedOn),
            BLINK_OFF => Some(Command::BlinkOff),
            BLINK_ON => Some(Command::BlinkOn),
            SLAVE_MODE => Some(Command::SlaveMode),
            MASTER_MODE => Some(Command::MasterMode),
            RC_CLOCK => Some(Command::RcClock),
            EXT_CLOCK => Some(Command::ExternalClock),
            COM_8_NMOS | COM_16_NMOS | COM_8_PMOS | COM_16_PMOS => Some(Command::Commons(code)),
            c if c & !PWM_DUTY_MASK == PWM => Some(Command::Pwm(c & PWM_DUTY_MASK)),
            _ => None,
        }
    }

    /// Convert to the 8-bit command code
    pub fn code(self) -> u8 {
        match self {
            Command::SystemDisable => SYS_DIS,
            Command::SystemEnable => SYS_EN,
            Command::LedOff => LED_OFF,
            Command::LedOn => LED_ON,
            Command::BlinkOff => BLINK_OFF,
            Command::BlinkOn => BLINK_ON,
            Command::SlaveMode => SLAVE_MODE,
            Command::MasterMode => MASTER_MODE,
            Command::RcClock => RC_CLOCK,
            Command::ExternalClock => EXT_CLOCK,
            Command::Commons(code) => code,
            Command::Pwm(duty) => PWM | (duty & PWM_DUTY_MASK),
        }
    }

    /// Encode into a command word
    pub fn word(self) -> CommandWord {
        CommandWord::encode(self.code())
    }
}

/// Encoded 16-bit command word, numeric (unswapped) form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandWord(u16);

impl CommandWord {
    /// Build the word for an 8-bit command code
    pub const fn encode(code: u8) -> Self {
        let mut word = ID_COMMAND as u16;
        word <<= COMMAND_LEN;
        word |= code as u16;
        word <<= COMMAND_PADDING;
        Self(word)
    }

    /// Numeric value, ID in the top three bits
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Command code carried by this word
    pub const fn code(self) -> u8 {
        (self.0 >> COMMAND_PADDING) as u8
    }

    /// Value with its two bytes exchanged
    pub const fn swapped(self) -> u16 {
        swap_bytes(self.0)
    }

    /// Bytes in transmission order
    pub const fn to_wire(self) -> [u8; 2] {
        word_to_wire(self.0)
    }
}

/// Exchange the two bytes of a 16-bit word
///
/// Applying it twice returns the original word.
pub const fn swap_bytes(word: u16) -> u16 {
    word.swap_bytes()
}

/// Lay out a 16-bit protocol word for the bus
///
/// The swapped word is stored in host order, which puts the numeric high
/// byte first on the wire regardless of the host's endianness.
pub const fn word_to_wire(word: u16) -> [u8; 2] {
    swap_bytes(word).to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_command_word_layout() {
        // 100 0000-0000 00000
        assert_eq!(CommandWord::encode(SYS_DIS).value(), 0b1000_0000_0000_0000);
        // 100 0000-0001 00000
        assert_eq!(CommandWord::encode(SYS_EN).value(), 0b1000_0000_0010_0000);
        // 100 0000-0011 00000
        assert_eq!(CommandWord::encode(LED_ON).value(), 0b1000_0000_0110_0000);
        // 100 0001-0100 00000
        assert_eq!(CommandWord::encode(MASTER_MODE).value(), 0b1000_0010_1000_0000);
        // 100 1010-1111 00000
        assert_eq!(CommandWord::encode(PWM | 0x0F).value(), 0b1001_0101_1110_0000);
    }

    #[test]
    fn test_wire_order_is_msb_first() {
        let word = CommandWord::encode(COM_16_NMOS);
        assert_eq!(word.value(), 0x8480);
        assert_eq!(word.swapped(), 0x8084);
        assert_eq!(word.to_wire(), [0x84, 0x80]);
    }

    #[test]
    fn test_code_roundtrip_through_word() {
        for code in [SYS_DIS, SYS_EN, LED_ON, BLINK_OFF, RC_CLOCK, COM_8_PMOS, PWM | 7] {
            assert_eq!(CommandWord::encode(code).code(), code);
        }
    }

    #[test]
    fn test_command_codes() {
        assert_eq!(Command::SystemDisable.code(), 0x00);
        assert_eq!(Command::BlinkOn.code(), 0x09);
        assert_eq!(Command::ExternalClock.code(), 0x1C);
        assert_eq!(Command::Commons(COM_8_NMOS).code(), 0x20);
        assert_eq!(Command::Pwm(15).code(), 0xAF);
    }

    #[test]
    fn test_pwm_duty_is_masked() {
        assert_eq!(Command::Pwm(0x1F).code(), 0xAF);
        assert_eq!(Command::Pwm(0xF3).code(), 0xA3);
        assert_eq!(Command::Pwm(16).code(), 0xA0);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Command::from_code(0x14), Some(Command::MasterMode));
        assert_eq!(Command::from_code(0x2C), Some(Command::Commons(COM_16_PMOS)));
        assert_eq!(Command::from_code(0xA5), Some(Command::Pwm(5)));
        assert_eq!(Command::from_code(0x55), None);
    }

    proptest! {
        #[test]
        fn prop_swap_is_involution(word in any::<u16>()) {
            prop_assert_eq!(swap_bytes(swap_bytes(word)), word);
        }

        #[test]
        fn prop_command_word_has_command_id(code in any::<u8>()) {
            let word = CommandWord::encode(code);
            prop_assert_eq!(word.value() >> 13, ID_COMMAND as u16);
            prop_assert_eq!(word.value() & 0x1F, 0);
            prop_assert_eq!(word.to_wire()[0], (word.value() >> 8) as u8);
        }
    }
}
