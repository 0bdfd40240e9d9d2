//! HT1632 chip handle
//!
//! Owns the transport and the framebuffer for one chip and walks it through
//! its lifecycle:
//!
//! ```text
//! Uninitialized ─► Disabled ─► Configuring ─► Active ─► Closed
//! ```
//!
//! Bring-up sends SYS_DIS, the COM option, the role, the clock source,
//! SYS_EN, LED_ON, BLINK_OFF and the PWM duty, each as its own transaction,
//! then a blank frame.

use ht1632_core::{ChipState, ClockSource, Framebuffer, Ht1632Config, LifecycleEvent, Role};
use ht1632_hal::{BusLock, OutputPin, SpiBus};
use ht1632_protocol::command::PWM_DUTY_MASK;
use ht1632_protocol::Command;

use crate::error::Error;
use crate::transport::{Transport, TransportError};

/// Number of commands in the bring-up sequence
pub const BRING_UP_LEN: usize = 8;

/// Commands sent during bring-up, in order
pub fn bring_up_sequence(config: &Ht1632Config) -> [Command; BRING_UP_LEN] {
    let role = match config.role {
        Role::Master => Command::MasterMode,
        Role::Slave => Command::SlaveMode,
    };
    let clock = match config.clock {
        ClockSource::OnChipRc => Command::RcClock,
        ClockSource::External => Command::ExternalClock,
    };

    [
        Command::SystemDisable,
        Command::Commons(config.commons.opcode()),
        role,
        clock,
        Command::SystemEnable,
        Command::LedOn,
        Command::BlinkOff,
        Command::Pwm(config.default_brightness),
    ]
}

/// Driver handle for one HT1632
pub struct Ht1632<SPI, CS, L> {
    transport: Transport<SPI, CS, L>,
    framebuffer: Framebuffer,
    config: Ht1632Config,
    state: ChipState,
    brightness: u8,
}

impl<SPI, CS, L> Ht1632<SPI, CS, L>
where
    SPI: SpiBus,
    CS: OutputPin,
    L: BusLock,
{
    /// Claim the bus, size the framebuffer and bring the chip up
    ///
    /// On success the chip is enabled, showing a blank display, and the
    /// handle is [`ChipState::Active`]. On failure the bus, pin and lock are
    /// dropped.
    pub fn initialize(
        spi: SPI,
        cs: CS,
        lock: L,
        config: Ht1632Config,
    ) -> Result<Self, TransportError<SPI, CS>> {
        #[cfg(feature = "defmt")]
        defmt::info!("HT1632 bring-up: {}", config);

        let mut transport = Transport::new(spi, cs, lock, config.cs_polarity);
        transport.idle()?;

        let framebuffer = Framebuffer::for_mode(config.commons)?;

        let mut chip = Self {
            transport,
            framebuffer,
            config,
            state: ChipState::Uninitialized.transition(LifecycleEvent::TransportReady),
            brightness: 0,
        };
        chip.configure()?;

        #[cfg(feature = "defmt")]
        defmt::info!("HT1632 ready, {} cells", chip.framebuffer.len());

        Ok(chip)
    }

    fn configure(&mut self) -> Result<(), TransportError<SPI, CS>> {
        self.state = self.state.transition(LifecycleEvent::BeginConfiguration);

        for command in bring_up_sequence(&self.config) {
            #[cfg(feature = "defmt")]
            defmt::debug!("HT1632 command {}", command);
            self.send_command(command)?;
        }
        self.brightness = self.config.default_brightness & PWM_DUTY_MASK;

        self.framebuffer.clear();
        self.transmit_frame()?;

        self.state = self.state.transition(LifecycleEvent::ConfigurationComplete);
        Ok(())
    }

    /// Release the framebuffer; further transmissions fail with
    /// [`Error::Closed`]
    ///
    /// The SPI bus, chip-select pin and lock stay owned by the handle until
    /// it is dropped or [`release`](Self::release) hands them back. Calling
    /// it again has no effect.
    pub fn close(&mut self) {
        if self.state.is_closed() {
            return;
        }

        self.framebuffer.release();
        self.state = self.state.transition(LifecycleEvent::Close);

        #[cfg(feature = "defmt")]
        defmt::info!("HT1632 closed");
    }

    /// Close the handle and hand back the bus, pin and lock
    pub fn release(mut self) -> (SPI, CS, L) {
        self.close();
        self.transport.release()
    }

    /// Send one command word
    pub fn send_command(&mut self, command: Command) -> Result<(), TransportError<SPI, CS>> {
        if !self.state.transmit_allowed() {
            return Err(Error::Closed);
        }
        self.transport.send_command(command)
    }

    /// Push the whole framebuffer to the chip
    pub fn transmit_frame(&mut self) -> Result<(), TransportError<SPI, CS>> {
        if !self.state.transmit_allowed() {
            return Err(Error::Closed);
        }
        self.transport.send_frame(self.framebuffer.cells())
    }

    /// Set one LED bit in the framebuffer; out-of-range writes are ignored
    pub fn set_cell(&mut self, address: usize, bit: u8, value: bool) {
        self.framebuffer.set(address, bit, value);
    }

    /// Read one LED bit from the framebuffer
    pub fn get_cell(&self, address: usize, bit: u8) -> bool {
        self.framebuffer.get(address, bit)
    }

    /// Turn every framebuffer bit off without transmitting
    pub fn clear_framebuffer(&mut self) {
        self.framebuffer.clear();
    }

    /// Turn every framebuffer bit on or off without transmitting
    pub fn fill(&mut self, value: bool) {
        self.framebuffer.fill(value);
    }

    /// Set the PWM duty (0-15); higher bits are ignored
    pub fn set_brightness(&mut self, duty: u8) -> Result<(), TransportError<SPI, CS>> {
        let duty = duty & PWM_DUTY_MASK;
        self.send_command(Command::Pwm(duty))?;
        self.brightness = duty;
        Ok(())
    }

    /// Blink the whole display
    pub fn set_blink(&mut self, enabled: bool) -> Result<(), TransportError<SPI, CS>> {
        let command = if enabled {
            Command::BlinkOn
        } else {
            Command::BlinkOff
        };
        self.send_command(command)
    }

    /// Switch the LED duty generator on or off; RAM contents are kept
    pub fn set_leds_enabled(&mut self, enabled: bool) -> Result<(), TransportError<SPI, CS>> {
        let command = if enabled {
            Command::LedOn
        } else {
            Command::LedOff
        };
        self.send_command(command)
    }

    /// Last PWM duty sent
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn state(&self) -> ChipState {
        self.state
    }

    pub fn config(&self) -> &Ht1632Config {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }
}
