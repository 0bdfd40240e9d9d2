//! Chip lifecycle
//!
//! The driver handle moves through these states as it is brought up, used
//! and closed. Transitions are a pure function of the current state and an
//! event; anything not listed leaves the state unchanged.

/// Lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipState {
    /// Bus not yet claimed
    #[default]
    Uninitialized,
    /// Bus claimed and framebuffer sized; chip not yet configured
    Disabled,
    /// Bring-up command sequence in progress
    Configuring,
    /// Ready for frame and command traffic
    Active,
    /// Framebuffer released; no further traffic
    Closed,
}

/// Events driving the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    /// CS driven idle and framebuffer allocated
    TransportReady,
    /// First bring-up command about to be sent
    BeginConfiguration,
    /// Bring-up commands and blank frame sent
    ConfigurationComplete,
    /// Handle closed by the caller
    Close,
}

impl ChipState {
    /// Process an event and return the next state
    pub fn transition(self, event: LifecycleEvent) -> Self {
        use ChipState::*;
        use LifecycleEvent::*;

        match (self, event) {
            (Uninitialized, TransportReady) => Disabled,
            (Disabled, BeginConfiguration) => Configuring,
            (Configuring, ConfigurationComplete) => Active,

            // Close is accepted from anywhere once the bus is claimed
            (Disabled | Configuring | Active, Close) => Closed,

            _ => self,
        }
    }

    /// Check if commands and frames may be sent
    pub fn transmit_allowed(&self) -> bool {
        matches!(self, ChipState::Configuring | ChipState::Active)
    }

    /// Check if the bring-up sequence has finished
    pub fn is_active(&self) -> bool {
        matches!(self, ChipState::Active)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ChipState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bring_up_flow() {
        let state = ChipState::default();
        assert_eq!(state, ChipState::Uninitialized);

        let disabled = state.transition(LifecycleEvent::TransportReady);
        assert_eq!(disabled, ChipState::Disabled);

        let configuring = disabled.transition(LifecycleEvent::BeginConfiguration);
        assert_eq!(configuring, ChipState::Configuring);

        let active = configuring.transition(LifecycleEvent::ConfigurationComplete);
        assert_eq!(active, ChipState::Active);

        let closed = active.transition(LifecycleEvent::Close);
        assert_eq!(closed, ChipState::Closed);
    }

    #[test]
    fn test_close_is_terminal() {
        let closed = ChipState::Closed;
        for event in [
            LifecycleEvent::TransportReady,
            LifecycleEvent::BeginConfiguration,
            LifecycleEvent::ConfigurationComplete,
            LifecycleEvent::Close,
        ] {
            assert_eq!(closed.transition(event), ChipState::Closed);
        }
    }

    #[test]
    fn test_no_skipping_states() {
        assert_eq!(
            ChipState::Uninitialized.transition(LifecycleEvent::ConfigurationComplete),
            ChipState::Uninitialized
        );
        assert_eq!(
            ChipState::Disabled.transition(LifecycleEvent::ConfigurationComplete),
            ChipState::Disabled
        );
        assert_eq!(
            ChipState::Active.transition(LifecycleEvent::BeginConfiguration),
            ChipState::Active
        );
        // Nothing was claimed, so there is nothing to close
        assert_eq!(
            ChipState::Uninitialized.transition(LifecycleEvent::Close),
            ChipState::Uninitialized
        );
    }

    #[test]
    fn test_close_from_partial_bring_up() {
        assert_eq!(
            ChipState::Disabled.transition(LifecycleEvent::Close),
            ChipState::Closed
        );
        assert_eq!(
            ChipState::Configuring.transition(LifecycleEvent::Close),
            ChipState::Closed
        );
    }

    #[test]
    fn test_transmit_allowed() {
        assert!(ChipState::Configuring.transmit_allowed());
        assert!(ChipState::Active.transmit_allowed());
        assert!(!ChipState::Uninitialized.transmit_allowed());
        assert!(!ChipState::Disabled.transmit_allowed());
        assert!(!ChipState::Closed.transmit_allowed());
    }
}
