//! City selection state machine (Auto city vs. user-browsed preset).
//!
//! Transitions are pure: the caller passes the sampled button event (if any)
//! and the current instant, and gets the next state back.

use std::time::{Duration, Instant};

use crate::error::ConfigError;

/// Idle time after which a manual selection reverts to the Auto city.
pub const MANUAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Discrete input sampled once per loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Previous,
    Next,
    Home,
}

/// Fixed parameters of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    slot_count: usize,
    home_index: usize,
    timeout: Duration,
}

impl ModeConfig {
    pub fn new(slot_count: usize, home_index: usize, timeout: Duration) -> Result<Self, ConfigError> {
        if slot_count == 0 {
            return Err(ConfigError::Invalid("at least one city slot is required".into()));
        }
        if home_index >= slot_count {
            return Err(ConfigError::Invalid(format!(
                "home slot {} out of range for {} slots",
                home_index, slot_count
            )));
        }
        Ok(Self {
            slot_count,
            home_index,
            timeout,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn home_index(&self) -> usize {
        self.home_index
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Current selection. `Default` always shows slot 0 (Auto).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Default,
    Manual {
        index: usize,
        last_interaction: Instant,
    },
}

impl ModeState {
    /// Selected slot index.
    pub fn index(self) -> usize {
        match self {
            ModeState::Default => 0,
            ModeState::Manual { index, .. } => index,
        }
    }

    pub fn is_manual(self) -> bool {
        matches!(self, ModeState::Manual { .. })
    }

    /// State after a button press. Every button enters (or stays in) Manual.
    pub fn on_button(self, event: ButtonEvent, config: &ModeConfig, now: Instant) -> Self {
        let n = config.slot_count;
        let current = self.index() % n;
        let index = match event {
            ButtonEvent::Previous => (current + n - 1) % n,
            ButtonEvent::Next => (current + 1) % n,
            ButtonEvent::Home => config.home_index,
        };
        ModeState::Manual {
            index,
            last_interaction: now,
        }
    }

    /// State after a tick with no button press.
    pub fn on_idle(self, config: &ModeConfig, now: Instant) -> Self {
        match self {
            ModeState::Manual {
                last_interaction, ..
            } if now.saturating_duration_since(last_interaction) >= config.timeout => {
                ModeState::Default
            }
            other => other,
        }
    }

    /// One loop tick. A button press seen in this tick wins over an expired timeout.
    pub fn step(self, event: Option<ButtonEvent>, config: &ModeConfig, now: Instant) -> Self {
        match event {
            Some(event) => self.on_button(event, config, now),
            None => self.on_idle(config, now),
        }
    }
}
