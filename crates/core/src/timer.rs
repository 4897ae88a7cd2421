//! Session countdown, driven by external one-second ticks.

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown is paused or already expired; nothing changed.
    Idle,
    /// One second elapsed and time remains.
    Ticked { remaining_secs: u32 },
    /// The countdown reached zero. Emitted once per activation cycle.
    Expired,
}

/// A countdown from a fixed initial duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    initial_secs: u32,
    remaining_secs: u32,
    active: bool,
    expired: bool,
}

impl Countdown {
    /// A countdown that starts active.
    #[must_use]
    pub fn new(initial_secs: u32) -> Self {
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            active: true,
            expired: false,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn initial_secs(&self) -> u32 {
        self.initial_secs
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Pause or resume. Toggling does not re-arm an expired countdown.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Start a new activation cycle from the initial duration.
    pub fn reset(&mut self) {
        self.remaining_secs = self.initial_secs;
        self.expired = false;
        self.active = true;
    }

    /// Advance by one real-time second.
    pub fn tick(&mut self) -> TimerEvent {
        if !self.active || self.expired {
            return TimerEvent::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.expired = true;
            self.active = false;
            TimerEvent::Expired
        } else {
            TimerEvent::Ticked {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    /// `mm:ss` rendering of the remaining time.
    #[must_use]
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format seconds as `mm:ss`.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
