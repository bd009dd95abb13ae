use std::time::Duration;

/// Whole-second change observed while advancing a countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SecondChange {
    pub(crate) from: u64,
    pub(crate) to: u64,
}

/// Phase timer that reports truncated whole seconds as they change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Countdown {
    remaining: Duration,
    announced: u64,
}

impl Countdown {
    pub(crate) const fn new(total: Duration) -> Self {
        Self {
            remaining: total,
            announced: total.as_secs(),
        }
    }

    pub(crate) const fn seconds(&self) -> u64 {
        self.announced
    }

    pub(crate) const fn remaining(&self) -> Duration {
        self.remaining
    }

    pub(crate) const fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    pub(crate) fn advance(&mut self, dt: Duration) -> Option<SecondChange> {
        self.remaining = self.remaining.saturating_sub(dt);
        let seconds = self.remaining.as_secs();
        if seconds == self.announced {
            return None;
        }
        let change = SecondChange {
            from: self.announced,
            to: seconds,
        };
        self.announced = seconds;
        Some(change)
    }
}
