//! Round timers.
//!
//! A round owns a [`Countdown`] of whole seconds. The arcade owns at most one
//! [`Metronome`], which turns elapsed milliseconds from the front-end loop into
//! one-second pulses tagged with a [`TimerId`]. Replacing the metronome is the
//! cancellation: pulses tagged with an older id are ignored.

use crate::types::TICK_MS;

/// Identity of one armed metronome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

impl TimerId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Whole-second countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Take one second off. Returns true on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn reset(&mut self, secs: u32) {
        self.remaining = secs;
    }
}

/// Repeating pulse, one per `period_ms` of accumulated time.
#[derive(Debug, Clone)]
pub struct Metronome {
    id: TimerId,
    period_ms: u32,
    accum_ms: u32,
}

impl Metronome {
    pub fn new(id: TimerId) -> Self {
        Self::with_period(id, TICK_MS)
    }

    pub fn with_period(id: TimerId, period_ms: u32) -> Self {
        Self {
            id,
            period_ms: period_ms.max(1),
            accum_ms: 0,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Feed elapsed time; returns how many pulses fell due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        let pulses = self.accum_ms / self.period_ms;
        self.accum_ms %= self.period_ms;
        pulses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once_at_zero() {
        let mut c = Countdown::new(2);
        assert!(!c.tick());
        assert_eq!(c.remaining(), 1);
        assert!(c.tick());
        assert!(c.is_expired());
        // Further ticks are inert.
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn countdown_reset() {
        let mut c = Countdown::new(1);
        c.tick();
        c.reset(15);
        assert_eq!(c.remaining(), 15);
    }

    #[test]
    fn metronome_accumulates_partial_periods() {
        let mut m = Metronome::new(TimerId::new(1));
        assert_eq!(m.advance(400), 0);
        assert_eq!(m.advance(400), 0);
        assert_eq!(m.advance(400), 1);
        assert_eq!(m.advance(2_800), 3);
    }

    #[test]
    fn metronome_zero_period_is_clamped() {
        let mut m = Metronome::with_period(TimerId::new(1), 0);
        assert_eq!(m.advance(3), 3);
    }
}
