//! Slide transition state machine, one per carousel
//!
//! A carousel is either `Idle` or `Transitioning`. Starting a transition
//! takes the carousel's lock; any request that arrives while the lock is held
//! is dropped, not queued. The lock is released by [`TransitionCoordinator::poll`]
//! once the slide duration has elapsed.

use std::time::{Duration, Instant};

use super::pagination::Direction;

/// Default slide duration
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(400);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Transitioning { started: Instant, direction: Direction },
}

/// Result of asking a carousel to change page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The page changed and a slide started
    Advanced { page: usize },
    /// A slide is in flight, or nothing is loaded yet
    Ignored,
    /// Fewer items than one page beyond the hero
    Disabled,
}

#[derive(Clone, Debug)]
pub struct TransitionCoordinator {
    state: TransitionState,
    duration: Duration,
}

impl TransitionCoordinator {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: TransitionState::Idle,
            duration,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    /// Take the lock and start a slide. Returns false if already locked.
    pub fn begin(&mut self, direction: Direction, now: Instant) -> bool {
        if self.is_locked() {
            return false;
        }
        self.state = TransitionState::Transitioning { started: now, direction };
        true
    }

    /// Release the lock once the slide has run its course.
    /// Returns true on the poll that completes the transition.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TransitionState::Transitioning { started, .. }
                if now.saturating_duration_since(started) >= self.duration =>
            {
                self.state = TransitionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any in-flight slide, as on unmount.
    pub fn reset(&mut self) {
        self.state = TransitionState::Idle;
    }

    /// Fraction of the slide completed, 1.0 when idle.
    pub fn progress(&self, now: Instant) -> f32 {
        match self.state {
            TransitionState::Idle => 1.0,
            TransitionState::Transitioning { started, .. } => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }

    /// Horizontal offset of the incoming page for a row `width` cells wide.
    ///
    /// Forward travel enters from the right (positive offset), backward from
    /// the left. Zero at rest.
    pub fn incoming_offset(&self, width: u16, now: Instant) -> i32 {
        match self.state {
            TransitionState::Idle => 0,
            TransitionState::Transitioning { direction, .. } => {
                let remaining = 1.0 - ease_out(self.progress(now));
                let shift = (f32::from(width) * remaining).round() as i32;
                match direction {
                    Direction::Forward => shift,
                    Direction::Backward => -shift,
                }
            }
        }
    }

    /// Horizontal offset of the page being left behind, mirrored from the
    /// incoming one: it leaves towards the side opposite to travel.
    pub fn outgoing_offset(&self, width: u16, now: Instant) -> i32 {
        match self.state {
            TransitionState::Idle => 0,
            TransitionState::Transitioning { direction, .. } => {
                let done = ease_out(self.progress(now));
                let shift = (f32::from(width) * done).round() as i32;
                match direction {
                    Direction::Forward => -shift,
                    Direction::Backward => shift,
                }
            }
        }
    }
}

impl Default for TransitionCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}
