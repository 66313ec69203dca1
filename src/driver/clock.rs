use serde::{Deserialize, Serialize};

/// Frame counter driving every time-varying rotation and translation in the scene.
///
/// Starts at zero and only ever moves forward by one per tick. Objects derive their motion from
/// the counter modulo their own period.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AnimationClock(u64);

impl AnimationClock {
    /// Clock at tick zero.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Clock positioned at `ticks`, for rendering a specific frame offline.
    pub const fn at(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Ticks elapsed.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Ticks as `f64`, for angle and offset arithmetic.
    pub fn ticks_f64(self) -> f64 {
        self.0 as f64
    }

    /// Position within a cycle of `period` ticks.
    pub const fn phase(self, period: u64) -> u64 {
        self.0 % period
    }

    /// Advance by exactly one tick.
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}
