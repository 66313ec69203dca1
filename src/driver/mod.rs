//! Time and scheduling: the tick counter, the per-surface host and the fixed-interval driver.

/// Monotonic tick counter.
pub mod clock;
/// Surface host reacting to resize and tick events.
pub mod host;
/// Fixed-interval frame scheduler.
pub mod scheduler;
