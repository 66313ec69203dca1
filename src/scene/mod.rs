/// Palette and config color notation.
pub mod color;
/// Per-frame composition of the animated scene.
pub mod compose;
/// Static shape library.
pub mod geometry;
/// Explicit save/restore transform stack.
pub mod painter;
/// Display list emitted per frame.
pub mod plan;
/// World window to device mapping.
pub mod viewport;
