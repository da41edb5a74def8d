//! Grapple rope
//!
//! A successful fire pushes a pinned anchor point and a Rope constraint
//! from the firing hand to the anchor. Both are pushed last and stay the
//! tail of the active arrays until released, so release is a truncate
//! and never disturbs the body's indices.

/// Slow-motion dip applied when a rope attaches.
pub const SLOWMO_TIMESCALE: f64 = 0.2;
/// Linear timescale recovery per raw wall-clock millisecond.
pub const SLOWMO_RAMP_PER_MS: f64 = 0.001;

#[derive(Clone, Copy, Debug)]
pub struct Grapple {
    /// Index of the anchor in the point array.
    pub anchor: usize,
    /// Index of the rope in the constraint array.
    pub rope: usize,
}
