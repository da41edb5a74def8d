//! Discrete signals
//!
//! Everything the frontend reacts to with sound or particles arrives
//! here: buffered during ticks, drained once per render frame as a JSON
//! array. Each variant fires at most once per triggering event per tick.

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorldEvent {
    /// The body died; carries each point's last position for the burst.
    Death { points: Vec<[f64; 2]> },
    Pickup { x: f64, y: f64 },
    LevelComplete,
    GrappleAttached { x: f64, y: f64 },
    GrappleFailed,
    /// A point hit the world edge hard enough to matter.
    BoundsImpact { x: f64, y: f64, speed: f64 },
}
