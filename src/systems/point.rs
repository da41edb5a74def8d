//! Point masses
//!
//! Verlet particles: velocity lives implicitly in the gap between the
//! current and previous position. Pinned points (grapple anchors) are
//! never moved by integration, relaxation or bounds clamping; only their
//! owner may relocate them.

use crate::core::vec2::Vec2;

pub struct PointMass {
    pub pos: Vec2,
    pub prev: Vec2,
    pub pinned: bool,
}

/// Contact report from a world-bounds clamp. `speed` is the pre-clamp
/// velocity magnitude, so the frontend can scale shake and sparks.
#[derive(Clone, Copy, Debug)]
pub struct BoundsImpact {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl PointMass {
    pub fn new(x: f64, y: f64) -> Self {
        Self { pos: Vec2::new(x, y), prev: Vec2::new(x, y), pinned: false }
    }

    pub fn pinned_at(x: f64, y: f64) -> Self {
        Self { pos: Vec2::new(x, y), prev: Vec2::new(x, y), pinned: true }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev
    }

    /// One Verlet step. Gravity and damping are per-tick quantities.
    pub fn integrate(&mut self, gravity: f64, damping: f64) {
        if self.pinned {
            return;
        }
        let vel = (self.pos - self.prev) * damping;
        self.prev = self.pos;
        self.pos = self.pos + vel;
        self.pos.y += gravity;
    }

    /// Clamp to the world rectangle, reflecting the previous position so
    /// the outgoing velocity along each violated axis is `-bounce` times
    /// the incoming one.
    pub fn resolve_world_bounds(
        &mut self,
        width: f64,
        height: f64,
        damping: f64,
        bounce: f64,
    ) -> Option<BoundsImpact> {
        if self.pinned {
            return None;
        }
        let vel = (self.pos - self.prev) * damping;
        let mut collided = false;

        if self.pos.x > width {
            self.pos.x = width;
            self.prev.x = self.pos.x + vel.x * bounce;
            collided = true;
        } else if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.prev.x = self.pos.x + vel.x * bounce;
            collided = true;
        }
        if self.pos.y > height {
            self.pos.y = height;
            self.prev.y = self.pos.y + vel.y * bounce;
            collided = true;
        } else if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.prev.y = self.pos.y + vel.y * bounce;
            collided = true;
        }

        collided.then(|| BoundsImpact { x: self.pos.x, y: self.pos.y, speed: vel.length() })
    }
}
