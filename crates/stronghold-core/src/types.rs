//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in world units. x grows to the right, y grows downward
/// (screen convention, matching the renderer's coordinate space).
pub use glam::DVec2 as Vec2;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning `size` from a top-left corner.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + size.x,
            bottom: pos.y + size.y,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Strict interior test — points exactly on the edge do not count,
    /// so adjacent units never both claim a shared boundary.
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.left < p.x && p.x < self.right && self.top < p.y && p.y < self.bottom
    }

    /// Full containment of `other` inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && other.right <= self.right
            && self.top <= other.top
            && other.bottom <= self.bottom
    }

    /// Overlap test (edges exclusive).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Positioned, sized footprint of a unit.
///
/// The cached center and hit rectangle are recomputed by every mutator,
/// so they can never disagree with the position. Fields are private for
/// exactly that reason — all movement goes through [`Body::translate`]
/// or [`Body::move_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pos: Vec2,
    size: Vec2,
    center: Vec2,
    hit_rect: Rect,
}

impl Body {
    /// Build from a top-left corner and size.
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        let mut body = Self {
            pos,
            size,
            center: Vec2::ZERO,
            hit_rect: Rect::default(),
        };
        body.refresh();
        body
    }

    /// Build from a center point and size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size * 0.5, size)
    }

    /// Top-left corner.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Displace by `delta`, recomputing center and hit rect.
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
        self.refresh();
    }

    /// Move the top-left corner to `pos`, recomputing center and hit rect.
    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.center = self.pos + self.size * 0.5;
        self.hit_rect = Rect::from_pos_size(self.pos, self.size);
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Logic tick counter (increments once per `GameWorld::tick` while active).
    pub tick: u64,
    /// Wall-clock seconds of play, advanced by the world-clock timer.
    pub world_time_secs: u64,
}
