//! Camera / viewport transform and gesture handling.
//!
//! Maps between world units and device pixels, consumes pan and pinch
//! gestures, runs a deterministic fling drift, and clamps the view to
//! the world bounds plus an overscroll margin. The renderer applies
//! [`Camera::transform_params`] as translate(-x, -y) then scale(zoom)
//! about the origin, in that order.

use serde::{Deserialize, Serialize};

use stronghold_core::constants::*;
use stronghold_core::types::Vec2;

/// Raw pointer input, already projected to device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TouchEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Two-finger sample: midpoint and finger distance.
    Pinch { x: f64, y: f64, distance: f64 },
    PinchEnd,
}

/// The renderer-facing transform, also the save/load format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone)]
pub struct Camera {
    /// Screen-space scroll offset (device px).
    pos: Vec2,
    zoom: f64,
    world_size: Vec2,
    /// Overscroll allowance past each world edge (world units).
    margin: f64,
    /// Viewport size in device px.
    viewport: Vec2,
    /// Device px per world unit at zoom 1.0.
    world_scale: f64,
    fling: Vec2,
    anchor: Option<Vec2>,
    panning: bool,
    last_pan_delta: Vec2,
    pinch_distance: Option<f64>,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_bounds(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT), CAMERA_MARGIN)
    }

    /// Camera over a custom world extent and overscroll margin.
    pub fn with_bounds(world_size: Vec2, margin: f64) -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
            world_size,
            margin,
            viewport: Vec2::ZERO,
            world_scale: 1.0,
            fling: Vec2::ZERO,
            anchor: None,
            panning: false,
            last_pan_delta: Vec2::ZERO,
            pinch_distance: None,
        }
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
        self.clamp();
    }

    /// Device px per world unit at zoom 1.0, set once the display
    /// density is known.
    pub fn set_world_scale(&mut self, scale: f64) {
        self.world_scale = scale.max(f64::EPSILON);
        self.clamp();
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Translate by (-x, -y), then scale by zoom.
    pub fn transform_params(&self) -> CameraState {
        CameraState {
            x: self.pos.x,
            y: self.pos.y,
            zoom: self.zoom,
        }
    }

    pub fn save_state(&self) -> CameraState {
        self.transform_params()
    }

    /// Restore a saved transform. A state produced by `save_state` on a
    /// camera with the same viewport reproduces the view exactly.
    pub fn load_state(&mut self, state: CameraState) {
        self.pos = Vec2::new(state.x, state.y);
        self.zoom = state.zoom;
        self.fling = Vec2::ZERO;
        self.clamp();
    }

    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        (p + self.pos) / self.zoom / self.world_scale
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p * self.world_scale * self.zoom - self.pos
    }

    /// One frame of fling drift: displace by the fling velocity, decay
    /// it by friction, stop below the cutoff. Deterministic — no clock.
    pub fn auto_scroll(&mut self) {
        if self.fling.length() < AUTO_SCROLL_EPSILON {
            self.fling = Vec2::ZERO;
            return;
        }
        self.pos += self.fling;
        self.fling *= AUTO_SCROLL_FRICTION;
        self.clamp();
    }

    /// Feed one pointer event. Returns true when the camera consumed it;
    /// an unconsumed Down/Up pair is the caller's tap to dispatch.
    pub fn handle_touch_event(&mut self, event: &TouchEvent) -> bool {
        match *event {
            TouchEvent::Down { x, y } => {
                self.anchor = Some(Vec2::new(x, y));
                self.panning = false;
                self.last_pan_delta = Vec2::ZERO;
                // Touching the screen stops any running fling.
                self.fling = Vec2::ZERO;
                false
            }
            TouchEvent::Move { x, y } => {
                let Some(anchor) = self.anchor else {
                    return false;
                };
                let p = Vec2::new(x, y);
                let delta = p - anchor;
                if !self.panning && delta.length() <= TOUCH_SLOP {
                    // Still within tap tolerance.
                    return false;
                }
                self.panning = true;
                // Dragging moves the world with the finger.
                self.pos -= delta;
                self.last_pan_delta = delta;
                self.anchor = Some(p);
                self.clamp();
                true
            }
            TouchEvent::Up { .. } => {
                let was_panning = self.panning;
                if was_panning {
                    self.fling = -self.last_pan_delta;
                }
                self.anchor = None;
                self.panning = false;
                was_panning
            }
            TouchEvent::Pinch { x, y, distance } => {
                let center = Vec2::new(x, y);
                let Some(prev) = self.pinch_distance else {
                    self.pinch_distance = Some(distance);
                    self.anchor = None;
                    self.panning = false;
                    return true;
                };
                if prev > 0.0 && distance > 0.0 {
                    // Keep the world point under the pinch midpoint
                    // stationary while the zoom changes.
                    let focus = self.screen_to_world(center);
                    self.zoom = (self.zoom * distance / prev).clamp(ZOOM_MIN, ZOOM_MAX);
                    self.pos = focus * self.world_scale * self.zoom - center;
                    self.clamp();
                }
                self.pinch_distance = Some(distance);
                true
            }
            TouchEvent::PinchEnd => {
                self.pinch_distance = None;
                self.anchor = None;
                self.panning = false;
                true
            }
        }
    }

    fn clamp(&mut self) {
        self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let scale = self.world_scale * self.zoom;
        let lo = Vec2::splat(-self.margin) * scale;
        let hi = (self.world_size + Vec2::splat(self.margin)) * scale - self.viewport;
        self.pos.x = clamp_axis(self.pos.x, lo.x, hi.x);
        self.pos.y = clamp_axis(self.pos.y, lo.y, hi.y);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp to [lo, hi]; when the range is inverted (content smaller than
/// the viewport) settle on its midpoint instead.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo {
        (lo + hi) * 0.5
    } else {
        v.clamp(lo, hi)
    }
}
