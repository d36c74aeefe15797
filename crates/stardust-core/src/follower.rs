//! Cursor follower: a dot and halo repositioned once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerConfig {
    pub dot_radius: f32,
    pub halo_radius: f32,
    /// Halo catch-up rate per second; the dot snaps to the pointer.
    pub halo_rate: f32,
    pub hover_scale: f32,
    pub press_scale: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            dot_radius: 10.0,
            halo_radius: 20.0,
            halo_rate: 12.0,
            hover_scale: 1.5,
            press_scale: 0.8,
        }
    }
}

/// Which kind of interactive target the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverTarget {
    #[default]
    None,
    /// Links, buttons, nav entries.
    Button,
    /// Gallery cards.
    Portfolio,
}

#[derive(Debug, Clone, Copy)]
pub struct FollowerVisuals {
    pub dot: Vec2,
    pub dot_radius: f32,
    pub halo: Vec2,
    pub halo_radius: f32,
    pub hover: HoverTarget,
    pub pressed: bool,
}

pub struct CursorFollower {
    config: FollowerConfig,
    target: Vec2,
    dot: Vec2,
    halo: Vec2,
    hover: HoverTarget,
    pressed: bool,
    /// Pointer inside the viewport; frame updates pause while it is not.
    active: bool,
    /// `disable()` hides the visuals without touching the rest of the state.
    visible: bool,
    has_sample: bool,
}

impl CursorFollower {
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            config,
            target: Vec2::ZERO,
            dot: Vec2::ZERO,
            halo: Vec2::ZERO,
            hover: HoverTarget::None,
            pressed: false,
            active: true,
            visible: true,
            has_sample: false,
        }
    }

    /// Only records the target; movement is applied by the next `frame`.
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.target = pos;
        if !self.has_sample {
            self.dot = pos;
            self.halo = pos;
            self.has_sample = true;
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.active = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.active = false;
    }

    pub fn on_press(&mut self) {
        self.pressed = true;
    }

    pub fn on_release(&mut self) {
        self.pressed = false;
    }

    pub fn set_hover(&mut self, hover: HoverTarget) {
        self.hover = hover;
    }

    pub fn enable(&mut self) {
        self.visible = true;
    }

    pub fn disable(&mut self) {
        self.visible = false;
    }

    /// Per-frame step. Any number of pointer events between frames still
    /// costs one reposition.
    pub fn frame(&mut self, dt: f32) {
        if !self.active || !self.has_sample {
            return;
        }
        self.dot = self.target;
        let t = (self.config.halo_rate * dt).clamp(0.0, 1.0);
        self.halo = self.halo.lerp(self.target, t);
    }

    pub fn visuals(&self) -> Option<FollowerVisuals> {
        if !self.visible || !self.has_sample {
            return None;
        }
        let scale = if self.pressed {
            self.config.press_scale
        } else if self.hover == HoverTarget::None {
            1.0
        } else {
            self.config.hover_scale
        };
        Some(FollowerVisuals {
            dot: self.dot,
            dot_radius: self.config.dot_radius * scale,
            halo: self.halo,
            halo_radius: self.config.halo_radius * scale,
            hover: self.hover,
            pressed: self.pressed,
        })
    }
}
