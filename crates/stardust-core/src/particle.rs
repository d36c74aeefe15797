//! Transient effect entities and their packed render form.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::scheduler::TaskHandle;

/// Identity of a tracked trail particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(pub u64);

/// Corner shapes the morph sub-effect cycles through.
pub const MORPH_SHAPES: [[f32; 4]; 6] = [
    [0.6, 0.4, 0.7, 0.3],
    [0.4, 0.6, 0.5, 0.8],
    [0.7, 0.3, 0.6, 0.4],
    [0.8, 0.2, 0.9, 0.1],
    [0.5, 0.5, 0.4, 0.6],
    [0.9, 0.1, 0.8, 0.2],
];

/// One cursor-trail particle. Owned exclusively by the emitter's active
/// list; position over time is derived from the drift chain, not simulated.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: Vec2,
    pub color: Vec4,
    pub radius: f32,
    /// Cumulative drift targets; the presentation interpolates through them
    /// for a wandering rather than linear path.
    pub drift: Vec<Vec2>,
    pub spawned_at: f64,
    pub lifetime: f32,
    pub morph_index: Option<usize>,
    pub(crate) ttl_task: TaskHandle,
    pub(crate) morph_task: Option<TaskHandle>,
}

impl Particle {
    /// Age as a 0..1 fraction of the lifetime.
    pub fn age(&self, now: f64) -> f32 {
        (((now - self.spawned_at) / f64::from(self.lifetime)).clamp(0.0, 1.0)) as f32
    }

    /// Display position at `now`: a piecewise-linear walk through the chain.
    pub fn display_pos(&self, now: f64) -> Vec2 {
        if self.drift.is_empty() {
            return self.pos;
        }
        let scaled = self.age(now) * self.drift.len() as f32;
        let idx = (scaled.floor() as usize).min(self.drift.len() - 1);
        let frac = (scaled - idx as f32).clamp(0.0, 1.0);
        let prev = if idx == 0 {
            Vec2::ZERO
        } else {
            self.drift[idx - 1]
        };
        self.pos + prev.lerp(self.drift[idx], frac)
    }

    pub fn instance(&self, now: f64) -> ParticleInstance {
        let age = self.age(now);
        let wobble = self
            .morph_index
            .map_or(1.0, |i| 0.75 + 0.5 * MORPH_SHAPES[i % MORPH_SHAPES.len()][0]);
        let mut color = self.color.to_array();
        color[3] *= 1.0 - age;
        ParticleInstance {
            pos: self.display_pos(now).to_array(),
            radius: self.radius * wobble,
            age,
            color,
        }
    }
}

/// Secondary droplet spawned alongside some trail particles.
#[derive(Debug, Clone)]
pub struct LiquidDrop {
    pub id: u64,
    pub pos: Vec2,
    pub color: Vec4,
    pub radius: f32,
    pub spawned_at: f64,
    pub lifetime: f32,
}

impl LiquidDrop {
    pub fn age(&self, now: f64) -> f32 {
        (((now - self.spawned_at) / f64::from(self.lifetime)).clamp(0.0, 1.0)) as f32
    }

    pub fn instance(&self, now: f64) -> ParticleInstance {
        let age = self.age(now);
        let mut color = self.color.to_array();
        color[3] *= 1.0 - age;
        ParticleInstance {
            pos: self.pos.to_array(),
            radius: self.radius * (1.0 - 0.5 * age),
            age,
            color,
        }
    }
}

/// Click-burst fragment, placed on a circle around the click point.
#[derive(Debug, Clone)]
pub struct ExplosionFragment {
    pub id: u64,
    pub pos: Vec2,
    pub color: Vec4,
    pub spawned_at: f64,
    pub lifetime: f32,
}

impl ExplosionFragment {
    pub fn age(&self, now: f64) -> f32 {
        (((now - self.spawned_at) / f64::from(self.lifetime)).clamp(0.0, 1.0)) as f32
    }

    pub fn instance(&self, now: f64) -> ParticleInstance {
        let age = self.age(now);
        let mut color = self.color.to_array();
        color[3] *= 1.0 - age;
        ParticleInstance {
            pos: self.pos.to_array(),
            radius: 6.0 * (1.0 - age),
            age,
            color,
        }
    }
}

/// Packed per-frame render instance handed to the presentation layer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 2],
    pub radius: f32,
    /// 0..1 fraction of the entity's lifetime.
    pub age: f32,
    pub color: [f32; 4],
}
