//! Trail presets: palette, spawn, and lifetime tuning for one emitter.

use glam::Vec4;
use serde::{Deserialize, Serialize};

fn hex(rgb: u32) -> Vec4 {
    Vec4::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    )
}

/// How many particles one pointer-move event produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpawnRule {
    /// Exactly one per qualifying move.
    PerMove,
    /// Batch size derived from pointer velocity, one batch per throttle tick.
    Velocity {
        divisor: f32,
        max_batch: u32,
        throttle: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifetimeRule {
    Fixed(f32),
    /// `max(min, base - velocity / divisor)` seconds: faster pointer motion
    /// makes shorter-lived particles.
    VelocityScaled { base: f32, divisor: f32, min: f32 },
}

impl LifetimeRule {
    pub fn seconds(&self, velocity: f32) -> f32 {
        match *self {
            LifetimeRule::Fixed(seconds) => seconds,
            LifetimeRule::VelocityScaled { base, divisor, min } => {
                (base - velocity / divisor).max(min)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailPreset {
    pub name: String,
    pub max_particles: usize,
    pub spawn: SpawnRule,
    pub lifetime: LifetimeRule,
    pub palette: Vec<Vec4>,
    /// Size classes a spawn picks from, in px.
    pub sizes: Vec<f32>,
    /// Random positional offset around the pointer at spawn.
    pub spawn_jitter: f32,
    /// Number of drift targets per particle.
    pub drift_steps: usize,
    /// Horizontal half-range of each drift step.
    pub drift_spread: f32,
    /// Vertical range of each drift step; negative is upward.
    pub drift_lift: (f32, f32),
    pub liquid_drop_chance: f32,
    pub morphing: bool,
    pub sweep_interval: f32,
}

impl TrailPreset {
    /// The rich controller: velocity-scaled batches, drops, morphing.
    pub fn aurora() -> Self {
        Self {
            name: "Aurora".into(),
            max_particles: 150,
            spawn: SpawnRule::Velocity {
                divisor: 10.0,
                max_batch: 5,
                throttle: 0.016,
            },
            lifetime: LifetimeRule::VelocityScaled {
                base: 4.0,
                divisor: 80.0,
                min: 2.0,
            },
            palette: vec![
                hex(0xff006e),
                hex(0x8338ec),
                hex(0x3a86ff),
                hex(0x06ffa5),
                hex(0xffbe0b),
                hex(0xfb5607),
                hex(0xff4d6d),
                hex(0x7209b7),
            ],
            sizes: vec![2.0, 3.0, 4.5, 6.0, 8.0],
            spawn_jitter: 15.0,
            drift_steps: 1,
            drift_spread: 150.0,
            drift_lift: (-205.0, 45.0),
            liquid_drop_chance: 0.4,
            morphing: true,
            sweep_interval: 0.1,
        }
    }

    /// The lightweight controller: one particle per move, small pool.
    pub fn holi() -> Self {
        Self {
            name: "Holi".into(),
            max_particles: 25,
            spawn: SpawnRule::PerMove,
            lifetime: LifetimeRule::Fixed(2.0),
            palette: vec![
                hex(0xe63946),
                hex(0xff70a6),
                hex(0xff9f1c),
                hex(0xffd60a),
                hex(0x38b000),
                hex(0x3a86ff),
                hex(0x8338ec),
                hex(0xff006e),
            ],
            sizes: vec![2.5, 4.0, 6.0],
            spawn_jitter: 0.0,
            drift_steps: 4,
            drift_spread: 20.0,
            drift_lift: (-40.0, -10.0),
            liquid_drop_chance: 0.0,
            morphing: false,
            sweep_interval: 0.1,
        }
    }

    /// Rich presets carry the motion-heavy secondary effects and are the
    /// ones a reduced-motion preference suppresses.
    pub fn rich(&self) -> bool {
        self.morphing || self.liquid_drop_chance > 0.0
    }
}

impl Default for TrailPreset {
    fn default() -> Self {
        Self::aurora()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_scaling_shortens_lifetime() {
        let rule = LifetimeRule::VelocityScaled {
            base: 4.0,
            divisor: 80.0,
            min: 2.0,
        };
        assert_eq!(rule.seconds(0.0), 4.0);
        assert_eq!(rule.seconds(80.0), 3.0);
        // very fast motion bottoms out at the minimum
        assert_eq!(rule.seconds(1000.0), 2.0);
    }

    #[test]
    fn presets_round_trip_through_toml() {
        for preset in [TrailPreset::aurora(), TrailPreset::holi()] {
            let text = toml::to_string(&preset).unwrap();
            let back: TrailPreset = toml::from_str(&text).unwrap();
            assert_eq!(back.name, preset.name);
            assert_eq!(back.max_particles, preset.max_particles);
            assert_eq!(back.palette.len(), preset.palette.len());
        }
    }

    #[test]
    fn holi_is_not_rich() {
        assert!(TrailPreset::aurora().rich());
        assert!(!TrailPreset::holi().rich());
    }
}
