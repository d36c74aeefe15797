//! Stardust core engine: platform-agnostic logic for the cursor trail,
//! the follower, and lifecycle gating.

pub mod config;
pub mod follower;
pub mod gate;
pub mod particle;
pub mod preset;
pub mod scheduler;
pub mod session;
pub mod trail;

pub use config::{AppConfig, ConfigError};
pub use follower::{CursorFollower, FollowerConfig, FollowerVisuals, HoverTarget};
pub use gate::{Capabilities, EffectContext, GateDecision, LifecycleGate, MOBILE_BREAKPOINT};
pub use particle::{ExplosionFragment, LiquidDrop, Particle, ParticleId, ParticleInstance};
pub use preset::{LifetimeRule, SpawnRule, TrailPreset};
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{EffectSession, PointerState};
pub use trail::{TrailEmitter, TrailStats};
