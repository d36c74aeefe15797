//! Platform abstraction traits so `stardust-core` stays toolkit-agnostic.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportRect {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// Snapshot of the environment the lifecycle gate evaluates at startup.
pub trait EnvironmentProbe: Send + Sync {
    fn viewport(&self) -> Result<ViewportRect>;
    fn user_agent(&self) -> String;
    fn prefers_reduced_motion(&self) -> bool;
    /// Touch-primary / no-hover pointing device.
    fn coarse_pointer(&self) -> bool;
}

/// Source of the raw project-catalog document.
pub trait ProjectSource: Send + Sync {
    fn fetch(&self) -> Result<String>;
}

/// Probe with fixed answers, for tests and configuration overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedProbe {
    pub viewport: ViewportRect,
    pub user_agent: String,
    pub reduced_motion: bool,
    pub coarse_pointer: bool,
}

impl Default for FixedProbe {
    fn default() -> Self {
        Self {
            viewport: ViewportRect {
                width: 1280.0,
                height: 800.0,
                scale: 1.0,
            },
            user_agent: String::from("stardust-desktop"),
            reduced_motion: false,
            coarse_pointer: false,
        }
    }
}

impl EnvironmentProbe for FixedProbe {
    fn viewport(&self) -> Result<ViewportRect> {
        Ok(self.viewport)
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn coarse_pointer(&self) -> bool {
        self.coarse_pointer
    }
}
