//! Environment probe backed by the running egui context and the process env.

use stardust_platform::{EnvironmentProbe, Result, ViewportRect};

pub struct DesktopProbe {
    viewport: ViewportRect,
    reduced_motion: bool,
    coarse_pointer: bool,
}

impl DesktopProbe {
    pub fn sample(ctx: &egui::Context) -> Self {
        let rect = ctx.screen_rect();
        Self {
            viewport: ViewportRect {
                width: rect.width(),
                height: rect.height(),
                scale: ctx.pixels_per_point(),
            },
            reduced_motion: env_flag("STARDUST_REDUCED_MOTION"),
            coarse_pointer: env_flag("STARDUST_COARSE_POINTER"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl EnvironmentProbe for DesktopProbe {
    fn viewport(&self) -> Result<ViewportRect> {
        Ok(self.viewport)
    }

    fn user_agent(&self) -> String {
        std::env::var("STARDUST_USER_AGENT")
            .unwrap_or_else(|_| format!("stardust/{}", env!("CARGO_PKG_VERSION")))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn coarse_pointer(&self) -> bool {
        self.coarse_pointer
    }
}
