//! Startup gating and the owning context for the effect controllers.

use glam::Vec2;
use tracing::{info, warn};

use stardust_platform::EnvironmentProbe;

use crate::follower::{CursorFollower, FollowerConfig, HoverTarget};
use crate::preset::TrailPreset;
use crate::trail::TrailEmitter;

pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// User-agent fragments marking a mobile/touch device.
const MOBILE_AGENT_MARKERS: &[&str] = &[
    "Android",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

/// Environment snapshot the gate evaluates once at startup.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub viewport_width: f32,
    pub user_agent: String,
    pub coarse_pointer: bool,
    pub reduced_motion: bool,
}

impl Capabilities {
    pub fn from_probe(probe: &dyn EnvironmentProbe) -> Self {
        let viewport_width = match probe.viewport() {
            Ok(viewport) => viewport.width,
            Err(err) => {
                // an unreadable viewport gates the effects off, nothing more
                warn!("viewport query failed: {err}");
                0.0
            }
        };
        Self {
            viewport_width,
            user_agent: probe.user_agent(),
            coarse_pointer: probe.coarse_pointer(),
            reduced_motion: probe.prefers_reduced_motion(),
        }
    }

    pub fn mobile(&self) -> bool {
        self.viewport_width <= MOBILE_BREAKPOINT
            || MOBILE_AGENT_MARKERS
                .iter()
                .any(|marker| self.user_agent.contains(marker))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GateDecision {
    pub trail: bool,
    pub follower: bool,
}

pub struct LifecycleGate {
    caps: Capabilities,
}

impl LifecycleGate {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    pub fn evaluate(&self, preset: &TrailPreset) -> GateDecision {
        let mobile = self.caps.mobile();
        let follower = !mobile;
        let trail = !mobile
            && !self.caps.coarse_pointer
            && !(self.caps.reduced_motion && preset.rich());
        info!(
            mobile,
            coarse_pointer = self.caps.coarse_pointer,
            reduced_motion = self.caps.reduced_motion,
            trail,
            follower,
            "lifecycle gate evaluated"
        );
        GateDecision { trail, follower }
    }

    /// Builds the owning context. Gated-off controllers are never
    /// constructed at all.
    pub fn build_context(&self, preset: TrailPreset, follower: FollowerConfig) -> EffectContext {
        let decision = self.evaluate(&preset);
        EffectContext::new(decision, preset, follower)
    }
}

/// Owns the controllers for one page lifetime. Whoever constructs the
/// context queries and tears it down; there is no global instance.
pub struct EffectContext {
    trail_preset: Option<TrailPreset>,
    trail: Option<TrailEmitter>,
    follower: Option<CursorFollower>,
    running: bool,
    region_visible: bool,
    seed: Option<u64>,
}

impl EffectContext {
    fn new(decision: GateDecision, preset: TrailPreset, follower: FollowerConfig) -> Self {
        Self {
            trail_preset: decision.trail.then_some(preset),
            trail: None,
            follower: decision.follower.then(|| CursorFollower::new(follower)),
            running: true,
            region_visible: false,
            seed: None,
        }
    }

    /// Deterministic emitter construction, for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Lazily constructs the region-bound trail on first visibility and
    /// tears it down when the region leaves view. Reconstruction on
    /// re-entry starts from the same state as a fresh launch.
    pub fn on_region_visibility(&mut self, visible: bool) {
        if visible == self.region_visible {
            return;
        }
        self.region_visible = visible;
        if visible {
            if self.trail.is_none() {
                if let Some(preset) = self.trail_preset.clone() {
                    info!(preset = %preset.name, "region visible, constructing trail emitter");
                    let emitter = match self.seed {
                        Some(seed) => {
                            TrailEmitter::with_rng(preset, fastrand::Rng::with_seed(seed))
                        }
                        None => TrailEmitter::new(preset),
                    };
                    self.trail = Some(emitter);
                }
            }
        } else if let Some(mut emitter) = self.trail.take() {
            emitter.teardown();
            info!("region hidden, trail emitter released");
        }
    }

    /// Tab hidden: stop the frame loop entirely. Resuming does not re-run
    /// the static gates.
    pub fn on_page_visibility(&mut self, visible: bool) {
        if visible == self.running {
            return;
        }
        self.running = visible;
        if let Some(trail) = self.trail.as_mut() {
            trail.set_page_visible(visible);
        }
    }

    /// Frame callbacks should only be requested while this holds.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, now: f64) {
        if let Some(trail) = self.trail.as_mut() {
            trail.on_pointer_move(pos, now);
        }
        if let Some(follower) = self.follower.as_mut() {
            follower.on_pointer_move(pos);
        }
    }

    pub fn on_click(&mut self, pos: Vec2, now: f64) {
        if let Some(trail) = self.trail.as_mut() {
            trail.on_click(pos, now);
        }
    }

    pub fn on_press(&mut self) {
        if let Some(follower) = self.follower.as_mut() {
            follower.on_press();
        }
    }

    pub fn on_release(&mut self) {
        if let Some(follower) = self.follower.as_mut() {
            follower.on_release();
        }
    }

    pub fn on_pointer_enter(&mut self) {
        if let Some(follower) = self.follower.as_mut() {
            follower.on_pointer_enter();
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(follower) = self.follower.as_mut() {
            follower.on_pointer_leave();
        }
    }

    /// Pointer hovering the bound region; gates trail spawning.
    pub fn set_region_hover(&mut self, hover: bool) {
        if let Some(trail) = self.trail.as_mut() {
            trail.set_region_hover(hover);
        }
    }

    pub fn set_hover(&mut self, target: HoverTarget) {
        if let Some(follower) = self.follower.as_mut() {
            follower.set_hover(target);
        }
    }

    /// One cooperative frame step for everything this context owns.
    pub fn frame(&mut self, now: f64, dt: f32) {
        if !self.running {
            return;
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.advance(now);
        }
        if let Some(follower) = self.follower.as_mut() {
            follower.frame(dt);
        }
    }

    pub fn trail(&self) -> Option<&TrailEmitter> {
        self.trail.as_ref()
    }

    pub fn follower(&self) -> Option<&CursorFollower> {
        self.follower.as_ref()
    }

    pub fn follower_mut(&mut self) -> Option<&mut CursorFollower> {
        self.follower.as_mut()
    }

    /// Everything currently on screen, visuals of both controllers.
    pub fn active_visuals(&self, now: f64) -> usize {
        let trail = self
            .trail
            .as_ref()
            .map_or(0, |t| t.instances(now).len());
        let follower = self
            .follower
            .as_ref()
            .and_then(|f| f.visuals())
            .map_or(0, |_| 2);
        trail + follower
    }

    pub fn teardown(&mut self) {
        self.running = false;
        if let Some(mut trail) = self.trail.take() {
            trail.teardown();
        }
        self.follower = None;
        info!("effect context torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_caps() -> Capabilities {
        Capabilities {
            viewport_width: 1280.0,
            user_agent: "stardust/0.1".into(),
            coarse_pointer: false,
            reduced_motion: false,
        }
    }

    fn context(caps: Capabilities, preset: TrailPreset) -> EffectContext {
        LifecycleGate::new(caps)
            .build_context(preset, FollowerConfig::default())
            .with_seed(7)
    }

    #[test]
    fn capabilities_come_from_the_probe() {
        use stardust_platform::FixedProbe;
        let mut probe = FixedProbe::default();
        let caps = Capabilities::from_probe(&probe);
        assert!(!caps.mobile());
        probe.viewport.width = 500.0;
        let caps = Capabilities::from_probe(&probe);
        assert!(caps.mobile());
    }

    #[test]
    fn narrow_viewport_constructs_nothing() {
        let mut caps = desktop_caps();
        caps.viewport_width = 768.0;
        let mut ctx = context(caps, TrailPreset::holi());
        ctx.on_region_visibility(true);
        ctx.set_region_hover(true);
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        assert!(ctx.trail().is_none());
        assert!(ctx.follower().is_none());
        assert_eq!(ctx.active_visuals(0.0), 0);
    }

    #[test]
    fn mobile_user_agent_constructs_nothing() {
        let mut caps = desktop_caps();
        caps.user_agent = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".into();
        let mut ctx = context(caps, TrailPreset::holi());
        ctx.on_region_visibility(true);
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(ctx.active_visuals(0.0), 0);
    }

    #[test]
    fn reduced_motion_blocks_only_the_rich_preset() {
        let mut caps = desktop_caps();
        caps.reduced_motion = true;
        let gate = LifecycleGate::new(caps);
        let rich = gate.evaluate(&TrailPreset::aurora());
        assert!(!rich.trail);
        assert!(rich.follower);
        let plain = gate.evaluate(&TrailPreset::holi());
        assert!(plain.trail);
    }

    #[test]
    fn coarse_pointer_blocks_the_trail() {
        let mut caps = desktop_caps();
        caps.coarse_pointer = true;
        let decision = LifecycleGate::new(caps).evaluate(&TrailPreset::holi());
        assert!(!decision.trail);
        assert!(decision.follower);
    }

    #[test]
    fn region_visibility_drives_lazy_construction_and_teardown() {
        let mut ctx = context(desktop_caps(), TrailPreset::holi());
        assert!(ctx.trail().is_none());

        ctx.on_region_visibility(true);
        ctx.set_region_hover(true);
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(ctx.trail().unwrap().active_len(), 1);

        ctx.on_region_visibility(false);
        assert!(ctx.trail().is_none());

        // re-entry reconstructs a fresh emitter, bound exactly once
        ctx.on_region_visibility(true);
        assert_eq!(ctx.trail().unwrap().active_len(), 0);
        ctx.set_region_hover(true);
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 1.0);
        assert_eq!(ctx.trail().unwrap().active_len(), 1);
    }

    #[test]
    fn hidden_page_stops_the_frame_loop_and_spawning() {
        let mut ctx = context(desktop_caps(), TrailPreset::holi());
        ctx.on_region_visibility(true);
        ctx.set_region_hover(true);
        ctx.on_page_visibility(false);
        assert!(!ctx.is_running());
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(ctx.trail().unwrap().active_len(), 0);

        // resume without re-running the static gates
        ctx.on_page_visibility(true);
        assert!(ctx.is_running());
        ctx.on_pointer_move(Vec2::new(12.0, 10.0), 0.1);
        assert_eq!(ctx.trail().unwrap().active_len(), 1);
    }

    #[test]
    fn teardown_empties_the_context() {
        let mut ctx = context(desktop_caps(), TrailPreset::aurora());
        ctx.on_region_visibility(true);
        ctx.set_region_hover(true);
        ctx.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        ctx.teardown();
        assert!(ctx.trail().is_none());
        assert!(ctx.follower().is_none());
        assert_eq!(ctx.active_visuals(0.0), 0);
    }
}
