//! Pointer sampling and the session gate shared by the effect controllers.

use glam::Vec2;

/// Last and current pointer coordinates plus derived scalar velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub last: Vec2,
    pub current: Vec2,
    has_sample: bool,
}

impl PointerState {
    /// Records a sample and returns the velocity against the previous one
    /// (Euclidean distance between consecutive samples).
    pub fn sample(&mut self, pos: Vec2) -> f32 {
        if !self.has_sample {
            self.last = pos;
            self.current = pos;
            self.has_sample = true;
            return 0.0;
        }
        self.last = self.current;
        self.current = pos;
        self.current.distance(self.last)
    }
}

/// Whether effects are currently allowed to produce new work. Recomputed
/// from environment signals; never persisted.
#[derive(Debug, Clone, Copy)]
pub struct EffectSession {
    region_hover: bool,
    page_visible: bool,
    enabled: bool,
}

impl Default for EffectSession {
    fn default() -> Self {
        Self {
            region_hover: false,
            page_visible: true,
            enabled: true,
        }
    }
}

impl EffectSession {
    pub fn is_active(&self) -> bool {
        self.enabled && self.page_visible && self.region_hover
    }

    pub fn set_region_hover(&mut self, hover: bool) {
        self.region_hover = hover;
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        self.page_visible = visible;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_zero_velocity() {
        let mut pointer = PointerState::default();
        assert_eq!(pointer.sample(Vec2::new(50.0, 50.0)), 0.0);
        assert_eq!(pointer.sample(Vec2::new(53.0, 54.0)), 5.0);
    }

    #[test]
    fn session_requires_all_signals() {
        let mut session = EffectSession::default();
        assert!(!session.is_active());
        session.set_region_hover(true);
        assert!(session.is_active());
        session.set_page_visible(false);
        assert!(!session.is_active());
        session.set_page_visible(true);
        session.set_enabled(false);
        assert!(!session.is_active());
    }
}
