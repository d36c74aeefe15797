//! Cursor-trail particle emitter: spawning, capacity eviction, retirement.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::{debug, info, warn};

use crate::particle::{
    ExplosionFragment, LiquidDrop, Particle, ParticleId, ParticleInstance, MORPH_SHAPES,
};
use crate::preset::{SpawnRule, TrailPreset};
use crate::scheduler::Scheduler;
use crate::session::{EffectSession, PointerState};

/// Fragments per click burst, spread evenly on a circle.
const BURST_FRAGMENTS: usize = 12;
const BURST_RADIUS: (f32, f32) = (50.0, 80.0);
const BURST_LIFETIME: f32 = 0.6;
/// Bursts draw from the head of the palette only.
const BURST_PALETTE: usize = 5;

const DROP_LIFETIME: f32 = 1.5;
const DROP_RADIUS: (f32, f32) = (3.0, 11.0);

/// Morphing starts after a random slice of this delay.
const MORPH_DELAY: f32 = 0.5;
const MORPH_STEP: (f32, f32) = (0.2, 0.5);
/// Morph tasks clear themselves after this long regardless of whether the
/// particle is still around; a step against a gone particle is a no-op.
const MORPH_TIMEOUT: f32 = 4.0;

/// A sweep only drops entries this far past their lifetime, so it never
/// races a retirement task due in the same drain.
const STALE_SLACK: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailTask {
    Retire(ParticleId),
    Morph(ParticleId),
    MorphStep(ParticleId),
    RetireDrop(u64),
    RetireFragment(u64),
    Sweep,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrailStats {
    pub spawned: u64,
    pub retired: u64,
    pub evicted: u64,
    pub swept: u64,
}

pub struct TrailEmitter {
    preset: TrailPreset,
    session: EffectSession,
    pointer: PointerState,
    particles: VecDeque<Particle>,
    drops: Vec<LiquidDrop>,
    fragments: Vec<ExplosionFragment>,
    scheduler: Scheduler<TrailTask>,
    stats: TrailStats,
    last_batch_at: f64,
    next_id: u64,
    rng: fastrand::Rng,
}

impl TrailEmitter {
    pub fn new(preset: TrailPreset) -> Self {
        Self::with_rng(preset, fastrand::Rng::new())
    }

    pub fn with_rng(preset: TrailPreset, rng: fastrand::Rng) -> Self {
        let mut scheduler = Scheduler::new();
        let sweep = f64::from(preset.sweep_interval);
        scheduler.repeating(sweep, sweep, TrailTask::Sweep);
        info!(
            preset = %preset.name,
            max = preset.max_particles,
            "trail emitter ready"
        );
        Self {
            preset,
            session: EffectSession::default(),
            pointer: PointerState::default(),
            particles: VecDeque::new(),
            drops: Vec::new(),
            fragments: Vec::new(),
            scheduler,
            stats: TrailStats::default(),
            last_batch_at: f64::NEG_INFINITY,
            next_id: 1,
            rng,
        }
    }

    /// Pointer-move entry point. Inactive sessions still track the pointer
    /// but spawn nothing.
    pub fn on_pointer_move(&mut self, pos: Vec2, now: f64) {
        let velocity = self.pointer.sample(pos);
        if !self.session.is_active() {
            return;
        }
        let count = match self.preset.spawn {
            SpawnRule::PerMove => 1,
            SpawnRule::Velocity {
                divisor,
                max_batch,
                throttle,
            } => {
                if now - self.last_batch_at < f64::from(throttle) {
                    return;
                }
                self.last_batch_at = now;
                ((velocity / divisor) as u32).saturating_add(1).min(max_batch)
            }
        };
        for _ in 0..count {
            self.spawn_particle(pos, velocity, now);
        }
    }

    /// Click burst: a fixed ring of short-lived fragments, outside the main
    /// pool's capacity bound.
    pub fn on_click(&mut self, pos: Vec2, now: f64) {
        if !self.session.is_active() {
            return;
        }
        let palette_len = self.preset.palette.len().min(BURST_PALETTE).max(1);
        for i in 0..BURST_FRAGMENTS {
            let angle = i as f32 / BURST_FRAGMENTS as f32 * std::f32::consts::TAU;
            let distance = self.range(BURST_RADIUS.0, BURST_RADIUS.1);
            let color = self.preset.palette[self.rng.usize(0..palette_len)];
            let id = self.next_id;
            self.next_id += 1;
            self.fragments.push(ExplosionFragment {
                id,
                pos: pos + Vec2::new(angle.cos(), angle.sin()) * distance,
                color,
                spawned_at: now,
                lifetime: BURST_LIFETIME,
            });
            self.scheduler
                .once(now + f64::from(BURST_LIFETIME), TrailTask::RetireFragment(id));
        }
        debug!("click burst at ({}, {})", pos.x, pos.y);
    }

    /// Drains every scheduled task due at `now`, applying each at the time
    /// it was meant to run.
    pub fn advance(&mut self, now: f64) {
        for (due, task) in self.scheduler.drain_due(now) {
            self.apply(task, due);
        }
    }

    fn apply(&mut self, task: TrailTask, now: f64) {
        match task {
            TrailTask::Retire(id) => {
                self.retire(id);
            }
            TrailTask::Morph(id) => self.begin_morph(id, now),
            TrailTask::MorphStep(id) => {
                // Harmless when the particle was evicted before the timeout.
                if let Some(p) = self.particles.iter_mut().find(|p| p.id == id) {
                    p.morph_index = Some(p.morph_index.map_or(0, |i| (i + 1) % MORPH_SHAPES.len()));
                }
            }
            TrailTask::RetireDrop(id) => self.drops.retain(|d| d.id != id),
            TrailTask::RetireFragment(id) => self.fragments.retain(|f| f.id != id),
            TrailTask::Sweep => self.sweep(now),
        }
    }

    fn spawn_particle(&mut self, pos: Vec2, velocity: f32, now: f64) {
        if self.preset.max_particles == 0 {
            return;
        }
        while self.particles.len() >= self.preset.max_particles {
            self.evict_oldest();
        }

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let jitter = self.preset.spawn_jitter;
        let spawn_pos = pos + Vec2::new(self.range(-jitter, jitter), self.range(-jitter, jitter));
        let color_idx = self.rng.usize(0..self.preset.palette.len());
        let color = self.preset.palette[color_idx];
        let size_idx = self.rng.usize(0..self.preset.sizes.len());
        let radius = self.preset.sizes[size_idx];
        let lifetime = self.preset.lifetime.seconds(velocity);

        // Wandering path: every drift target offsets the previous one by a
        // fresh random delta.
        let steps = self.preset.drift_steps;
        let spread = self.preset.drift_spread;
        let lift = self.preset.drift_lift;
        let mut drift = Vec::with_capacity(steps);
        let mut acc = Vec2::ZERO;
        for _ in 0..steps {
            acc += Vec2::new(self.range(-spread, spread), self.range(lift.0, lift.1));
            drift.push(acc);
        }

        let ttl_task = self
            .scheduler
            .once(now + f64::from(lifetime), TrailTask::Retire(id));
        let morph_task = if self.preset.morphing {
            let delay = f64::from(self.range(0.0, MORPH_DELAY));
            Some(self.scheduler.once(now + delay, TrailTask::Morph(id)))
        } else {
            None
        };

        self.particles.push_back(Particle {
            id,
            pos: spawn_pos,
            color,
            radius,
            drift,
            spawned_at: now,
            lifetime,
            morph_index: None,
            ttl_task,
            morph_task,
        });
        self.stats.spawned += 1;

        let drop_chance = self.preset.liquid_drop_chance;
        if drop_chance > 0.0 && self.rng.f32() < drop_chance {
            self.spawn_drop(spawn_pos, now);
        }
    }

    fn spawn_drop(&mut self, pos: Vec2, now: f64) {
        let id = self.next_id;
        self.next_id += 1;
        let radius = self.range(DROP_RADIUS.0, DROP_RADIUS.1);
        let color_idx = self.rng.usize(0..self.preset.palette.len());
        self.drops.push(LiquidDrop {
            id,
            pos,
            color: self.preset.palette[color_idx],
            radius,
            spawned_at: now,
            lifetime: DROP_LIFETIME,
        });
        self.scheduler
            .once(now + f64::from(DROP_LIFETIME), TrailTask::RetireDrop(id));
    }

    /// Oldest-first eviction keeps the pool bounded under fast motion. The
    /// evicted particle's retirement task is cancelled; its morph task, if
    /// any, runs out its fixed timeout harmlessly.
    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.particles.pop_front() {
            self.scheduler.cancel(oldest.ttl_task);
            self.stats.evicted += 1;
        }
    }

    /// Removes a particle from the tracking list. Idempotent: a second call
    /// for the same id finds nothing and reports `false`.
    fn retire(&mut self, id: ParticleId) -> bool {
        let Some(idx) = self.particles.iter().position(|p| p.id == id) else {
            return false;
        };
        if let Some(particle) = self.particles.remove(idx) {
            self.scheduler.cancel(particle.ttl_task);
            self.stats.retired += 1;
        }
        true
    }

    fn begin_morph(&mut self, id: ParticleId, now: f64) {
        if !self.particles.iter().any(|p| p.id == id) {
            return;
        }
        let step = f64::from(self.range(MORPH_STEP.0, MORPH_STEP.1));
        let handle = self.scheduler.repeating_until(
            now + step,
            step,
            now + f64::from(MORPH_TIMEOUT),
            TrailTask::MorphStep(id),
        );
        if let Some(p) = self.particles.iter_mut().find(|p| p.id == id) {
            p.morph_task = Some(handle);
        }
    }

    /// Reconciles the tracking list against lost retirement tasks: anything
    /// well past its lifetime is dropped here instead.
    fn sweep(&mut self, now: f64) {
        let stale: Vec<ParticleId> = self
            .particles
            .iter()
            .filter(|p| now - p.spawned_at > f64::from(p.lifetime) + STALE_SLACK)
            .map(|p| p.id)
            .collect();
        if stale.is_empty() {
            return;
        }
        warn!(count = stale.len(), "sweep dropped stale particles");
        for id in stale {
            if let Some(idx) = self.particles.iter().position(|p| p.id == id) {
                if let Some(particle) = self.particles.remove(idx) {
                    self.scheduler.cancel(particle.ttl_task);
                    self.stats.swept += 1;
                }
            }
        }
    }

    /// Releases every owned entity and pending task.
    pub fn teardown(&mut self) {
        let dropped = self.particles.len() + self.drops.len() + self.fragments.len();
        self.particles.clear();
        self.drops.clear();
        self.fragments.clear();
        self.scheduler.clear();
        self.session.set_region_hover(false);
        info!(dropped, "trail emitter torn down");
    }

    /// Packed render instances for everything currently alive.
    pub fn instances(&self, now: f64) -> Vec<ParticleInstance> {
        let mut out =
            Vec::with_capacity(self.particles.len() + self.drops.len() + self.fragments.len());
        out.extend(self.particles.iter().map(|p| p.instance(now)));
        out.extend(self.drops.iter().map(|d| d.instance(now)));
        out.extend(self.fragments.iter().map(|f| f.instance(now)));
        out
    }

    pub fn set_region_hover(&mut self, hover: bool) {
        self.session.set_region_hover(hover);
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        self.session.set_page_visible(visible);
    }

    pub fn active_len(&self) -> usize {
        self.particles.len()
    }

    pub fn drop_len(&self) -> usize {
        self.drops.len()
    }

    pub fn fragment_len(&self) -> usize {
        self.fragments.len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    pub fn preset(&self) -> &TrailPreset {
        &self.preset
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.rng.f32() * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(preset: TrailPreset) -> TrailEmitter {
        let mut emitter = TrailEmitter::with_rng(preset, fastrand::Rng::with_seed(7));
        emitter.set_region_hover(true);
        emitter
    }

    fn accounted(emitter: &TrailEmitter) -> u64 {
        let stats = emitter.stats();
        stats.retired + stats.evicted + stats.swept + emitter.active_len() as u64
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut emitter = active(TrailPreset::holi());
        for i in 0..200 {
            let t = i as f64 * 0.001;
            emitter.on_pointer_move(Vec2::new(i as f32, 40.0), t);
            assert!(emitter.active_len() <= 25);
            if i >= 25 {
                assert_eq!(emitter.active_len(), 25);
            }
        }
        // burst leaves the pool exactly full
        assert_eq!(emitter.active_len(), 25);
        assert_eq!(emitter.stats().spawned, 200);
        assert_eq!(emitter.stats().evicted, 175);
    }

    #[test]
    fn eviction_is_fifo() {
        let mut preset = TrailPreset::holi();
        preset.max_particles = 3;
        let mut emitter = active(preset);
        for i in 0..4 {
            emitter.on_pointer_move(Vec2::new(i as f32, 0.0), i as f64 * 0.01);
        }
        let ids: Vec<u64> = emitter.particles.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn ttl_retires_every_particle_exactly_once() {
        let mut emitter = active(TrailPreset::holi());
        for i in 0..10 {
            emitter.on_pointer_move(Vec2::new(i as f32, 0.0), i as f64 * 0.01);
        }
        assert_eq!(emitter.active_len(), 10);
        emitter.advance(5.0);
        assert_eq!(emitter.active_len(), 0);
        assert_eq!(emitter.stats().retired, 10);
        // a second pass over the same window changes nothing
        emitter.advance(6.0);
        assert_eq!(emitter.stats().retired, 10);
        assert_eq!(emitter.stats().swept, 0);
    }

    #[test]
    fn inactive_session_spawns_nothing() {
        let mut emitter =
            TrailEmitter::with_rng(TrailPreset::holi(), fastrand::Rng::with_seed(7));
        for i in 0..20 {
            emitter.on_pointer_move(Vec2::new(i as f32, 0.0), i as f64 * 0.01);
        }
        assert_eq!(emitter.active_len(), 0);

        let mut hidden = active(TrailPreset::holi());
        hidden.set_page_visible(false);
        hidden.on_pointer_move(Vec2::new(1.0, 1.0), 0.0);
        assert_eq!(hidden.active_len(), 0);
    }

    #[test]
    fn velocity_batches_are_throttled_and_clamped() {
        let mut emitter = active(TrailPreset::aurora());
        emitter.on_pointer_move(Vec2::new(0.0, 0.0), 0.0);
        // first sample has zero velocity: one particle
        assert_eq!(emitter.active_len(), 1);
        // inside the 16ms window: ignored entirely
        emitter.on_pointer_move(Vec2::new(300.0, 0.0), 0.005);
        assert_eq!(emitter.active_len(), 1);
        // past the window with a huge jump: clamped to the max batch
        emitter.on_pointer_move(Vec2::new(900.0, 0.0), 0.020);
        assert_eq!(emitter.active_len(), 1 + 5);
    }

    #[test]
    fn click_burst_is_fixed_size_and_short_lived() {
        let mut emitter = active(TrailPreset::aurora());
        emitter.on_click(Vec2::new(200.0, 200.0), 0.0);
        assert_eq!(emitter.fragment_len(), 12);
        // the burst ignores the particle pool entirely
        assert_eq!(emitter.active_len(), 0);
        emitter.advance(0.7);
        assert_eq!(emitter.fragment_len(), 0);
    }

    #[test]
    fn click_while_inactive_is_a_no_op() {
        let mut emitter =
            TrailEmitter::with_rng(TrailPreset::aurora(), fastrand::Rng::with_seed(7));
        emitter.on_click(Vec2::new(200.0, 200.0), 0.0);
        assert_eq!(emitter.fragment_len(), 0);
    }

    #[test]
    fn sweep_reclaims_particles_with_lost_timers() {
        let mut emitter = active(TrailPreset::holi());
        emitter.on_pointer_move(Vec2::new(5.0, 5.0), 0.0);
        // simulate a lost retirement callback
        let handle = emitter.particles[0].ttl_task;
        assert!(emitter.scheduler.cancel(handle));
        emitter.advance(3.0);
        assert_eq!(emitter.active_len(), 0);
        assert_eq!(emitter.stats().swept, 1);
        assert_eq!(accounted(&emitter), emitter.stats().spawned);
    }

    #[test]
    fn teardown_releases_everything() {
        let mut emitter = active(TrailPreset::aurora());
        for i in 0..30 {
            emitter.on_pointer_move(Vec2::new(i as f32 * 3.0, 10.0), i as f64 * 0.02);
        }
        emitter.on_click(Vec2::new(50.0, 50.0), 0.7);
        assert!(emitter.active_len() > 0);
        emitter.teardown();
        assert_eq!(emitter.active_len(), 0);
        assert_eq!(emitter.drop_len(), 0);
        assert_eq!(emitter.fragment_len(), 0);
        assert_eq!(emitter.pending_tasks(), 0);
        assert!(emitter.instances(1.0).is_empty());
    }

    #[test]
    fn morph_task_outlives_evicted_particle() {
        let mut preset = TrailPreset::aurora();
        preset.max_particles = 1;
        let mut emitter = active(preset);
        emitter.on_pointer_move(Vec2::new(10.0, 10.0), 0.0);
        // let the morph sub-effect start
        emitter.advance(1.0);
        // evict the morphing particle and keep draining past its timeout
        emitter.on_pointer_move(Vec2::new(20.0, 20.0), 1.02);
        emitter.advance(6.0);
        assert_eq!(accounted(&emitter), emitter.stats().spawned);
    }

    #[test]
    fn every_particle_is_removed_exactly_once_across_mixed_retirement() {
        let mut preset = TrailPreset::aurora();
        preset.max_particles = 8;
        let mut emitter = active(preset);
        for i in 0..40 {
            emitter.on_pointer_move(Vec2::new(i as f32 * 7.0, 30.0), i as f64 * 0.02);
            emitter.advance(i as f64 * 0.02);
        }
        emitter.advance(10.0);
        assert_eq!(emitter.active_len(), 0);
        assert_eq!(accounted(&emitter), emitter.stats().spawned);
    }
}
