use glam::Vec2;

use std::time::Instant;

use crate::api::{DebugDraw, PhysicsEngineApi};
use crate::body::Body;
use crate::collision::Collision;
use crate::error::PhysicsError;
use crate::types::*;

/// Owns the simulated bodies and runs the detect-then-resolve step.
pub struct PhysicsEngine {
    pub cfg: EngineConfig,
    pub frame_counter: u32,

    bodies: Vec<Body>,
    // One report per body, replaced wholesale at the end of every step.
    reports: Vec<ContactReport>,
    // Collisions registered during the current step.
    queue: Vec<Collision>,

    last_stats: EngineStats,
    last_timing: Option<EngineTiming>,
}

fn elapsed_ms(t: Option<Instant>) -> f64 {
    t.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0)
}

impl PhysicsEngineApi for PhysicsEngine {
    fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            frame_counter: 0,
            bodies: Vec::new(),
            reports: Vec::new(),
            queue: Vec::new(),
            last_stats: EngineStats::default(),
            last_timing: None,
        }
    }

    fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        self.reports.push(ContactReport::default());
        handle
    }

    fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    fn set_gravity(&mut self, x: f32, y: f32) {
        self.cfg.gravity = Vec2::new(x, y);
    }

    fn gravity(&self) -> Vec2 {
        self.cfg.gravity
    }

    fn move_constant(&self) -> f32 {
        self.cfg.move_constant
    }

    fn add_collision(&mut self, collision: Collision) {
        self.queue.push(collision);
    }

    fn update(&mut self, dt: f32) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidDelta(dt));
        }

        let timed = self.cfg.enable_timing;
        let t_all = timed.then(Instant::now);

        let n = self.bodies.len();
        let mut reports = vec![ContactReport::default(); n];
        let mut stats = EngineStats {
            bodies: n,
            ..Default::default()
        };

        let gravity = self.cfg.gravity;
        for body in &mut self.bodies {
            body.apply_gravity(gravity, dt);
        }

        // All unordered pairs; each pair is visited exactly once.
        let t_detect = timed.then(Instant::now);
        for i in 0..n {
            for j in (i + 1)..n {
                stats.pairs_tested += 1;
                let a = &self.bodies[i];
                let b = &self.bodies[j];
                let Some(manifold) = a.check_collision(b) else {
                    continue;
                };
                stats.contacts += 1;
                log::trace!(
                    "contact {i} <-> {j}: normal=({:.3},{:.3}) depth={:.4}",
                    manifold.normal.x,
                    manifold.normal.y,
                    manifold.depth
                );

                reports[i].record(b.tags(), manifold.normal);
                reports[j].record(a.tags(), -manifold.normal);

                if a.is_trigger() || b.is_trigger() {
                    continue;
                }
                self.add_collision(Collision::new(
                    manifold,
                    BodyHandle(i as u32),
                    BodyHandle(j as u32),
                ));
            }
        }
        let detect_ms = elapsed_ms(t_detect);

        let t_solve = timed.then(Instant::now);
        stats.collisions_queued = self.queue.len();
        let mut queue = std::mem::take(&mut self.queue);
        for collision in &queue {
            if collision.solve(&mut self.bodies, &self.cfg) {
                stats.collisions_solved += 1;
            }
        }
        queue.clear();
        self.queue = queue;
        let solve_ms = elapsed_ms(t_solve);

        let t_integrate = timed.then(Instant::now);
        for (i, body) in self.bodies.iter_mut().enumerate() {
            let vel = body.vel();
            debug_assert!(vel.is_finite(), "body {i} has non-finite velocity {vel}");
            if !vel.is_finite() {
                log::warn!("body {i}: non-finite velocity {vel}, zeroing");
                body.freeze_velocity();
                continue;
            }
            let before = body.pos();
            body.integrate(dt);
            if !body.pos().is_finite() {
                log::warn!("body {i}: integration produced {}, restoring", body.pos());
                body.set_pos(before);
                body.freeze_velocity();
            }
        }
        let integrate_ms = elapsed_ms(t_integrate);

        self.reports = reports;
        self.last_stats = stats;
        self.frame_counter = self.frame_counter.wrapping_add(1);
        if let Some(t_all) = t_all {
            self.last_timing = Some(EngineTiming {
                step_ms: t_all.elapsed().as_secs_f64() * 1000.0,
                detect_ms,
                solve_ms,
                integrate_ms,
            });
        }
        log::debug!(
            "step {}: {} bodies, {} pairs, {} contacts, {}/{} collisions solved",
            self.frame_counter,
            stats.bodies,
            stats.pairs_tested,
            stats.contacts,
            stats.collisions_solved,
            stats.collisions_queued
        );
        Ok(())
    }

    fn contacts(&self, handle: BodyHandle) -> Option<&ContactReport> {
        self.reports.get(handle.index())
    }

    fn is_colliding_with(&self, handle: BodyHandle, tag: &str) -> bool {
        self.contacts(handle)
            .is_some_and(|report| report.is_colliding_with(tag))
    }

    fn debug_draw(&self, draw: &mut dyn DebugDraw) {
        for body in &self.bodies {
            draw.outline(body.pos(), &body.outline());
        }
    }
}

impl PhysicsEngine {
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Handles of every registered body, in registration order.
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.bodies.len() as u32).map(BodyHandle)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Like [`body`](PhysicsEngineApi::body), but a stale handle is an error.
    pub fn try_body(&self, handle: BodyHandle) -> Result<&Body, PhysicsError> {
        self.body(handle).ok_or(PhysicsError::InvalidHandle(handle))
    }

    pub fn set_move_constant(&mut self, move_constant: f32) {
        self.cfg.move_constant = move_constant;
    }

    /// Collisions registered but not yet solved. Always empty between steps.
    pub fn pending_collisions(&self) -> &[Collision] {
        &self.queue
    }

    /// Counters for the last completed step.
    pub fn debug_stats(&self) -> EngineStats {
        self.last_stats
    }

    /// Return timing breakdown for the last `update` run.
    pub fn timing(&self) -> Option<EngineTiming> {
        self.last_timing
    }
}
