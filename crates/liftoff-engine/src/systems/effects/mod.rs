//! Visual effects system: smoke, fire and explosion particles.
//!
//! `EffectsState` is the single owner of every live particle. Game code and
//! entity emitters add particles through it; the runner ages them once per
//! fixed step and rebuilds the particle instance buffer once per frame.

mod rng;
mod particle;

// Re-export public types
pub use rng::Rng;
pub use particle::{Particle, ParticleKind, ParticleProfile};

use glam::Vec3;
use crate::renderer::instance::ParticleInstance;

/// Container for all live particles plus the flat buffer handed to the renderer.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub particle_buffer: Vec<ParticleInstance>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::new(),
            particle_buffer: Vec::with_capacity(1024),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Create a new EffectsState with a pre-allocated buffer capacity.
    pub fn with_capacity(seed: u64, max_particles: usize) -> Self {
        EffectsState {
            particles: Vec::with_capacity(max_particles),
            particle_buffer: Vec::with_capacity(max_particles),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spawn one particle near `position` with the kind's jitter and a
    /// randomized velocity.
    pub fn emit(&mut self, kind: ParticleKind, position: Vec3) {
        let profile = kind.profile();
        let jittered = Vec3::new(
            position.x + self.rng.signed(profile.jitter),
            position.y,
            position.z + self.rng.signed(profile.jitter),
        );
        let velocity = Vec3::new(
            self.rng.signed(profile.lateral_speed),
            self.rng.range(profile.rise.0, profile.rise.1),
            self.rng.signed(profile.lateral_speed),
        );
        self.particles.push(Particle::new(kind, jittered, velocity));
    }

    /// Spawn `count` particles, each offset from `center` by a uniform
    /// ±spread/2 on every axis.
    pub fn emit_burst(&mut self, kind: ParticleKind, center: Vec3, count: usize, spread: f32) {
        let half = spread * 0.5;
        for _ in 0..count {
            let at = center
                + Vec3::new(
                    self.rng.signed(half),
                    self.rng.signed(half),
                    self.rng.signed(half),
                );
            self.emit(kind, at);
        }
    }

    /// Like `emit_burst` but spreads on x and z only; y stays at `center.y`.
    pub fn emit_burst_flat(&mut self, kind: ParticleKind, center: Vec3, count: usize, spread: f32) {
        let half = spread * 0.5;
        for _ in 0..count {
            let at = center + Vec3::new(self.rng.signed(half), 0.0, self.rng.signed(half));
            self.emit(kind, at);
        }
    }

    /// Age every particle by one step; expired particles are dropped.
    pub fn tick(&mut self) {
        self.particles.retain_mut(|p| p.tick());
    }

    /// Number of live particles. No cap is enforced.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Count of live particles of a given kind.
    pub fn count_kind(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    /// Rebuild the particle instance buffer (8 floats per particle).
    pub fn rebuild_particle_buffer(&mut self) {
        self.particle_buffer.clear();
        for p in &self.particles {
            self.particle_buffer.push(ParticleInstance {
                x: p.position.x,
                y: p.position.y,
                z: p.position.z,
                scale: p.scale(),
                opacity: p.opacity(),
                kind: p.kind.as_f32(),
                _pad: [0.0; 2],
            });
        }
    }

    /// Clear all particles.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.particle_buffer.clear();
    }

    pub fn particle_count(&self) -> usize {
        self.particle_buffer.len()
    }

    pub fn particle_buffer_ptr(&self) -> *const f32 {
        self.particle_buffer.as_ptr() as *const f32
    }
}
