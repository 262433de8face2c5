//! Particle system for exhaust and explosion effects.

use glam::Vec3;

/// The three particle looks the launch uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Smoke,
    Fire,
    Explosion,
}

/// Per-kind spawn and aging parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleProfile {
    /// Half-width of the uniform position jitter on x and z.
    pub jitter: f32,
    /// Half-width of the uniform horizontal velocity on x and z.
    pub lateral_speed: f32,
    /// Vertical velocity range (lo, hi).
    pub rise: (f32, f32),
    /// Life lost per tick.
    pub decay: f32,
    /// Growth factor k in `scale = 1 + (1 - life) * k`.
    pub growth: f32,
}

impl ParticleKind {
    pub fn profile(self) -> ParticleProfile {
        match self {
            ParticleKind::Smoke => ParticleProfile {
                jitter: 1.5,
                lateral_speed: 0.1,
                rise: (0.2, 0.5),
                decay: 0.01,
                growth: 2.0,
            },
            ParticleKind::Fire => ParticleProfile {
                jitter: 1.0,
                lateral_speed: 0.15,
                rise: (0.3, 0.7),
                decay: 0.015,
                growth: 1.5,
            },
            ParticleKind::Explosion => ParticleProfile {
                jitter: 0.0,
                lateral_speed: 1.0,
                rise: (0.5, 1.5),
                decay: 0.015,
                growth: 1.5,
            },
        }
    }

    /// Numeric id written into the particle buffer.
    pub fn as_f32(self) -> f32 {
        match self {
            ParticleKind::Smoke => 0.0,
            ParticleKind::Fire => 1.0,
            ParticleKind::Explosion => 2.0,
        }
    }
}

/// A single particle. `life` starts at 1 and only ever decreases.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec3,
    pub velocity: Vec3,
    life: f32,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Vec3, velocity: Vec3) -> Self {
        Particle {
            kind,
            position,
            velocity,
            life: 1.0,
        }
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    /// Advance one step. Returns false when expired.
    pub fn tick(&mut self) -> bool {
        self.position += self.velocity;
        self.life = (self.life - self.kind.profile().decay).max(0.0);
        self.life > 0.0
    }

    /// Uniform render scale; particles swell as they fade.
    pub fn scale(&self) -> f32 {
        1.0 + (1.0 - self.life) * self.kind.profile().growth
    }

    pub fn opacity(&self) -> f32 {
        self.life
    }
}
