use glam::Vec3;
use crate::systems::effects::ParticleKind;

/// How the emitter releases particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmissionMode {
    /// Emit `count` particles on every fixed step.
    EveryTick { count: u32 },
    /// Emit one particle per step with the given probability in [0, 1].
    Chance { probability: f32 },
}

/// Component for auto-spawning particles relative to an entity's position.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterComponent {
    /// Whether the emitter is actively spawning.
    pub active: bool,
    /// Particle kind to spawn.
    pub kind: ParticleKind,
    /// Emission mode.
    pub mode: EmissionMode,
    /// Offset from the entity position, in world space.
    pub offset: Vec3,
    /// Extra uniform spread (full width) on every axis. 0 uses only the
    /// per-kind jitter.
    pub spread: f32,
}

impl EmitterComponent {
    pub fn new(kind: ParticleKind) -> Self {
        Self {
            active: true,
            kind,
            mode: EmissionMode::EveryTick { count: 1 },
            offset: Vec3::ZERO,
            spread: 0.0,
        }
    }

    // -- Builder pattern --

    pub fn with_mode(mut self, mode: EmissionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Decide how many particles to release this step.
    /// `roll` is a uniform sample in [0, 1) supplied by the caller's RNG.
    pub fn tick(&self, roll: f32) -> u32 {
        if !self.active {
            return 0;
        }
        match self.mode {
            EmissionMode::EveryTick { count } => count,
            EmissionMode::Chance { probability } => {
                if roll < probability {
                    1
                } else {
                    0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_emitter() {
        let e = EmitterComponent::new(ParticleKind::Smoke);
        assert!(e.active);
        assert_eq!(e.mode, EmissionMode::EveryTick { count: 1 });
        assert_eq!(e.offset, Vec3::ZERO);
    }

    #[test]
    fn builder_pattern() {
        let e = EmitterComponent::new(ParticleKind::Fire)
            .with_mode(EmissionMode::Chance { probability: 0.2 })
            .with_offset(Vec3::new(0.0, -3.0, 0.0))
            .with_spread(3.0);
        assert_eq!(e.kind, ParticleKind::Fire);
        assert_eq!(e.offset.y, -3.0);
        assert_eq!(e.spread, 3.0);
    }

    #[test]
    fn every_tick_emits_count() {
        let e = EmitterComponent::new(ParticleKind::Smoke)
            .with_mode(EmissionMode::EveryTick { count: 2 });
        assert_eq!(e.tick(0.9), 2);
        assert_eq!(e.tick(0.1), 2);
    }

    #[test]
    fn chance_respects_roll() {
        let e = EmitterComponent::new(ParticleKind::Smoke)
            .with_mode(EmissionMode::Chance { probability: 0.4 });
        assert_eq!(e.tick(0.39), 1);
        assert_eq!(e.tick(0.41), 0);
    }

    #[test]
    fn inactive_emits_nothing() {
        let e = EmitterComponent::new(ParticleKind::Fire).with_active(false);
        assert_eq!(e.tick(0.0), 0);
    }
}
