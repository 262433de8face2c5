use crate::core::scene::Scene;
use crate::systems::effects::EffectsState;

/// Tick all entity emitters and spawn particles into the effects state.
/// Runs once per fixed step, after the game update.
pub fn tick_emitters(scene: &mut Scene, effects: &mut EffectsState) {
    for entity in scene.iter_mut() {
        let origin = entity.transform.position;
        for emitter in &entity.emitters {
            let roll = effects.rng.next_f32();
            let count = emitter.tick(roll);
            if count == 0 {
                continue;
            }
            let at = origin + emitter.offset;
            if emitter.spread > 0.0 {
                effects.emit_burst(emitter.kind, at, count as usize, emitter.spread);
            } else {
                for _ in 0..count {
                    effects.emit(emitter.kind, at);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::emitter::{EmissionMode, EmitterComponent};
    use crate::components::entity::Entity;
    use crate::systems::effects::ParticleKind;
    use glam::Vec3;

    #[test]
    fn every_tick_emitter_spawns_at_offset() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_position(Vec3::new(0.0, 10.0, 0.0))
                .with_emitter(EmitterComponent::new(ParticleKind::Fire).with_offset(Vec3::new(0.0, -3.0, 0.0))),
        );
        let mut effects = EffectsState::new(42);

        tick_emitters(&mut scene, &mut effects);

        assert_eq!(effects.len(), 1);
        assert_eq!(effects.particles[0].position.y, 7.0);
    }

    #[test]
    fn inactive_emitter_spawns_nothing() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_emitter(EmitterComponent::new(ParticleKind::Smoke).with_active(false)),
        );
        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn spread_emitter_stays_near_its_entity() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1)).with_position(Vec3::new(0.0, 20.0, 0.0)).with_emitter(
                EmitterComponent::new(ParticleKind::Explosion)
                    .with_mode(EmissionMode::EveryTick { count: 6 })
                    .with_spread(4.0),
            ),
        );
        let mut effects = EffectsState::new(42);
        tick_emitters(&mut scene, &mut effects);
        tick_emitters(&mut scene, &mut effects);
        assert_eq!(effects.len(), 12);
        for p in &effects.particles {
            assert!((p.position - Vec3::new(0.0, 20.0, 0.0)).abs().max_element() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn chance_emitter_is_roughly_proportional() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1)).with_emitter(
                EmitterComponent::new(ParticleKind::Smoke)
                    .with_mode(EmissionMode::Chance { probability: 0.4 }),
            ),
        );
        let mut effects = EffectsState::new(42);
        for _ in 0..1000 {
            tick_emitters(&mut scene, &mut effects);
        }
        let n = effects.len();
        assert!(n > 300 && n < 500, "spawned {}", n);
    }
}
