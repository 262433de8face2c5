//! Lower-stage separation: a one-shot split at a fixed altitude, followed by
//! the dropped stage tumbling to the ground and exploding on impact.

use glam::Vec3;
use liftoff_engine::{
    EmissionMode, EmitterComponent, EngineContext, EntityId, MeshComponent, ParticleKind,
    SoundEvent,
};

use crate::config::SeparationConfig;
use crate::game::sounds;
use crate::phase::{OneShot, StageState};

/// Asset name of the discrete lower-stage model, when the page provides one.
pub const LOWER_STAGE_ASSET: &str = "rocket-lower-stage";
/// Tag of the lower-stage part riding on the rocket before separation.
pub const LOWER_PART_TAG: &str = "rocket-lower";
/// Tag of the dropped stage.
pub const FALLING_STAGE_TAG: &str = "falling-stage";

/// The dropped stage while it falls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingStage {
    pub id: EntityId,
    pub velocity: Vec3,
}

#[derive(Debug, Clone)]
pub struct SeparationController {
    config: SeparationConfig,
    latch: OneShot,
    state: StageState,
    falling: Option<FallingStage>,
    trimmed: bool,
}

impl SeparationController {
    pub fn new(config: &SeparationConfig) -> Self {
        Self {
            config: config.clone(),
            latch: OneShot::new(),
            state: StageState::Attached,
            falling: None,
            trimmed: false,
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn falling(&self) -> Option<&FallingStage> {
        self.falling.as_ref()
    }

    pub fn has_separated(&self) -> bool {
        self.latch.has_fired()
    }

    /// Y-scale factor and lift to apply to the rocket. (1, 0) unless the
    /// rocket had to be shortened in place of hiding a separate lower part.
    pub fn trim(&self) -> (f32, f32) {
        if self.trimmed {
            (self.config.trim_scale, self.config.trim_lift)
        } else {
            (1.0, 0.0)
        }
    }

    /// Separate once `altitude` reaches the threshold. Returns true on the one
    /// step that separation happens; never fires below the threshold or twice.
    pub fn check(&mut self, ctx: &mut EngineContext, altitude: f32, rocket: EntityId) -> bool {
        if altitude < self.config.height || self.latch.has_fired() {
            return false;
        }
        let Some(source) = ctx.scene.get(rocket) else {
            log::warn!("separation skipped: rocket entity {:?} is gone", rocket);
            return false;
        };
        let mut transform = source.transform;
        let rocket_mesh = source.mesh;
        self.latch.fire();

        let mesh = match ctx.assets.mesh(LOWER_STAGE_ASSET) {
            Some(handle) => Some(MeshComponent::new(handle)),
            None => {
                transform.scale.y *= 0.5;
                rocket_mesh
            }
        };
        transform.position.y -= self.config.drop_offset;
        let stage_pos = transform.position;

        let config = &self.config;
        let id = ctx.spawn(|e| {
            let e = e
                .with_tag(FALLING_STAGE_TAG)
                .with_transform(transform)
                .with_emitter(
                    EmitterComponent::new(ParticleKind::Smoke)
                        .with_mode(EmissionMode::Chance { probability: config.trail_smoke_chance })
                        .with_offset(Vec3::new(0.0, 3.0, 0.0))
                        .with_spread(4.0),
                )
                .with_emitter(
                    EmitterComponent::new(ParticleKind::Fire)
                        .with_mode(EmissionMode::Chance { probability: config.trail_fire_chance })
                        .with_offset(Vec3::new(0.0, 2.0, 0.0))
                        .with_spread(3.0),
                );
            match mesh {
                Some(m) => e.with_mesh(m),
                None => e,
            }
        });

        match ctx.scene.find_by_tag_mut(LOWER_PART_TAG) {
            Some(part) => part.visible = false,
            None => self.trimmed = true,
        }

        ctx.effects.emit_burst(ParticleKind::Explosion, stage_pos, self.config.explosion_count, self.config.explosion_spread);
        ctx.effects.emit_burst(ParticleKind::Smoke, stage_pos, self.config.smoke_count, self.config.smoke_spread);
        ctx.emit_sound(SoundEvent(sounds::EXPLOSION));

        self.falling = Some(FallingStage {
            id,
            velocity: Vec3::new(0.0, -self.config.fall_speed, 0.0),
        });
        self.state = StageState::Separated;
        log::info!("stage separated at altitude {:.1}", altitude);
        true
    }

    /// Drop and tumble the falling stage one step. Returns the impact point
    /// on the step it lands.
    pub fn update(&mut self, ctx: &mut EngineContext) -> Option<Vec3> {
        let stage = self.falling?;
        let [tx, ty, tz] = self.config.tumble;
        let [jx, jy, jz] = self.config.tumble_jitter;
        let rng = &mut ctx.effects.rng;
        let tumble = Vec3::new(tx + rng.signed(jx), ty + rng.signed(jy), tz + rng.signed(jz));

        let Some(entity) = ctx.scene.get_mut(stage.id) else {
            self.falling = None;
            return None;
        };
        entity.transform.position += stage.velocity;
        entity.transform.rotation += tumble;
        let position = entity.position();
        if position.y >= self.config.ground_level {
            return None;
        }

        let impact = Vec3::new(position.x, self.config.landing_height, position.z);
        ctx.effects.emit_burst_flat(ParticleKind::Explosion, impact, self.config.landing_count, self.config.landing_spread);
        ctx.emit_sound(SoundEvent(sounds::EXPLOSION));
        ctx.scene.set_visible(stage.id, false);
        ctx.despawn(stage.id);
        self.falling = None;
        self.state = StageState::Landed;
        log::info!("lower stage landed at ({:.1}, {:.1})", impact.x, impact.z);
        Some(impact)
    }
}

impl Default for SeparationController {
    fn default() -> Self {
        Self::new(&SeparationConfig::default())
    }
}
