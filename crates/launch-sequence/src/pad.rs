//! Launch-pad scene construction.
//!
//! Props with fixed geometry use the page's built-in meshes (`meshes`); the
//! rocket comes from the asset manifest and is only spawned once its model has
//! loaded.

use std::f32::consts::{FRAC_PI_4, PI};
use glam::Vec3;
use liftoff_engine::*;

use crate::config::LaunchConfig;
use crate::separation::{LOWER_PART_TAG, LOWER_STAGE_ASSET};

/// Manifest name of the rocket model.
pub const ROCKET_ASSET: &str = "rocket";

/// Mesh handles of the primitives the page builds itself.
pub mod meshes {
    use liftoff_engine::MeshHandle;

    pub const GROUND: MeshHandle = MeshHandle(1);
    pub const LAUNCH_PAD: MeshHandle = MeshHandle(2);
    pub const TOWER: MeshHandle = MeshHandle(3);
    pub const CLAMP: MeshHandle = MeshHandle(4);
    /// Unit sphere, textured with the Earth.
    pub const EARTH: MeshHandle = MeshHandle(5);
    /// Thin torus of radius 44 around the launch-scene globe.
    pub const LAUNCH_RING: MeshHandle = MeshHandle(6);
    /// Box of edge 3.
    pub const MARKER_CUBE: MeshHandle = MeshHandle(7);
    pub const LOWER_STAGE: MeshHandle = MeshHandle(8);
    pub const UPPER_STAGE: MeshHandle = MeshHandle(9);
    pub const PAYLOAD: MeshHandle = MeshHandle(10);
    pub const SATELLITE: MeshHandle = MeshHandle(11);
    /// Torus of radius 30.
    pub const ROCKET_RING: MeshHandle = MeshHandle(12);
    /// Torus of radius 35.
    pub const SATELLITE_RING: MeshHandle = MeshHandle(13);
}

/// Entity tags of the launch scene.
pub mod tags {
    pub const GROUND: &str = "ground";
    pub const CLAMP: &str = "clamp";
    pub const ROCKET: &str = "rocket";
    pub const EARTH: &str = "earth";
    pub const RING: &str = "orbit-ring";
    pub const MARKER: &str = "marker";
}

/// Globe tilt that puts the equator across the view.
const EARTH_TILT: Vec3 = Vec3::new(-PI / 2.8, -100.0 / 360.0 * PI + 4.9, 0.0);

/// Ids of the launch-scene entities the game drives directly.
#[derive(Debug, Clone, Default)]
pub struct SceneHandles {
    pub rocket: Option<EntityId>,
    pub rocket_lower: Option<EntityId>,
    pub clamp: Option<EntityId>,
    pub earth: Option<EntityId>,
    pub ring: Option<EntityId>,
    pub marker: Option<EntityId>,
}

/// Spawn the pad, tower, clamp, globe, ring and marker cube, plus the rocket
/// if its model is already available.
pub fn build(ctx: &mut EngineContext, config: &LaunchConfig) -> SceneHandles {
    ctx.spawn(|e| e.with_tag(tags::GROUND).with_mesh(MeshComponent::new(meshes::GROUND).with_color(MeshColor::hex(0x3a5f2a))));
    ctx.spawn(|e| e.with_tag(tags::GROUND).with_mesh(MeshComponent::new(meshes::LAUNCH_PAD).with_color(MeshColor::hex(0x777777))));
    ctx.spawn(|e| {
        e.with_tag(tags::GROUND)
            .with_position(Vec3::new(8.0, 0.0, 0.0))
            .with_mesh(MeshComponent::new(meshes::TOWER).with_color(MeshColor::hex(0xaa3322)))
    });

    let clamp_pose = crate::clamp::ClampArm::new(&config.clamp).pose();
    let clamp = ctx.spawn(|e| {
        e.with_tag(tags::CLAMP)
            .with_transform(clamp_pose)
            .with_mesh(MeshComponent::new(meshes::CLAMP).with_color(MeshColor::hex(0xcccccc)))
    });

    let earth_scale = config.fades.earth_start_scale;
    let earth = ctx.spawn(|e| {
        e.with_tag(tags::EARTH)
            .with_rotation(EARTH_TILT)
            .with_scale(Vec3::splat(earth_scale))
            .with_mesh(MeshComponent::new(meshes::EARTH))
            .with_visible(false)
    });
    let ring = ctx.spawn(|e| {
        e.with_tag(tags::RING)
            .with_rotation(Vec3::new(PI, 0.0, 0.0))
            .with_scale(Vec3::splat(earth_scale))
            .with_mesh(MeshComponent::new(meshes::LAUNCH_RING).with_color(MeshColor::hex(0xff0000)))
            .with_visible(false)
    });

    let orbit = &config.orbit;
    let marker = ctx.spawn(|e| {
        e.with_tag(tags::MARKER)
            .with_position(Vec3::new(orbit.marker_radius, orbit.marker_altitude, 0.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_4, 0.0))
            .with_mesh(MeshComponent::new(meshes::MARKER_CUBE).with_color(MeshColor::hex(0x00ff00)))
    });

    let mut handles = SceneHandles {
        clamp: Some(clamp),
        earth: Some(earth),
        ring: Some(ring),
        marker: Some(marker),
        ..SceneHandles::default()
    };
    attach_rocket(ctx, config, &mut handles);
    log::info!("launch pad built: {} entities", ctx.scene.len());
    handles
}

/// Spawn whichever rocket pieces have loaded but are not in the scene yet.
/// Returns true when the rocket itself was spawned by this call.
pub fn attach_rocket(ctx: &mut EngineContext, config: &LaunchConfig, handles: &mut SceneHandles) -> bool {
    let mut spawned = false;
    let pad = Vec3::new(0.0, config.ascent.start_altitude, config.ascent.pad_z);

    if handles.rocket.is_none() {
        if let Some(mesh) = ctx.assets.mesh(ROCKET_ASSET) {
            let id = ctx.spawn(|e| {
                e.with_tag(tags::ROCKET)
                    .with_position(pad)
                    .with_mesh(MeshComponent::new(mesh))
                    .with_emitter(
                        EmitterComponent::new(ParticleKind::Smoke)
                            .with_offset(Vec3::new(0.0, -2.0, 0.0))
                            .with_active(false),
                    )
                    .with_emitter(
                        EmitterComponent::new(ParticleKind::Fire)
                            .with_offset(Vec3::new(0.0, -3.0, 0.0))
                            .with_active(false),
                    )
            });
            handles.rocket = Some(id);
            spawned = true;
            log::info!("rocket on the pad");
        }
    }

    if handles.rocket_lower.is_none() {
        if let (Some(rocket), Some(mesh)) = (handles.rocket, ctx.assets.mesh(LOWER_STAGE_ASSET)) {
            let transform = ctx.scene.get(rocket).map(|r| r.transform).unwrap_or(Transform::from_position(pad));
            let id = ctx.spawn(|e| e.with_tag(LOWER_PART_TAG).with_transform(transform).with_mesh(MeshComponent::new(mesh)));
            handles.rocket_lower = Some(id);
        }
    }
    spawned
}
