//! The orbit scene: the rocket stack and a satellite circling the Earth.
//! The stack can be pulled apart and turned piece by piece.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use liftoff_engine::*;
use serde::Serialize;

use crate::config::OrbitViewConfig;
use crate::orbit::OrbitTracker;
use crate::pad::meshes;

pub mod tags {
    pub const EARTH: &str = "orbit-earth";
    pub const RING: &str = "orbit-view-ring";
    pub const LOWER: &str = "stage-lower";
    pub const UPPER: &str = "stage-upper";
    pub const PAYLOAD: &str = "payload";
    pub const SATELLITE: &str = "satellite";
}

/// Optional manifest models for the stack pieces and the satellite.
const PART_ASSETS: [&str; 3] = ["rocket-lower-stage", "rocket-upper-stage", "rocket-payload"];
const SATELLITE_ASSET: &str = "satellite";

const LOWER: usize = 0;
const UPPER: usize = 1;
const PAYLOAD: usize = 2;

/// Whether neighbouring pieces are together or pulled apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartStatus {
    Attached,
    Separated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitViewStatus {
    pub orbiting: bool,
    pub speed: f32,
    pub lower: PartStatus,
    pub upper: PartStatus,
    pub payload: PartStatus,
    pub parts_visible: bool,
    pub satellite_visible: bool,
}

pub struct OrbitView {
    config: OrbitViewConfig,
    earth: EntityId,
    parts: [EntityId; 3],
    satellite: EntityId,
    rocket_orbit: OrbitTracker,
    satellite_orbit: OrbitTracker,
    /// Vertical offset of each piece from the stack.
    offsets: [f32; 3],
    /// Extra y rotation of each piece.
    turns: [f32; 3],
    /// Last travel heading of the payload.
    heading: f32,
    parts_visible: bool,
    satellite_visible: bool,
}

impl OrbitView {
    /// Spawn the orbit scene. Stack and satellite start on their orbits at
    /// angle 0; the stack stays parked until orbiting is switched on.
    pub fn build(ctx: &mut EngineContext, config: &OrbitViewConfig) -> Self {
        let earth = ctx.spawn(|e| {
            e.with_tag(tags::EARTH)
                .with_scale(Vec3::splat(20.0))
                .with_mesh(MeshComponent::new(meshes::EARTH))
        });
        for (mesh, color) in [(meshes::ROCKET_RING, 0xffffff), (meshes::SATELLITE_RING, 0x00ffff)] {
            ctx.spawn(|e| {
                e.with_tag(tags::RING)
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(MeshComponent::new(mesh).with_color(MeshColor::hex(color)))
            });
        }

        let rocket_orbit = OrbitTracker::new(config.rocket_radius, config.rocket_speed).with_active(false);
        let satellite_orbit = OrbitTracker::new(config.satellite_radius, config.satellite_speed)
            .with_heading(true)
            .with_spin(Vec3::new(0.0, 0.0, config.satellite_spin));

        let start = rocket_orbit.position();
        let part_meshes = [
            (meshes::LOWER_STAGE, 0xff4444, tags::LOWER),
            (meshes::UPPER_STAGE, 0x44ff44, tags::UPPER),
            (meshes::PAYLOAD, 0x4444ff, tags::PAYLOAD),
        ];
        let mut parts = [EntityId(0); 3];
        for (i, (fallback, color, tag)) in part_meshes.into_iter().enumerate() {
            let mesh = match ctx.assets.mesh(PART_ASSETS[i]) {
                Some(handle) => MeshComponent::new(handle),
                None => MeshComponent::new(fallback).with_color(MeshColor::hex(color)),
            };
            parts[i] = ctx.spawn(|e| e.with_tag(tag).with_position(start).with_mesh(mesh));
        }

        let satellite_mesh = ctx
            .assets
            .mesh(SATELLITE_ASSET)
            .map(MeshComponent::new)
            .unwrap_or_else(|| MeshComponent::new(meshes::SATELLITE).with_color(MeshColor::hex(0x888888)));
        let satellite_start = satellite_orbit.position();
        let satellite = ctx.spawn(|e| {
            e.with_tag(tags::SATELLITE)
                .with_position(satellite_start)
                .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
                .with_mesh(satellite_mesh)
        });

        log::info!("orbit view built");
        Self {
            config: config.clone(),
            earth,
            parts,
            satellite,
            rocket_orbit,
            satellite_orbit,
            offsets: [0.0; 3],
            turns: [0.0; 3],
            heading: 0.0,
            parts_visible: true,
            satellite_visible: true,
        }
    }

    /// Put the camera at its overview of the globe.
    pub fn place_camera(&self, camera: &mut Camera3D) {
        camera.position = Vec3::from(self.config.camera_position);
        camera.look_at(Vec3::ZERO);
        camera.fog_near = self.config.fog[0];
        camera.fog_far = self.config.fog[1];
    }

    // ---- Controls ----

    pub fn handle_keys(&mut self, ctx: &mut EngineContext, keys: &KeyState) {
        for &key in keys.pressed_keys() {
            match key {
                codes::DIGIT_1 => self.turns[LOWER] += self.config.part_turn,
                codes::DIGIT_2 => self.turns[UPPER] += self.config.part_turn,
                codes::DIGIT_3 => self.turns[PAYLOAD] += self.config.part_turn,
                codes::Q => self.offsets[LOWER] -= self.config.part_shift,
                codes::E => self.offsets[UPPER] += self.config.part_shift,
                codes::R => self.reassemble(),
                codes::T => self.toggle_parts(ctx),
                codes::S => self.toggle_satellite(ctx),
                codes::SPACE => self.toggle_orbit(),
                _ => {}
            }
        }
    }

    pub fn toggle_orbit(&mut self) {
        self.set_orbiting(!self.rocket_orbit.active);
    }

    pub fn set_orbiting(&mut self, orbiting: bool) {
        self.rocket_orbit.active = orbiting;
        log::info!("stack orbit {}", if orbiting { "running" } else { "paused" });
    }

    /// Radians per step; negative or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.rocket_orbit.angular_speed = speed;
        } else {
            log::warn!("orbit speed {} rejected", speed);
        }
    }

    /// Pull the pieces back together and undo their turns.
    pub fn reassemble(&mut self) {
        self.offsets = [0.0; 3];
        self.turns = [0.0; 3];
        log::debug!("stack reassembled");
    }

    pub fn toggle_parts(&mut self, ctx: &mut EngineContext) {
        self.parts_visible = !self.parts_visible;
        for id in self.parts {
            ctx.scene.set_visible(id, self.parts_visible);
        }
    }

    pub fn toggle_satellite(&mut self, ctx: &mut EngineContext) {
        self.satellite_visible = !self.satellite_visible;
        ctx.scene.set_visible(self.satellite, self.satellite_visible);
    }

    // ---- Per-step motion ----

    pub fn update(&mut self, ctx: &mut EngineContext) {
        let mut stack = Transform::from_position(self.rocket_orbit.position());
        if self.rocket_orbit.active {
            self.rocket_orbit.step(&mut stack);
            self.heading = self.rocket_orbit.heading();
        }
        for (i, id) in self.parts.into_iter().enumerate() {
            if let Some(part) = ctx.scene.get_mut(id) {
                part.transform.position = stack.position + Vec3::new(0.0, self.offsets[i], 0.0);
                let heading = if i == PAYLOAD { self.heading } else { 0.0 };
                part.transform.rotation.y = heading + self.turns[i];
            }
        }

        if let Some(satellite) = ctx.scene.get_mut(self.satellite) {
            self.satellite_orbit.step(&mut satellite.transform);
        }
        if let Some(earth) = ctx.scene.get_mut(self.earth) {
            earth.transform.rotation.y += self.config.earth_spin;
        }
    }

    // ---- Status ----

    fn part_status(&self, a: usize, b: usize) -> PartStatus {
        if (self.offsets[a] - self.offsets[b]).abs() > self.config.separation_threshold {
            PartStatus::Separated
        } else {
            PartStatus::Attached
        }
    }

    pub fn status(&self) -> OrbitViewStatus {
        OrbitViewStatus {
            orbiting: self.rocket_orbit.active,
            speed: self.rocket_orbit.angular_speed,
            lower: self.part_status(LOWER, UPPER),
            upper: self.part_status(UPPER, PAYLOAD),
            payload: PartStatus::Attached,
            parts_visible: self.parts_visible,
            satellite_visible: self.satellite_visible,
        }
    }

    pub fn parts(&self) -> [EntityId; 3] {
        self.parts
    }

    pub fn satellite(&self) -> EntityId {
        self.satellite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keys: &mut KeyState, key_code: u32) {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code });
        q.push(InputEvent::KeyUp { key_code });
        keys.apply(&q);
    }

    fn setup() -> (EngineContext, OrbitView) {
        let mut ctx = EngineContext::new();
        let view = OrbitView::build(&mut ctx, &OrbitViewConfig::default());
        (ctx, view)
    }

    #[test]
    fn builds_earth_rings_parts_and_satellite() {
        let (ctx, view) = setup();
        assert_eq!(ctx.scene.len(), 7);
        let sat = ctx.scene.get(view.satellite()).unwrap();
        assert_eq!(sat.position(), Vec3::new(35.0, 0.0, 0.0));
        let lower = ctx.scene.get(view.parts()[0]).unwrap();
        assert_eq!(lower.position(), Vec3::new(30.0, 0.0, 0.0));
    }

    #[test]
    fn stack_waits_for_orbit_toggle() {
        let (mut ctx, mut view) = setup();
        view.update(&mut ctx);
        assert_eq!(ctx.scene.get(view.parts()[2]).unwrap().position(), Vec3::new(30.0, 0.0, 0.0));

        let mut keys = KeyState::new();
        press(&mut keys, codes::SPACE);
        view.handle_keys(&mut ctx, &keys);
        view.update(&mut ctx);
        let payload = ctx.scene.get(view.parts()[2]).unwrap();
        assert!((payload.transform.rotation.y - (0.01 + FRAC_PI_2)).abs() < 1e-5);
        assert!(view.status().orbiting);
    }

    #[test]
    fn satellite_always_circles_and_spins() {
        let (mut ctx, mut view) = setup();
        for _ in 0..10 {
            view.update(&mut ctx);
        }
        let sat = ctx.scene.get(view.satellite()).unwrap();
        let r = (sat.position().x.powi(2) + sat.position().z.powi(2)).sqrt();
        assert!((r - 35.0).abs() < 1e-3);
        assert!((sat.transform.rotation.z - 0.1).abs() < 1e-5);
    }

    #[test]
    fn pulling_stages_apart_changes_status() {
        let (mut ctx, mut view) = setup();
        let mut keys = KeyState::new();
        press(&mut keys, codes::Q);
        view.handle_keys(&mut ctx, &keys);
        assert_eq!(view.status().lower, PartStatus::Separated);
        assert_eq!(view.status().upper, PartStatus::Attached);

        press(&mut keys, codes::E);
        view.handle_keys(&mut ctx, &keys);
        view.update(&mut ctx);
        assert_eq!(view.status().upper, PartStatus::Separated);
        assert_eq!(ctx.scene.get(view.parts()[1]).unwrap().position().y, 2.0);
        assert_eq!(ctx.scene.get(view.parts()[0]).unwrap().position().y, -2.0);

        press(&mut keys, codes::R);
        view.handle_keys(&mut ctx, &keys);
        assert_eq!(view.status().lower, PartStatus::Attached);
    }

    #[test]
    fn digit_keys_turn_single_parts() {
        let (mut ctx, mut view) = setup();
        let mut keys = KeyState::new();
        press(&mut keys, codes::DIGIT_2);
        view.handle_keys(&mut ctx, &keys);
        view.update(&mut ctx);
        assert!((ctx.scene.get(view.parts()[1]).unwrap().transform.rotation.y - 0.2).abs() < 1e-6);
        assert_eq!(ctx.scene.get(view.parts()[0]).unwrap().transform.rotation.y, 0.0);
    }

    #[test]
    fn visibility_toggles() {
        let (mut ctx, mut view) = setup();
        view.toggle_parts(&mut ctx);
        view.toggle_satellite(&mut ctx);
        assert!(view.parts().iter().all(|id| !ctx.scene.get(*id).unwrap().visible));
        assert!(!ctx.scene.get(view.satellite()).unwrap().visible);
        view.toggle_parts(&mut ctx);
        assert!(ctx.scene.get(view.parts()[0]).unwrap().visible);
    }

    #[test]
    fn speed_rejects_nonsense() {
        let (_, mut view) = setup();
        view.set_speed(0.05);
        view.set_speed(f32::NAN);
        view.set_speed(-1.0);
        assert_eq!(view.status().speed, 0.05);
    }
}
