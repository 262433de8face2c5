//! Camera rig: free first-person movement, the follow camera that chases the
//! rocket during ascent, and the overlook snap at orbit insertion.

use glam::Vec3;
use liftoff_engine::{codes, progress, Camera3D, KeyState};

use crate::config::CameraConfig;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Free,
    Follow,
    Overlook,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Free => "free",
            CameraMode::Follow => "follow",
            CameraMode::Overlook => "overlook",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    follow_enabled: bool,
    tracking: bool,
    overlook: bool,
    offset: Vec3,
    /// Extra pitch (x) and yaw (y) applied after looking at the target.
    extra_rotation: (f32, f32),
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            config: config.clone(),
            follow_enabled: config.follow_on_launch,
            tracking: false,
            overlook: false,
            offset: Vec3::from(config.follow_offset),
            extra_rotation: (0.0, 0.0),
        }
    }

    /// Put the camera at its starting spot.
    pub fn place(&self, camera: &mut Camera3D) {
        camera.position = Vec3::from(self.config.start_position);
        camera.look_at(Vec3::new(0.0, camera.position.y, 0.0));
        camera.fov = self.config.base_fov;
    }

    pub fn mode(&self) -> CameraMode {
        if self.overlook {
            CameraMode::Overlook
        } else if self.tracking && self.follow_enabled {
            CameraMode::Follow
        } else {
            CameraMode::Free
        }
    }

    pub fn follow_enabled(&self) -> bool {
        self.follow_enabled
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn extra_rotation(&self) -> (f32, f32) {
        self.extra_rotation
    }

    /// The rocket is climbing; follow it if follow is enabled.
    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    /// Follow-camera adjustments: arrows and Q/E move the offset, Z/C/V/B
    /// turn the view, R resets both, T toggles follow.
    pub fn handle_keys(&mut self, keys: &KeyState) {
        let step = self.config.offset_step;
        let turn = self.config.rotation_step;
        for &key in keys.pressed_keys() {
            match key {
                codes::ARROW_LEFT => self.offset.x -= step,
                codes::ARROW_RIGHT => self.offset.x += step,
                codes::ARROW_UP => self.offset.y += step,
                codes::ARROW_DOWN => self.offset.y -= step,
                codes::Q => self.offset.z += step,
                codes::E => self.offset.z -= step,
                codes::Z => self.extra_rotation.0 += turn,
                codes::C => self.extra_rotation.0 -= turn,
                codes::V => self.extra_rotation.1 += turn,
                codes::B => self.extra_rotation.1 -= turn,
                codes::R => {
                    self.offset = Vec3::from(self.config.follow_offset);
                    self.extra_rotation = (0.0, 0.0);
                }
                codes::T => {
                    self.follow_enabled = !self.follow_enabled;
                    log::info!("follow camera {}", if self.follow_enabled { "on" } else { "off" });
                }
                _ => {}
            }
        }
    }

    /// Pointer-locked first-person movement. Does nothing while following.
    pub fn update_free(&self, camera: &mut Camera3D, keys: &KeyState) {
        if self.mode() == CameraMode::Follow || !keys.pointer_locked() {
            return;
        }
        Self::look_around(camera, keys);

        let axis = |pos: u32, neg: u32| keys.held(pos) as i32 as f32 - keys.held(neg) as i32 as f32;
        let dir = glam::Vec2::new(axis(codes::D, codes::A), axis(codes::W, codes::S));
        if dir != glam::Vec2::ZERO {
            let dir = dir.normalize() * self.config.move_speed;
            camera.move_right(dir.x);
            camera.move_forward(dir.y);
        }

        let lift = axis(codes::SPACE, codes::SHIFT);
        camera.position.y = (camera.position.y + lift * self.config.fly_speed).max(self.config.floor);
    }

    /// Pointer-locked mouse look with no movement. The orbit view uses this,
    /// since its keys are all scene commands.
    pub fn look_around(camera: &mut Camera3D, keys: &KeyState) {
        if !keys.pointer_locked() {
            return;
        }
        let (dx, dy) = keys.look_delta();
        if dx != 0.0 || dy != 0.0 {
            camera.look(dx, dy);
        }
    }

    /// Chase `target`: sit at `target + offset`, look just above it, then
    /// apply the user's extra turn.
    pub fn follow(&self, camera: &mut Camera3D, target: Vec3) {
        camera.position = target + self.offset;
        camera.look_at(target + Vec3::new(0.0, self.config.look_ahead, 0.0));
        camera.pitch = (camera.pitch + self.extra_rotation.0).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera.yaw += self.extra_rotation.1;
    }

    /// Snap to the high overview of the pad. Free controls stay available afterwards.
    pub fn overlook(&mut self, camera: &mut Camera3D) {
        self.overlook = true;
        self.tracking = false;
        camera.position = Vec3::from(self.config.overlook_position);
        camera.look_at(Vec3::from(self.config.overlook_target));
        log::info!("camera: overlook");
    }

    /// Field of view for a camera at height `y`: wide near the ground,
    /// narrowing with height so the shrinking rocket stays readable.
    pub fn fov_for_altitude(&self, y: f32) -> f32 {
        let c = &self.config;
        if y < c.fov_start_height {
            return c.base_fov;
        }
        let t = progress(y, c.fov_start_height, c.fov_end_height);
        c.base_fov - t * (c.base_fov - c.min_fov)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftoff_engine::{InputEvent, InputQueue};

    fn keys_with(events: &[InputEvent]) -> KeyState {
        let mut q = InputQueue::new();
        for e in events {
            q.push(*e);
        }
        let mut keys = KeyState::new();
        keys.apply(&q);
        keys
    }

    fn down(key_code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code }
    }

    #[test]
    fn follow_sits_at_offset() {
        let mut rig = CameraRig::default();
        rig.set_tracking(true);
        assert_eq!(rig.mode(), CameraMode::Follow);
        let mut cam = Camera3D::default();
        let rocket = Vec3::new(0.0, 120.0, -0.7);
        rig.follow(&mut cam, rocket);
        assert_eq!(cam.position, rocket + Vec3::new(0.0, 10.0, 35.0));
        // looking toward -z, slightly down at the point above the rocket
        assert!(cam.forward().z < 0.0);
        assert!(cam.pitch < 0.0);
    }

    #[test]
    fn toggling_follow_falls_back_to_free() {
        let mut rig = CameraRig::default();
        rig.set_tracking(true);
        rig.handle_keys(&keys_with(&[down(codes::T)]));
        assert!(!rig.follow_enabled());
        assert_eq!(rig.mode(), CameraMode::Free);
    }

    #[test]
    fn offset_keys_and_reset() {
        let mut rig = CameraRig::default();
        rig.handle_keys(&keys_with(&[down(codes::ARROW_LEFT), down(codes::ARROW_UP), down(codes::Q), down(codes::Z), down(codes::B)]));
        assert_eq!(rig.offset(), Vec3::new(-2.0, 12.0, 37.0));
        let (pitch, yaw) = rig.extra_rotation();
        assert!((pitch - 0.1).abs() < 1e-6);
        assert!((yaw + 0.1).abs() < 1e-6);

        rig.handle_keys(&keys_with(&[down(codes::R)]));
        assert_eq!(rig.offset(), Vec3::new(0.0, 10.0, 35.0));
        assert_eq!(rig.extra_rotation(), (0.0, 0.0));
    }

    #[test]
    fn free_movement_needs_pointer_lock() {
        let rig = CameraRig::default();
        let mut cam = Camera3D::new(Vec3::new(0.0, 5.0, 0.0));
        rig.update_free(&mut cam, &keys_with(&[down(codes::W)]));
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 0.0));

        rig.update_free(&mut cam, &keys_with(&[InputEvent::PointerLock { locked: true }, down(codes::W)]));
        assert!((cam.position - Vec3::new(0.0, 5.0, -0.1)).length() < 1e-5);
    }

    #[test]
    fn diagonal_speed_is_normalised() {
        let rig = CameraRig::default();
        let mut cam = Camera3D::new(Vec3::new(0.0, 5.0, 0.0));
        rig.update_free(&mut cam, &keys_with(&[InputEvent::PointerLock { locked: true }, down(codes::W), down(codes::D)]));
        let moved = Vec3::new(cam.position.x, 0.0, cam.position.z).length();
        assert!((moved - 0.1).abs() < 1e-5);
    }

    #[test]
    fn flying_down_stops_at_the_floor() {
        let rig = CameraRig::default();
        let mut cam = Camera3D::new(Vec3::new(0.0, 1.65, 0.0));
        rig.update_free(&mut cam, &keys_with(&[InputEvent::PointerLock { locked: true }, down(codes::SHIFT)]));
        assert_eq!(cam.position.y, 1.6);
    }

    #[test]
    fn overlook_snaps_and_looks_at_origin() {
        let mut rig = CameraRig::default();
        rig.set_tracking(true);
        let mut cam = Camera3D::default();
        rig.overlook(&mut cam);
        assert_eq!(rig.mode(), CameraMode::Overlook);
        assert_eq!(cam.position, Vec3::new(0.0, 100.0, 120.0));
        let expected = (-cam.position).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn fov_narrows_with_height() {
        let rig = CameraRig::default();
        assert_eq!(rig.fov_for_altitude(10.0), 75.0);
        assert_eq!(rig.fov_for_altitude(50.0), 75.0);
        assert!((rig.fov_for_altitude(325.0) - 52.5).abs() < 1e-3);
        assert_eq!(rig.fov_for_altitude(600.0), 30.0);
        assert_eq!(rig.fov_for_altitude(5000.0), 30.0);
    }
}
