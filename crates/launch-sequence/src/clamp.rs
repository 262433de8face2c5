use glam::{Quat, Vec3};
use liftoff_engine::Transform;

use crate::config::ClampConfig;
use crate::phase::{ClampState, OneShot};

/// The tower clamp that holds the rocket until it swings a quarter turn
/// about its pivot. The swing can be started once per run.
#[derive(Debug, Clone)]
pub struct ClampArm {
    pivot: Vec3,
    rest: Vec3,
    speed: f32,
    snap: f32,
    swing: f32,
    angle: f32,
    target: f32,
    state: ClampState,
    trigger: OneShot,
}

impl ClampArm {
    pub fn new(config: &ClampConfig) -> Self {
        Self {
            pivot: Vec3::from(config.pivot),
            rest: Vec3::from(config.rest),
            speed: config.speed.abs(),
            snap: config.snap.abs(),
            swing: config.swing,
            angle: 0.0,
            target: 0.0,
            state: ClampState::Locked,
            trigger: OneShot::new(),
        }
    }

    /// Start the swing. Returns false if it was already started.
    pub fn trigger(&mut self) -> bool {
        if !self.trigger.fire() {
            return false;
        }
        self.target = self.angle + self.swing;
        self.state = ClampState::Rotating;
        true
    }

    /// Move one step toward the target. Returns true on the step the swing finishes.
    pub fn update(&mut self) -> bool {
        if self.state != ClampState::Rotating {
            return false;
        }
        let remaining = self.target - self.angle;
        if remaining.abs() <= self.snap {
            self.angle = self.target;
            self.state = ClampState::Released;
            return true;
        }
        self.angle += self.speed.min(remaining.abs()) * remaining.signum();
        false
    }

    /// Where the clamp sits for the current angle: `rest` rotated about the
    /// pivot's z axis.
    pub fn pose(&self) -> Transform {
        let rotated = Quat::from_rotation_z(self.angle) * (self.rest - self.pivot);
        Transform::from_position(self.pivot + rotated)
            .with_rotation(Vec3::new(0.0, 0.0, self.angle))
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn state(&self) -> ClampState {
        self.state
    }

    pub fn released(&self) -> bool {
        self.state == ClampState::Released
    }
}

impl Default for ClampArm {
    fn default() -> Self {
        Self::new(&ClampConfig::default())
    }
}
