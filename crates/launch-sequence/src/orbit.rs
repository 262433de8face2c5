/// Circular orbits on a horizontal plane, with drift correction.
///
/// Angles advance by a fixed amount per step, so an orbit is exact and
/// deterministic; `resnap` exists for positions that something else moved.

use std::f32::consts::{FRAC_PI_2, TAU};
use glam::Vec3;
use liftoff_engine::Transform;

/// One body moving on a circle around `center` at a fixed height.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitTracker {
    pub radius: f32,
    /// Radians per step.
    pub angular_speed: f32,
    angle: f32,
    pub center: Vec3,
    /// World y of the orbit plane.
    pub altitude: f32,
    /// Self-rotation added to the body per step (x, y, z radians).
    pub spin: Vec3,
    /// Set the body's y rotation to the direction of travel.
    pub face_heading: bool,
    /// The angle only advances while active.
    pub active: bool,
    /// Radial drift allowed before `resnap` pulls the body back.
    pub tolerance: f32,
    /// Steps between drift corrections; 0 disables them.
    pub resnap_interval: u32,
    frames: u32,
}

impl OrbitTracker {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self {
            radius,
            angular_speed,
            angle: 0.0,
            center: Vec3::ZERO,
            altitude: 0.0,
            spin: Vec3::ZERO,
            face_heading: false,
            active: true,
            tolerance: 0.5,
            resnap_interval: 1,
            frames: 0,
        }
    }

    /// Angular speed for a full revolution every `period_seconds` at `dt` per step.
    pub fn speed_for_period(period_seconds: f32, dt: f32) -> f32 {
        if period_seconds <= 0.0 {
            return 0.0;
        }
        TAU * dt / period_seconds
    }

    // -- Builder pattern --

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = wrap(angle);
        self
    }

    pub fn with_altitude(mut self, altitude: f32) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_heading(mut self, face_heading: bool) -> Self {
        self.face_heading = face_heading;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_correction(mut self, tolerance: f32, resnap_interval: u32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self.resnap_interval = resnap_interval;
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Direction of travel as a y rotation.
    pub fn heading(&self) -> f32 {
        self.angle + FRAC_PI_2
    }

    /// Point on the orbit at `angle`.
    pub fn position_at(&self, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3::new(
            self.center.x + self.radius * c,
            self.altitude,
            self.center.z + self.radius * s,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position_at(self.angle)
    }

    /// Advance one step and move `transform` onto the orbit. An inactive
    /// tracker leaves both the angle and the transform alone.
    pub fn step(&mut self, transform: &mut Transform) {
        if !self.active {
            return;
        }
        if self.angular_speed.is_finite() {
            self.angle = wrap(self.angle + self.angular_speed);
        }
        transform.position = self.position();
        if self.face_heading {
            transform.rotation.y = self.heading();
        }
        transform.rotation += self.spin;
    }

    /// The nominal point at the same angle and altitude when `position` has
    /// drifted further than `tolerance` from the radius, else None.
    pub fn resnap(&self, position: Vec3) -> Option<Vec3> {
        let dx = position.x - self.center.x;
        let dz = position.z - self.center.z;
        let distance = (dx * dx + dz * dz).sqrt();
        if (distance - self.radius).abs() <= self.tolerance {
            return None;
        }
        let angle = if distance > f32::EPSILON { dz.atan2(dx) } else { self.angle };
        Some(self.position_at(angle))
    }

    /// Run `resnap` on its interval. Returns true when the position was moved.
    pub fn correct(&mut self, transform: &mut Transform) -> bool {
        if self.resnap_interval == 0 {
            return false;
        }
        self.frames = self.frames.wrapping_add(1);
        if self.frames % self.resnap_interval != 0 {
            return false;
        }
        match self.resnap(transform.position) {
            Some(fixed) => {
                log::debug!("orbit drift corrected at angle {:.3}", self.angle);
                transform.position = fixed;
                true
            }
            None => false,
        }
    }
}

fn wrap(angle: f32) -> f32 {
    if angle.is_finite() {
        angle.rem_euclid(TAU)
    } else {
        0.0
    }
}
