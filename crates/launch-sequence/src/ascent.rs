//! Altitude-driven ascent curve: how far the rocket drifts sideways, how it
//! tilts and how small it looks at every height of the climb.
//!
//! Everything here is a pure function of altitude, so the same height always
//! produces the same pose regardless of frame rate or elapsed time.

use std::f32::consts::FRAC_PI_2;
use liftoff_engine::{lerp, progress, SPAN_EPSILON};

use crate::config::AscentConfig;
use crate::phase::AscentPhase;

/// The rocket pose for one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscentPose {
    /// Altitude after the step, capped at the orbit target.
    pub altitude: f32,
    /// Climb used for this step.
    pub step: f32,
    /// Horizontal drift on x.
    pub offset: f32,
    /// Roll about z (radians). Zero until the arc is under way.
    pub rot_z: f32,
    pub scale: f32,
    pub phase: AscentPhase,
}

/// Precomputed ascent curve for one launch.
#[derive(Debug, Clone)]
pub struct AscentProfile {
    config: AscentConfig,
    space_speed: f32,
}

impl AscentProfile {
    /// Build the curve. The space climb rate is fixed here, once per launch:
    /// fast enough that the arc from `fog_end` to orbit takes about a third as
    /// many frames as the ground climb to `fog_end`.
    pub fn new(config: &AscentConfig) -> Self {
        let d1 = (config.fog_end - config.start_altitude).max(SPAN_EPSILON);
        let d2 = (config.orbit_target - config.fog_end).max(SPAN_EPSILON);
        let ratio = config.speed_ratio.max(SPAN_EPSILON);
        let raw = config.ground_speed * d2 / (ratio * d1);
        let space_speed = raw.max(config.min_space_speed).min(config.ground_speed);
        log::debug!("ascent: ground speed {:.3}, space speed {:.4}", config.ground_speed, space_speed);
        Self {
            config: config.clone(),
            space_speed,
        }
    }

    pub fn config(&self) -> &AscentConfig {
        &self.config
    }

    pub fn space_speed(&self) -> f32 {
        self.space_speed
    }

    /// Climb per step at this altitude.
    pub fn speed_at(&self, altitude: f32) -> f32 {
        if altitude < self.config.fog_end {
            self.config.ground_speed
        } else {
            self.space_speed
        }
    }

    /// Position along the arc from `fog_end` to `orbit_target`, in [0, 1].
    pub fn curve_t(&self, altitude: f32) -> f32 {
        progress(altitude, self.config.fog_end, self.config.orbit_target)
    }

    /// Horizontal drift. Exactly 0 below the arc and exactly `max_offset` at its end.
    pub fn offset(&self, altitude: f32) -> f32 {
        let t = self.curve_t(altitude);
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            self.config.max_offset
        } else {
            self.config.max_offset * self.config.curve.apply(t)
        }
    }

    /// Roll that keeps the nose pointed along the path, from the drift over the
    /// last `step` of climb. Near the top it is pulled toward horizontal.
    pub fn rot_z(&self, altitude: f32, step: f32) -> f32 {
        if altitude <= self.config.fog_end + 1.0 {
            return 0.0;
        }
        let step = step.max(SPAN_EPSILON);
        let dx = self.offset(altitude) - self.offset(altitude - step);
        let rot = -dx.atan2(step);
        let t = self.curve_t(altitude);
        if t > 0.8 {
            lerp(rot, -FRAC_PI_2, ((t - 0.8) / 0.2) * self.config.attitude_gain)
        } else {
            rot
        }
    }

    /// Uniform visual scale: 1 on the ground, shrinking toward `end_scale` along the arc.
    pub fn scale(&self, altitude: f32) -> f32 {
        if altitude < self.config.fog_end {
            1.0
        } else {
            lerp(1.0, self.config.end_scale, self.curve_t(altitude))
        }
    }

    /// Phase for a launched rocket at this altitude.
    pub fn phase_at(&self, altitude: f32) -> AscentPhase {
        if altitude >= self.config.orbit_target {
            AscentPhase::InOrbit
        } else if altitude >= self.config.fog_end {
            AscentPhase::Space
        } else {
            AscentPhase::Atmosphere
        }
    }

    /// Climb one step from `altitude` and return the resulting pose.
    pub fn advance(&self, altitude: f32) -> AscentPose {
        let step = self.speed_at(altitude);
        let next = (altitude + step).min(self.config.orbit_target);
        AscentPose {
            altitude: next,
            step,
            offset: self.offset(next),
            rot_z: self.rot_z(next, step),
            scale: self.scale(next),
            phase: self.phase_at(next),
        }
    }
}

impl Default for AscentProfile {
    fn default() -> Self {
        Self::new(&AscentConfig::default())
    }
}
