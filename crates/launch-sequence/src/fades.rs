//! Altitude-driven scenery: the cloud-band fog, the ground shrinking away
//! beneath the climb and the Earth globe growing into view.

use std::f32::consts::TAU;
use liftoff_engine::{progress, SPAN_EPSILON};

use crate::config::{AscentConfig, FadeConfig};

const SECONDS_PER_DAY: f32 = 86_400.0;

/// Fog distances for the current camera height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub near: f32,
    pub far: f32,
    /// The camera is inside the cloud band.
    pub in_band: bool,
}

/// Globe scale and visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthLook {
    pub visible: bool,
    pub scale: f32,
    /// Appearance progress in [0, 1].
    pub t: f32,
}

#[derive(Debug, Clone)]
pub struct Fades {
    config: FadeConfig,
    fog_start: f32,
    fog_end: f32,
}

impl Fades {
    pub fn new(config: &FadeConfig, ascent: &AscentConfig) -> Self {
        Self {
            config: config.clone(),
            fog_start: ascent.fog_start,
            fog_end: ascent.fog_end,
        }
    }

    pub fn fog(&self, y: f32) -> Fog {
        let c = &self.config;
        if y < self.fog_start || y >= self.fog_end {
            return Fog { near: c.clear_fog[0], far: c.clear_fog[1], in_band: false };
        }
        let t = progress(y, self.fog_start, self.fog_end);
        Fog {
            near: c.band_fog_start[0] + c.band_fog_delta[0] * t,
            far: c.band_fog_start[1] + c.band_fog_delta[1] * t,
            in_band: true,
        }
    }

    /// Uniform scale for ground props: 1 below the band, shrinking through
    /// it and gone past the cutoff.
    pub fn ground(&self, y: f32) -> f32 {
        if y < self.fog_start {
            1.0
        } else if y > self.config.ground_cutoff {
            0.0
        } else {
            let span = (self.fog_end - self.fog_start).max(SPAN_EPSILON);
            1.0 - ((y - self.fog_start) / span).min(1.0)
        }
    }

    /// Whether a prop at ground scale `g` should still be drawn.
    pub fn ground_visible(&self, g: f32) -> bool {
        g > self.config.ground_hide_below
    }

    pub fn earth(&self, y: f32) -> EarthLook {
        let c = &self.config;
        let t = progress(y, c.earth_appear_start, c.earth_appear_start + c.earth_appear_span);
        EarthLook {
            visible: t > c.earth_hide_below,
            scale: c.earth_start_scale - t * (c.earth_start_scale - c.earth_end_scale),
            t,
        }
    }

    pub fn ring_visible(&self, y: f32) -> bool {
        y >= self.fog_end
    }

    /// Globe rotation for `dt` seconds: real Earth rate, sped up. Zero below
    /// the top of the band.
    pub fn earth_spin(&self, dt: f32, y: f32) -> f32 {
        if y < self.fog_end {
            return 0.0;
        }
        TAU / SECONDS_PER_DAY * self.config.earth_spin_multiplier * dt
    }
}

impl Default for Fades {
    fn default() -> Self {
        Self::new(&FadeConfig::default(), &AscentConfig::default())
    }
}
