//! Tunables for the launch run, loadable from JSON.
//!
//! Every field has a default, so a document only needs the values it changes:
//!
//! ```json
//! { "ascent": { "orbit_target": 370.0, "ground_speed": 0.5 } }
//! ```

use liftoff_engine::Easing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub ascent: AscentConfig,
    pub separation: SeparationConfig,
    pub orbit: OrbitConfig,
    pub camera: CameraConfig,
    pub clamp: ClampConfig,
    pub fades: FadeConfig,
    pub orbit_view: OrbitViewConfig,
    /// Seconds between orbit insertion and the switch to the orbit view.
    pub transition_delay: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            ascent: AscentConfig::default(),
            separation: SeparationConfig::default(),
            orbit: OrbitConfig::default(),
            camera: CameraConfig::default(),
            clamp: ClampConfig::default(),
            fades: FadeConfig::default(),
            orbit_view: OrbitViewConfig::default(),
            transition_delay: 1.0,
        }
    }
}

impl LaunchConfig {
    /// The earlier pad layout: lower orbit and a slower climb.
    pub fn early_pad() -> Self {
        Self {
            ascent: AscentConfig {
                orbit_target: 370.0,
                ground_speed: 0.5,
                ..AscentConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscentConfig {
    /// Rocket base height on the pad.
    pub start_altitude: f32,
    /// The rocket's z on the pad; held for the whole climb.
    pub pad_z: f32,
    /// Climb per step below `fog_end`.
    pub ground_speed: f32,
    /// Climb speed in space = ground · d2 / (ratio · d1), see `AscentProfile`.
    pub speed_ratio: f32,
    pub min_space_speed: f32,
    pub fog_start: f32,
    /// Top of the cloud band; the arc toward orbit starts here.
    pub fog_end: f32,
    pub orbit_target: f32,
    /// Horizontal drift reached at `orbit_target`.
    pub max_offset: f32,
    pub curve: Easing,
    /// Rocket scale at `orbit_target` (1.0 on the ground).
    pub end_scale: f32,
    /// Weight of the pull toward horizontal in the last fifth of the arc.
    pub attitude_gain: f32,
}

impl Default for AscentConfig {
    fn default() -> Self {
        Self {
            start_altitude: 4.5,
            pad_z: -0.7,
            ground_speed: 1.2,
            speed_ratio: 3.0,
            min_space_speed: 0.05,
            fog_start: 200.0,
            fog_end: 330.0,
            orbit_target: 440.0,
            max_offset: 80.0,
            curve: Easing::SineIn,
            end_scale: 0.1,
            attitude_gain: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    pub height: f32,
    /// The dropped stage starts this far below the rocket.
    pub drop_offset: f32,
    pub fall_speed: f32,
    /// Base tumble per step (x, y, z radians).
    pub tumble: [f32; 3],
    /// Uniform ± jitter added to the tumble each step.
    pub tumble_jitter: [f32; 3],
    pub ground_level: f32,
    pub explosion_count: usize,
    pub explosion_spread: f32,
    pub smoke_count: usize,
    pub smoke_spread: f32,
    pub landing_count: usize,
    pub landing_spread: f32,
    /// Height the landing explosion is centred at.
    pub landing_height: f32,
    pub trail_smoke_chance: f32,
    pub trail_fire_chance: f32,
    /// Y-scale factor applied to the rocket when no separate lower part exists.
    pub trim_scale: f32,
    /// Lift applied with the trim so the shortened rocket keeps its nose height.
    pub trim_lift: f32,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            height: 350.0,
            drop_offset: 6.0,
            fall_speed: 0.6,
            tumble: [0.03, 0.01, 0.025],
            tumble_jitter: [0.01, 0.005, 0.01],
            ground_level: 0.0,
            explosion_count: 30,
            explosion_spread: 6.0,
            smoke_count: 15,
            smoke_spread: 4.0,
            landing_count: 25,
            landing_spread: 8.0,
            landing_height: 2.0,
            trail_smoke_chance: 0.4,
            trail_fire_chance: 0.2,
            trim_scale: 0.6,
            trim_lift: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radius the inserted rocket is held on.
    pub radius: f32,
    /// Seconds per revolution of the inserted rocket.
    pub period_seconds: f32,
    /// Allowed radial drift before the position is restored.
    pub tolerance: f32,
    /// Steps between drift corrections.
    pub resnap_interval: u32,
    pub marker_radius: f32,
    pub marker_speed: f32,
    pub marker_altitude: f32,
    /// Marker self-spin per step (x, y, z radians).
    pub marker_spin: [f32; 3],
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 25.0,
            period_seconds: 90.0,
            tolerance: 0.5,
            resnap_interval: 1,
            marker_radius: 80.0,
            marker_speed: 0.02,
            marker_altitude: 0.0,
            marker_spin: [0.0, 0.02, 0.01],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    pub move_speed: f32,
    pub fly_speed: f32,
    /// Eye height the free camera never sinks below.
    pub floor: f32,
    pub follow_offset: [f32; 3],
    pub look_ahead: f32,
    /// Follow is on when the launch starts.
    pub follow_on_launch: bool,
    /// Arrow / Q / E step for the follow offset.
    pub offset_step: f32,
    /// Z / C / V / B step for the follow rotation.
    pub rotation_step: f32,
    pub overlook_position: [f32; 3],
    pub overlook_target: [f32; 3],
    pub base_fov: f32,
    pub min_fov: f32,
    pub fov_start_height: f32,
    pub fov_end_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 25.0, 25.0],
            move_speed: 0.1,
            fly_speed: 0.1,
            floor: 1.6,
            follow_offset: [0.0, 10.0, 35.0],
            look_ahead: 5.0,
            follow_on_launch: true,
            offset_step: 2.0,
            rotation_step: 0.1,
            overlook_position: [0.0, 100.0, 120.0],
            overlook_target: [0.0, 0.0, 0.0],
            base_fov: 75.0,
            min_fov: 30.0,
            fov_start_height: 50.0,
            fov_end_height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampConfig {
    /// Radians per step.
    pub speed: f32,
    pub pivot: [f32; 3],
    pub rest: [f32; 3],
    /// Total swing, radians.
    pub swing: f32,
    /// Remaining angle below which the swing snaps to its target.
    pub snap: f32,
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self {
            speed: 0.005,
            pivot: [4.0, 11.0, 0.0],
            rest: [0.0, -3.0, 0.0],
            swing: std::f32::consts::FRAC_PI_2,
            snap: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fog distances outside the cloud band.
    pub clear_fog: [f32; 2],
    /// Fog near/far at the bottom of the band.
    pub band_fog_start: [f32; 2],
    /// Fog near/far change across the band.
    pub band_fog_delta: [f32; 2],
    /// Camera height above which ground props are gone entirely.
    pub ground_cutoff: f32,
    pub ground_hide_below: f32,
    pub earth_appear_start: f32,
    pub earth_appear_span: f32,
    pub earth_start_scale: f32,
    pub earth_end_scale: f32,
    pub earth_hide_below: f32,
    /// Real Earth rotation multiplied by this factor.
    pub earth_spin_multiplier: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            clear_fog: [10000.0, 20000.0],
            band_fog_start: [50.0, 1000.0],
            band_fog_delta: [200.0, -800.0],
            ground_cutoff: 300.0,
            ground_hide_below: 0.01,
            earth_appear_start: 300.0,
            earth_appear_span: 300.0,
            earth_start_scale: 20.0,
            earth_end_scale: 1.5,
            earth_hide_below: 0.01,
            earth_spin_multiplier: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitViewConfig {
    pub rocket_radius: f32,
    pub rocket_speed: f32,
    pub satellite_radius: f32,
    pub satellite_speed: f32,
    pub satellite_spin: f32,
    pub earth_spin: f32,
    /// Radians added per 1/2/3 key press.
    pub part_turn: f32,
    /// Distance Q/E move a stage away from the stack.
    pub part_shift: f32,
    /// Vertical gap beyond which neighbouring parts count as separated.
    pub separation_threshold: f32,
    pub camera_position: [f32; 3],
    pub fog: [f32; 2],
}

impl Default for OrbitViewConfig {
    fn default() -> Self {
        Self {
            rocket_radius: 30.0,
            rocket_speed: 0.01,
            satellite_radius: 35.0,
            satellite_speed: 0.015,
            satellite_spin: 0.01,
            earth_spin: 0.001,
            part_turn: 0.2,
            part_shift: 2.0,
            separation_threshold: 1.0,
            camera_position: [0.0, 50.0, 50.0],
            fog: [100.0, 200.0],
        }
    }
}
