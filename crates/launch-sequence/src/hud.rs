use serde::Serialize;

use crate::orbit_view::OrbitViewStatus;

/// Text-overlay readout, serialised for the page once per frame on request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudStatus {
    /// "launch" or "orbit".
    pub scene: &'static str,
    pub status: &'static str,
    pub camera: [f32; 3],
    pub camera_mode: &'static str,
    pub follow: bool,
    pub follow_offset: [f32; 3],
    /// Extra follow pitch and yaw, degrees.
    pub follow_rotation: [f32; 2],
    pub clamp_angle: f32,
    pub altitude: f32,
    /// Climb progress from the pad to orbit, percent.
    pub progress: f32,
    pub fov: f32,
    pub fog: [f32; 2],
    pub in_cloud_band: bool,
    pub particles: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbit_view: Option<OrbitViewStatus>,
}

impl HudStatus {
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::error!("status serialisation failed: {}", e);
                "{}".to_string()
            }
        }
    }
}

/// Round to two decimals for display.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

pub fn round_vec(v: glam::Vec3) -> [f32; 3] {
    [round2(v.x), round2(v.y), round2(v.z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit_view::PartStatus;

    fn sample() -> HudStatus {
        HudStatus {
            scene: "launch",
            status: "grounded",
            camera: [0.0, 25.0, 25.0],
            camera_mode: "free",
            follow: true,
            follow_offset: [0.0, 10.0, 35.0],
            follow_rotation: [0.0, 0.0],
            clamp_angle: 0.0,
            altitude: 4.5,
            progress: 0.0,
            fov: 75.0,
            fog: [10000.0, 20000.0],
            in_cloud_band: false,
            particles: 0,
            orbit_view: None,
        }
    }

    #[test]
    fn launch_status_omits_orbit_view() {
        let json = sample().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "grounded");
        assert_eq!(value["camera"][1], 25.0);
        assert!(value.get("orbit_view").is_none());
    }

    #[test]
    fn orbit_view_parts_are_kebab_case() {
        let mut status = sample();
        status.scene = "orbit";
        status.orbit_view = Some(OrbitViewStatus {
            orbiting: true,
            speed: 0.01,
            lower: PartStatus::Separated,
            upper: PartStatus::Attached,
            payload: PartStatus::Attached,
            parts_visible: true,
            satellite_visible: false,
        });
        let value: serde_json::Value = serde_json::from_str(&status.to_json()).unwrap();
        assert_eq!(value["orbit_view"]["lower"], "separated");
        assert_eq!(value["orbit_view"]["satellite_visible"], false);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round_vec(glam::Vec3::new(0.006, -1.004, 2.0)), [0.01, -1.0, 2.0]);
    }
}
