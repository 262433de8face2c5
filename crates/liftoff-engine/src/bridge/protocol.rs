/// Frame buffer layout shared with the page.
/// Must stay in sync with the page-side `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 16 floats]
/// [Particles: max_particles × 8 floats]
/// [Camera: 24 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame alongside the live
/// counts. The page reads them from the header to compute offsets.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{ParticleInstance, RenderInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_PARTICLES: usize = 4;
pub const HEADER_PARTICLE_COUNT: usize = 5;
pub const HEADER_MAX_SOUNDS: usize = 6;
pub const HEADER_SOUND_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_SIM_TIME: usize = 10;
pub const HEADER_SIM_TICKS: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per particle: x, y, z, scale, opacity, kind, pad×2.
pub const PARTICLE_FLOATS: usize = ParticleInstance::FLOATS;

/// Floats in the camera section: view-projection, eye, params.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Live values for one frame's header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounts {
    pub frame: u32,
    pub instances: usize,
    pub particles: usize,
    pub sounds: usize,
    pub events: usize,
    pub sim_time: f32,
    pub sim_ticks: u32,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum live particles written per frame.
    pub max_particles: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of particle data section in floats.
    pub particle_data_floats: usize,
    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where particle data begins.
    pub particle_data_offset: usize,
    /// Offset (in floats) where the camera uniform begins.
    pub camera_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_particles: usize, max_sounds: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let particle_data_floats = max_particles * PARTICLE_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let particle_data_offset = instance_data_offset + instance_data_floats;
        let camera_data_offset = particle_data_offset + particle_data_floats;
        let sound_data_offset = camera_data_offset + CAMERA_FLOATS;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_particles,
            max_sounds,
            max_events,
            instance_data_floats,
            particle_data_floats,
            sound_data_floats,
            event_data_floats,
            instance_data_offset,
            particle_data_offset,
            camera_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_particles,
            config.max_sounds,
            config.max_events,
        )
    }

    /// Fill a header block. Counts are clamped to the section capacities,
    /// matching how many records the page may read.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], counts: FrameCounts) {
        *header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = counts.frame as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = counts.instances.min(self.max_instances) as f32;
        header[HEADER_MAX_PARTICLES] = self.max_particles as f32;
        header[HEADER_PARTICLE_COUNT] = counts.particles.min(self.max_particles) as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_SOUND_COUNT] = counts.sounds.min(self.max_sounds) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        header[HEADER_SIM_TIME] = counts.sim_time;
        header[HEADER_SIM_TICKS] = counts.sim_ticks as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.instance_data_floats, config.max_instances * 16);
        assert_eq!(layout.particle_data_floats, config.max_particles * 8);
        assert_eq!(layout.sound_data_floats, config.max_sounds);
        assert_eq!(layout.event_data_floats, config.max_events * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(128, 2048, 16, 64);

        let expected_total = HEADER_FLOATS + 128 * 16 + 2048 * 8 + 24 + 16 + 64 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 200, 10, 20);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.particle_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.camera_data_offset, layout.particle_data_offset + layout.particle_data_floats);
        assert_eq!(layout.sound_data_offset, layout.camera_data_offset + CAMERA_FLOATS);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + layout.sound_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_clamps_counts_to_capacity() {
        let layout = ProtocolLayout::new(4, 8, 2, 2);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(&mut header, FrameCounts {
            frame: 3,
            instances: 10,
            particles: 5,
            sounds: 1,
            events: 0,
            sim_time: 1.5,
            sim_ticks: 90,
        });
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 4.0);
        assert_eq!(header[HEADER_PARTICLE_COUNT], 5.0);
        assert_eq!(header[HEADER_SIM_TICKS], 90.0);
    }
}
