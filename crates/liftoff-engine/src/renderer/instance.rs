use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the browser-side renderer.
/// Must match the page protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Position in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation (XYZ order) in radians.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// Per-axis scale.
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    /// Mesh handle, as a float.
    pub mesh: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Tint.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: [f32; 2],
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-particle render data: x, y, z, scale, opacity, kind, pad×2.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale: f32,
    pub opacity: f32,
    pub kind: f32,
    pub _pad: [f32; 2],
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
}

/// Render buffer containing all visible mesh instances.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for direct memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
