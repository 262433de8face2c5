/// Opaque handle to a mesh owned by the browser-side renderer.
/// The engine never inspects geometry; it only forwards the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshHandle(pub u32);

/// RGB tint multiplied into the mesh material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Component for mesh-rendered entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub handle: MeshHandle,
    pub color: MeshColor,
}

impl MeshComponent {
    pub fn new(handle: MeshHandle) -> Self {
        Self {
            handle,
            color: MeshColor::WHITE,
        }
    }

    pub fn with_color(mut self, color: MeshColor) -> Self {
        self.color = color;
        self
    }
}
