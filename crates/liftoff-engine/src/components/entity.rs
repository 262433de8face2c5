use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::emitter::EmitterComponent;
use crate::components::mesh::MeshComponent;
use crate::components::transform::Transform;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is drawn. Hidden entities still update.
    pub visible: bool,
    /// World-space transform.
    pub transform: Transform,
    /// Mesh component (optional; entities without a mesh are not drawn).
    pub mesh: Option<MeshComponent>,
    /// Material opacity in [0, 1].
    pub opacity: f32,
    /// Particle emitters anchored to this entity.
    pub emitters: Vec<EmitterComponent>,
}

impl Entity {
    /// Create a new, visible entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            transform: Transform::IDENTITY,
            mesh: None,
            opacity: 1.0,
            emitters: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_emitter(mut self, emitter: EmitterComponent) -> Self {
        self.emitters.push(emitter);
        self
    }

    /// Position shortcut.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Turn every attached emitter on or off.
    pub fn set_emitters_active(&mut self, active: bool) {
        for emitter in &mut self.emitters {
            emitter.active = active;
        }
    }
}
