use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Hidden entities and entities without a mesh are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.visible {
            continue;
        }

        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let t = &entity.transform;
        buffer.push(RenderInstance {
            x: t.position.x,
            y: t.position.y,
            z: t.position.z,
            rot_x: t.rotation.x,
            rot_y: t.rotation.y,
            rot_z: t.rotation.z,
            scale_x: t.scale.x,
            scale_y: t.scale.y,
            scale_z: t.scale.z,
            mesh: mesh.handle.0 as f32,
            opacity: entity.opacity,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            _pad: [0.0; 2],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{MeshComponent, MeshHandle};
    use glam::Vec3;

    #[test]
    fn skips_hidden_and_meshless() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_position(Vec3::new(1.0, 2.0, 3.0))
                .with_mesh(MeshComponent::new(MeshHandle(7))),
            Entity::new(EntityId(2))
                .with_mesh(MeshComponent::new(MeshHandle(8)))
                .with_visible(false),
            Entity::new(EntityId(3)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.instances[0];
        assert_eq!(inst.mesh, 7.0);
        assert_eq!((inst.x, inst.y, inst.z), (1.0, 2.0, 3.0));
        assert_eq!(inst.scale_y, 1.0);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let entities = vec![Entity::new(EntityId(1)).with_mesh(MeshComponent::new(MeshHandle(1)))];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }
}
