pub mod emitter;
pub mod entity;
pub mod mesh;
pub mod transform;
