pub mod effects;
pub mod emitter;
pub mod render;
