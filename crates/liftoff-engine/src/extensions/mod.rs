// extensions/mod.rs
//
// Optional extension modules for the engine.
// These are decoupled from core Entity/Scene; games opt in by calling them.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease, progress, SPAN_EPSILON};
