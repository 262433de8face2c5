pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use components::transform::Transform;
pub use components::mesh::{MeshComponent, MeshColor, MeshHandle};
pub use components::emitter::{EmitterComponent, EmissionMode};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::timer::TimerQueue;
pub use renderer::instance::{RenderInstance, RenderBuffer, ParticleInstance};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use input::queue::{InputEvent, InputQueue};
pub use input::keys::{codes, KeyState};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetRegistry, AssetEvent, AssetError, AssetStatus};
pub use bridge::protocol::{ProtocolLayout, FrameCounts, HEADER_FLOATS};
pub use systems::effects::{EffectsState, Particle, ParticleKind, Rng};
pub use systems::emitter::tick_emitters;

// Extensions: decoupled optional helpers
pub use extensions::{Easing, lerp, lerp_vec3, ease, progress, SPAN_EPSILON};
