use crate::api::types::{EntityId, SoundEvent, GameEvent};
use crate::assets::registry::{AssetEvent, AssetRegistry};
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::core::timer::TimerQueue;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::systems::effects::EffectsState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of render instances (default: 256).
    pub max_instances: usize,
    /// Maximum number of particles written to the frame buffer (default: 4096).
    /// Live particles are not capped; only the buffer section is.
    pub max_particles: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the effects RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_instances: 256,
            max_particles: 4096,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
///
/// Per fixed step the runner calls, in order: `on_timer` for each delayed
/// event that came due, `update`, then ticks emitters and ages particles, then
/// `late_update`.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply a JSON configuration document. Called before `init` when the page
    /// supplies one. On error the game keeps its previous configuration.
    fn configure(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The main tick. Read input, advance controllers, spawn/despawn entities.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Runs after particles have aged for this step. Altitude-driven visual
    /// state that must see the step's final positions goes here.
    fn late_update(&mut self, _ctx: &mut EngineContext) {}

    /// A timer scheduled through `ctx.timers` came due.
    fn on_timer(&mut self, _ctx: &mut EngineContext, _kind: u32) {}

    /// The page reported the outcome of loading a manifest asset.
    fn on_asset(&mut self, _ctx: &mut EngineContext, _event: &AssetEvent) {}

    /// Human-readable status document for the page's text overlay.
    fn status_json(&self, _ctx: &EngineContext) -> String {
        "{}".to_string()
    }
}

/// Mutable access to engine state, passed to every Game hook.
pub struct EngineContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    pub timers: TimerQueue,
    pub camera: Camera3D,
    pub assets: AssetRegistry,
    /// Fixed step length in seconds.
    pub dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances.min(1024)),
            effects: EffectsState::with_capacity(config.seed, config.max_particles),
            sounds: Vec::new(),
            events: Vec::new(),
            timers: TimerQueue::new(),
            camera: Camera3D::default(),
            assets: AssetRegistry::new(),
            dt: config.fixed_dt,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity built from a fresh ID. Returns the ID.
    pub fn spawn(&mut self, build: impl FnOnce(Entity) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(build(Entity::new(id)));
        id
    }

    /// Remove an entity. Returns true if it existed.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.scene.despawn(id).is_some()
    }

    /// Emit a sound event to be forwarded to the page.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drop the first `sounds` sounds and `events` events, the ones the page
    /// has already been shown. Anything raised after that publish is kept.
    pub fn retire_frame_data(&mut self, sounds: usize, events: usize) {
        self.sounds.drain(..sounds.min(self.sounds.len()));
        self.events.drain(..events.min(self.events.len()));
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn spawn_and_despawn() {
        let mut ctx = EngineContext::new();
        let id = ctx.spawn(|e| e.with_tag("pad").with_position(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(ctx.scene.get(id).unwrap().tag, "pad");
        assert!(ctx.despawn(id));
        assert!(!ctx.despawn(id));
    }

    #[test]
    fn retire_keeps_late_sounds_and_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.emit_event(GameEvent::new(8.0, 0.0, 0.0, 0.0));
        ctx.retire_frame_data(1, 1);
        assert!(ctx.sounds.is_empty());
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, 8.0);

        // counts past the end just empty the queues
        ctx.retire_frame_data(5, 5);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn config_carries_step_length() {
        let config = GameConfig { fixed_dt: 0.01, ..GameConfig::default() };
        let ctx = EngineContext::with_config(&config);
        assert_eq!(ctx.dt, 0.01);
    }
}
