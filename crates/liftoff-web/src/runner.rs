use liftoff_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    FixedTimestep, ProtocolLayout, FrameCounts, HEADER_FLOATS,
    AssetManifest, AssetRegistry, tick_emitters,
};
use liftoff_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner (see
/// `export_game!`) and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Stands in for the queue on the second and later steps of a frame, so
    /// a frame's input is applied exactly once.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
    /// Flat buffer of sound event IDs.
    sound_buffer: Vec<u8>,
    /// Sounds and events already handed to the page by the last publish.
    published: (usize, usize),
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let sound_buffer = Vec::with_capacity(config.max_sounds);
        let ctx = EngineContext::with_config(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer,
            camera_uniform,
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
            sound_buffer,
            published: (0, 0),
        }
    }

    /// Initialize the game. Call once after construction (and after any
    /// `load_config` / `load_manifest`).
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Hand a JSON configuration document to the game.
    /// Parse errors are logged and the previous configuration stays in effect.
    pub fn load_config(&mut self, json: &str) {
        if let Err(e) = self.game.configure(json) {
            log::error!("config rejected, keeping previous values: {}", e);
        }
    }

    /// Parse an asset manifest and reset the registry to its models, all pending.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                log::info!("manifest: {} models, {} sounds", manifest.models.len(), manifest.sounds.len());
                self.ctx.assets = AssetRegistry::from_manifest(&manifest);
            }
            Err(e) => log::error!("manifest parse failed: {}", e),
        }
    }

    /// The page finished loading a manifest model.
    pub fn asset_loaded(&mut self, name: &str) {
        match self.ctx.assets.mark_loaded(name) {
            Ok(event) => {
                log::debug!("asset loaded: {}", name);
                self.game.on_asset(&mut self.ctx, &event);
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    /// The page gave up loading a manifest model.
    pub fn asset_failed(&mut self, name: &str, reason: &str) {
        let error = self.ctx.assets.mark_failed(name, reason);
        log::error!("{}", error);
        if let liftoff_engine::AssetError::LoadFailed { name, reason } = error {
            let event = liftoff_engine::AssetEvent::Failed { name, reason };
            self.game.on_asset(&mut self.ctx, &event);
        }
    }

    /// Run one frame tick: timers, update, emitters + particles, late update,
    /// then rebuild every output buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Retire what the last frame published; asset callbacks between
        // frames may have queued more since.
        let (sounds, events) = self.published;
        self.ctx.retire_frame_data(sounds, events);

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            for kind in self.ctx.timers.tick(step_dt) {
                self.game.on_timer(&mut self.ctx, kind);
            }

            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);

            tick_emitters(&mut self.ctx.scene, &mut self.ctx.effects);
            self.ctx.effects.tick();

            self.game.late_update(&mut self.ctx);
        }

        // Input is only consumed once a step has seen it
        if steps > 0 {
            self.input.clear();
        }

        self.frame = self.frame.wrapping_add(1);
        self.publish();
    }

    /// Rebuild render, particle, camera and sound buffers and the header.
    fn publish(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        self.ctx.effects.rebuild_particle_buffer();
        self.camera_uniform = self.ctx.camera.uniform();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.layout.write_header(&mut self.header, FrameCounts {
            frame: self.frame,
            instances: self.render_buffer.instances.len(),
            particles: self.ctx.effects.particle_count(),
            sounds: self.sound_buffer.len(),
            events: self.ctx.events.len(),
            sim_time: self.timestep.elapsed() as f32,
            sim_ticks: self.timestep.ticks() as u32,
        });
        self.published = (self.ctx.sounds.len(), self.ctx.events.len());
    }

    /// Status document for the page's text overlay.
    pub fn status_json(&self) -> String {
        self.game.status_json(&self.ctx)
    }

    /// Read-only access for tests and tooling.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        (self.render_buffer.instance_count() as usize).min(self.layout.max_instances) as u32
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.ctx.effects.particle_buffer_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.ctx.effects.particle_count().min(self.layout.max_particles) as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    // ---- Capacity accessors (read by the page via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_particles(&self) -> u32 {
        self.layout.max_particles as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftoff_engine::{AssetEvent, EmitterComponent, GameEvent, ParticleKind, SoundEvent};

    const ASSET_EVENT: f32 = 8.0;

    /// Records the hook order the runner drives.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        assets: Vec<AssetEvent>,
        keys_seen: usize,
    }

    impl Game for Recorder {
        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.timers.schedule(0.0, 9);
            ctx.spawn(|e| e.with_emitter(EmitterComponent::new(ParticleKind::Smoke)));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.calls.push("update");
            self.keys_seen += input.len();
            ctx.emit_sound(SoundEvent(2));
        }

        fn late_update(&mut self, _ctx: &mut EngineContext) {
            self.calls.push("late");
        }

        fn on_timer(&mut self, _ctx: &mut EngineContext, kind: u32) {
            assert_eq!(kind, 9);
            self.calls.push("timer");
        }

        fn on_asset(&mut self, ctx: &mut EngineContext, event: &AssetEvent) {
            self.assets.push(event.clone());
            ctx.emit_event(GameEvent::new(ASSET_EVENT, 0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.tick(1.0 / 60.0);
        assert!(runner.game().calls.is_empty());
    }

    #[test]
    fn step_order_is_timer_update_late() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.tick(1.0 / 60.0 + 1e-4);
        assert_eq!(runner.game().calls, vec!["timer", "update", "late"]);
        // emitter ran between update and late update
        assert_eq!(runner.context().effects.len(), 1);
        assert_eq!(runner.sound_events_len(), 1);
    }

    #[test]
    fn input_is_seen_by_one_step_only() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(InputEvent::KeyDown { key_code: 88 });
        runner.tick(3.0 / 60.0 + 1e-4);
        assert_eq!(runner.game().keys_seen, 1);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().keys_seen, 1);
    }

    #[test]
    fn input_survives_a_frame_without_steps() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner.push_input(InputEvent::KeyDown { key_code: 76 });
        runner.tick(0.001);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().keys_seen, 1);
    }

    #[test]
    fn assets_flow_to_game() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.load_manifest(r#"{ "models": { "rocket": { "path": "r.glb", "mesh": 4 } } }"#);
        runner.init();
        runner.asset_loaded("rocket");
        runner.asset_loaded("unknown");
        runner.asset_failed("rocket", "decode error");
        let assets = &runner.game().assets;
        assert_eq!(assets.len(), 2);
        assert!(matches!(assets[1], AssetEvent::Failed { .. }));
    }

    #[test]
    fn asset_events_reach_the_next_frame() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.load_manifest(r#"{ "models": { "rocket": { "path": "r.glb", "mesh": 4 } } }"#);
        runner.init();
        runner.tick(1.0 / 60.0);
        runner.asset_loaded("rocket");
        runner.tick(1.0 / 60.0);
        let kinds: Vec<f32> = runner.context().events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ASSET_EVENT]);
        assert_eq!(runner.game_events_len(), 1);

        // shown once, then gone
        runner.tick(1.0 / 60.0);
        assert!(runner.context().events.is_empty());
    }

    #[test]
    fn asset_failure_sound_survives_a_frame_without_steps() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.load_manifest(r#"{ "models": { "rocket": { "path": "r.glb", "mesh": 4 } } }"#);
        runner.init();
        runner.asset_failed("rocket", "decode error");
        runner.tick(0.001);
        assert_eq!(runner.context().events.len(), 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn bad_manifest_keeps_registry() {
        let mut runner = GameRunner::new(Recorder::default());
        runner.load_manifest(r#"{ "models": { "rocket": { "path": "r.glb", "mesh": 4 } } }"#);
        runner.load_manifest("not json");
        assert_eq!(runner.context().assets.len(), 1);
    }
}
