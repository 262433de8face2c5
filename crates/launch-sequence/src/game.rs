/// Launch Sequence: swing the clamp clear, light the engines, climb through
/// the clouds, drop the lower stage and settle into orbit, then hand over to
/// the orbit view.
///
/// Pad controls: X swings the clamp, L launches. Arrows / Q / E shift the
/// follow camera, Z / C / V / B turn it, R resets it, T toggles follow.
/// WASD + Space / Shift fly the free camera while the pointer is locked.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use liftoff_engine::*;

use crate::ascent::AscentProfile;
use crate::clamp::ClampArm;
use crate::config::LaunchConfig;
use crate::fades::{Fades, Fog};
use crate::hud::{self, HudStatus};
use crate::orbit::OrbitTracker;
use crate::orbit_view::OrbitView;
use crate::pad::{self, SceneHandles};
use crate::phase::{AscentPhase, LaunchStatus, OneShot, PhaseClock};
use crate::rig::{CameraMode, CameraRig};
use crate::separation::SeparationController;

// ── Sound ids for the page's audio layer ────────────────────────────

pub mod sounds {
    pub const EXPLOSION: u32 = 1;
    pub const IGNITION: u32 = 2;
}

// ── Game event kinds to the page ────────────────────────────────────

pub mod events {
    /// a = phase id, b = altitude.
    pub const PHASE_CHANGED: f32 = 1.0;
    pub const CLAMP_RELEASED: f32 = 2.0;
    pub const LAUNCHED: f32 = 3.0;
    /// a = altitude.
    pub const STAGE_SEPARATED: f32 = 4.0;
    /// a = x, b = z of the impact.
    pub const STAGE_LANDED: f32 = 5.0;
    /// a = altitude.
    pub const ORBIT_REACHED: f32 = 6.0;
    pub const SCENE_TRANSITION: f32 = 7.0;
    pub const ROCKET_READY: f32 = 8.0;
    pub const ROCKET_UNAVAILABLE: f32 = 9.0;
}

// ── Custom event kinds from the page ────────────────────────────────

pub mod custom {
    /// Start the whole run over.
    pub const RESET: u32 = 1;
    /// a = stack orbit speed, radians per step.
    pub const ORBIT_SPEED: u32 = 2;
    pub const TOGGLE_ORBIT: u32 = 3;
    pub const REASSEMBLE: u32 = 4;
    pub const TOGGLE_PARTS: u32 = 5;
    pub const TOGGLE_SATELLITE: u32 = 6;
    /// a > 0.5 starts the stack orbit, otherwise stops it.
    pub const SET_ORBIT: u32 = 7;
}

// ── Timer kinds ─────────────────────────────────────────────────────

pub mod timers {
    pub const SCENE_TRANSITION: u32 = 1;
}

/// Everything a run mutates. Replaced wholesale on reset.
pub struct LaunchState {
    pub phase: AscentPhase,
    pub clock: PhaseClock,
    pub profile: AscentProfile,
    pub clamp: ClampArm,
    pub separation: SeparationController,
    pub rig: CameraRig,
    pub fades: Fades,
    /// The inserted rocket's circle around the pad.
    pub rocket_orbit: OrbitTracker,
    /// The green cube circling the scene once orbit is reached.
    pub marker_orbit: OrbitTracker,
    pub fog: Fog,
    launched: OneShot,
    orbit_reached: OneShot,
}

impl LaunchState {
    pub fn new(config: &LaunchConfig, dt: f32) -> Self {
        let orbit = &config.orbit;
        let fades = Fades::new(&config.fades, &config.ascent);
        let fog = fades.fog(config.camera.start_position[1]);
        Self {
            phase: AscentPhase::Grounded,
            clock: PhaseClock::new(config.ascent.start_altitude),
            profile: AscentProfile::new(&config.ascent),
            clamp: ClampArm::new(&config.clamp),
            separation: SeparationController::new(&config.separation),
            rig: CameraRig::new(&config.camera),
            fades,
            rocket_orbit: OrbitTracker::new(orbit.radius, OrbitTracker::speed_for_period(orbit.period_seconds, dt))
                .with_altitude(config.ascent.orbit_target)
                .with_correction(orbit.tolerance, orbit.resnap_interval)
                .with_active(false),
            marker_orbit: OrbitTracker::new(orbit.marker_radius, orbit.marker_speed)
                .with_altitude(orbit.marker_altitude)
                .with_spin(Vec3::from(orbit.marker_spin))
                .with_active(false),
            fog,
            launched: OneShot::new(),
            orbit_reached: OneShot::new(),
        }
    }

    pub fn launched(&self) -> bool {
        self.launched.has_fired()
    }

    pub fn in_orbit(&self) -> bool {
        self.orbit_reached.has_fired()
    }

    pub fn status(&self) -> LaunchStatus {
        LaunchStatus::derive(self.phase, self.clamp.state(), self.separation.state())
    }
}

enum Mode {
    Launch,
    Orbit(OrbitView),
}

pub struct LaunchSequence {
    config: LaunchConfig,
    state: LaunchState,
    keys: KeyState,
    handles: SceneHandles,
    mode: Mode,
    dt: f32,
}

impl LaunchSequence {
    pub fn new() -> Self {
        Self::with_config(LaunchConfig::default())
    }

    pub fn with_config(config: LaunchConfig) -> Self {
        let dt = GameConfig::default().fixed_dt;
        Self {
            state: LaunchState::new(&config, dt),
            config,
            keys: KeyState::new(),
            handles: SceneHandles::default(),
            mode: Mode::Launch,
            dt,
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn state(&self) -> &LaunchState {
        &self.state
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    pub fn orbit_view(&self) -> Option<&OrbitView> {
        match &self.mode {
            Mode::Orbit(view) => Some(view),
            Mode::Launch => None,
        }
    }

    /// Rebuild the pad and start a fresh run.
    fn reset(&mut self, ctx: &mut EngineContext) {
        ctx.scene.clear();
        ctx.effects.clear();
        ctx.timers.clear();
        self.state = LaunchState::new(&self.config, self.dt);
        self.mode = Mode::Launch;
        self.handles = pad::build(ctx, &self.config);
        self.state.rig.place(&mut ctx.camera);
        ctx.camera.fog_near = self.state.fog.near;
        ctx.camera.fog_far = self.state.fog.far;
        log::info!("launch sequence ready (orbit target {})", self.config.ascent.orbit_target);
    }

    fn announce_phase(&self, ctx: &mut EngineContext, altitude: f32) {
        log::info!("phase: {} at altitude {:.1}", self.state.phase.label(), altitude);
        ctx.emit_event(GameEvent::new(events::PHASE_CHANGED, self.state.phase.as_f32(), altitude, 0.0));
    }

    // ── Custom events ───────────────────────────────────────────────

    /// Returns true if the run was reset.
    fn handle_custom(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> bool {
        let mut reset = false;
        for (kind, [a, ..]) in input.customs() {
            if kind == custom::RESET {
                self.reset(ctx);
                reset = true;
                continue;
            }
            match &mut self.mode {
                Mode::Orbit(view) => match kind {
                    custom::ORBIT_SPEED => view.set_speed(a),
                    custom::TOGGLE_ORBIT => view.toggle_orbit(),
                    custom::SET_ORBIT => view.set_orbiting(a > 0.5),
                    custom::REASSEMBLE => view.reassemble(),
                    custom::TOGGLE_PARTS => view.toggle_parts(ctx),
                    custom::TOGGLE_SATELLITE => view.toggle_satellite(ctx),
                    _ => log::debug!("unknown custom event {}", kind),
                },
                Mode::Launch => log::debug!("custom event {} ignored on the pad", kind),
            }
        }
        reset
    }

    // ── Launch scene ────────────────────────────────────────────────

    fn try_launch(&mut self, ctx: &mut EngineContext) {
        if self.state.launched() {
            log::debug!("already launched");
            return;
        }
        if !self.state.clamp.released() {
            log::warn!("launch refused: clamp still holds the rocket (press X)");
            return;
        }
        let Some(rocket_id) = self.handles.rocket else {
            log::warn!("launch refused: rocket model not loaded");
            return;
        };

        self.state.launched.fire();
        self.state.clock.start();
        if let Some(rocket) = ctx.scene.get_mut(rocket_id) {
            rocket.set_emitters_active(true);
            rocket.visible = true;
            rocket.transform.scale = Vec3::ONE;
        }
        if let Some(clamp) = self.handles.clamp {
            ctx.scene.set_visible(clamp, false);
        }
        self.state.rig.set_tracking(true);
        ctx.emit_sound(SoundEvent(sounds::IGNITION));
        ctx.emit_event(GameEvent::new(events::LAUNCHED, 0.0, 0.0, 0.0));
        if self.state.phase.advance(AscentPhase::Atmosphere) {
            self.announce_phase(ctx, self.state.clock.altitude());
        }
    }

    /// One step of the climb: altitude, separation, then the pose along the arc.
    fn step_ascent(&mut self, ctx: &mut EngineContext) {
        let Some(rocket_id) = self.handles.rocket else {
            return;
        };
        let before = self.state.clock.altitude();
        let pose = self.state.profile.advance(before);
        self.state.clock.step(ctx.dt, pose.altitude - before);
        self.state.clock.raise_to(pose.altitude);
        let altitude = self.state.clock.altitude();

        let (_, lift) = self.state.separation.trim();
        if let Some(rocket) = ctx.scene.get_mut(rocket_id) {
            rocket.transform.position.y = altitude + lift;
        }
        if self.state.separation.check(ctx, altitude, rocket_id) {
            ctx.emit_event(GameEvent::new(events::STAGE_SEPARATED, altitude, 0.0, 0.0));
        }

        if self.state.phase.advance(pose.phase) {
            self.announce_phase(ctx, altitude);
        }

        let (trim, lift) = self.state.separation.trim();
        let pad_z = self.config.ascent.pad_z;
        let mut rocket_transform = None;
        if let Some(rocket) = ctx.scene.get_mut(rocket_id) {
            rocket.transform.position = Vec3::new(pose.offset, altitude + lift, pad_z);
            rocket.transform.rotation.z = pose.rot_z;
            rocket.transform.scale = Vec3::new(pose.scale, pose.scale * trim, pose.scale);
            rocket_transform = Some(rocket.transform);
        }
        if let (Some(transform), Some(lower)) = (rocket_transform, self.handles.rocket_lower.and_then(|id| ctx.scene.get_mut(id))) {
            if lower.visible {
                lower.transform = transform;
            }
        }

        if pose.phase == AscentPhase::InOrbit {
            self.insert_orbit(ctx);
        }
    }

    /// Snap onto the orbit, switch to the overlook and schedule the scene change.
    fn insert_orbit(&mut self, ctx: &mut EngineContext) {
        if !self.state.orbit_reached.fire() {
            return;
        }
        let target = self.config.ascent.orbit_target;
        self.state.clock.stop();
        self.state.clock.raise_to(target);

        let start = self.state.rocket_orbit.position();
        for id in [self.handles.rocket, self.handles.rocket_lower].into_iter().flatten() {
            if let Some(e) = ctx.scene.get_mut(id) {
                e.transform.position = start;
                e.transform.rotation = Vec3::new(0.0, 0.0, -FRAC_PI_2);
                e.set_emitters_active(false);
                e.visible = false;
            }
        }
        self.state.rocket_orbit.active = true;
        self.state.marker_orbit.active = true;
        self.state.rig.overlook(&mut ctx.camera);

        ctx.emit_event(GameEvent::new(events::ORBIT_REACHED, target, 0.0, 0.0));
        ctx.timers.schedule(self.config.transition_delay, timers::SCENE_TRANSITION);
        log::info!("orbit reached after {} steps ({:.1}s)", self.state.clock.frames(), self.state.clock.elapsed());
    }

    fn update_launch(&mut self, ctx: &mut EngineContext) {
        let swing = self.keys.pressed(codes::X);
        let launch = self.keys.pressed(codes::L);
        self.state.rig.handle_keys(&self.keys);

        if swing {
            if self.state.clamp.trigger() {
                log::info!("clamp swinging clear");
            } else {
                log::debug!("clamp already swung");
            }
        }
        if launch {
            self.try_launch(ctx);
        }

        if self.state.clamp.update() {
            ctx.emit_event(GameEvent::new(events::CLAMP_RELEASED, 0.0, 0.0, 0.0));
            log::info!("clamp released");
        }
        if let Some(clamp) = self.handles.clamp.and_then(|id| ctx.scene.get_mut(id)) {
            let pose = self.state.clamp.pose();
            clamp.transform.position = pose.position;
            clamp.transform.rotation = pose.rotation;
        }

        if self.state.clock.running() {
            self.step_ascent(ctx);
        }

        if let Some(impact) = self.state.separation.update(ctx) {
            ctx.emit_event(GameEvent::new(events::STAGE_LANDED, impact.x, impact.z, 0.0));
        }

        if self.state.in_orbit() {
            if let Some(rocket) = self.handles.rocket.and_then(|id| ctx.scene.get_mut(id)) {
                self.state.rocket_orbit.step(&mut rocket.transform);
                self.state.rocket_orbit.correct(&mut rocket.transform);
            }
            if let Some(marker) = self.handles.marker.and_then(|id| ctx.scene.get_mut(id)) {
                self.state.marker_orbit.step(&mut marker.transform);
            }
        }

        let rocket_pos = self.handles.rocket.and_then(|id| ctx.scene.get(id)).map(|e| e.position());
        match (self.state.rig.mode(), rocket_pos) {
            (CameraMode::Follow, Some(target)) => self.state.rig.follow(&mut ctx.camera, target),
            _ => self.state.rig.update_free(&mut ctx.camera, &self.keys),
        }
    }

    /// Fog, ground fade, globe and field of view for the camera's height.
    fn fade_launch_scene(&mut self, ctx: &mut EngineContext) {
        let y = ctx.camera.position.y;
        let fades = &self.state.fades;

        let fog = fades.fog(y);
        ctx.camera.fog_near = fog.near;
        ctx.camera.fog_far = fog.far;
        self.state.fog = fog;

        let g = fades.ground(y);
        let ground_visible = fades.ground_visible(g);
        for e in ctx.scene.tagged_mut(pad::tags::GROUND) {
            e.transform.set_uniform_scale(g);
            e.visible = ground_visible;
        }
        if !self.state.launched() {
            let riders = [self.handles.clamp, self.handles.rocket, self.handles.rocket_lower];
            for id in riders.into_iter().flatten() {
                if let Some(e) = ctx.scene.get_mut(id) {
                    e.transform.set_uniform_scale(g);
                    e.visible = ground_visible;
                }
            }
        }

        let look = fades.earth(y);
        let spin = fades.earth_spin(ctx.dt, y);
        let ring_visible = fades.ring_visible(y);
        if let Some(earth) = self.handles.earth.and_then(|id| ctx.scene.get_mut(id)) {
            earth.visible = look.visible;
            earth.transform.set_uniform_scale(look.scale);
            earth.transform.rotation.y += spin;
        }
        if let Some(ring) = self.handles.ring.and_then(|id| ctx.scene.get_mut(id)) {
            ring.visible = ring_visible;
            ring.transform.set_uniform_scale(look.scale);
        }

        ctx.camera.fov = self.state.rig.fov_for_altitude(y);
    }

    /// Hide the pad and bring up the orbit scene.
    fn enter_orbit_view(&mut self, ctx: &mut EngineContext) {
        if !matches!(self.mode, Mode::Launch) {
            return;
        }
        for e in ctx.scene.iter_mut() {
            e.visible = false;
            e.set_emitters_active(false);
        }
        let view = OrbitView::build(ctx, &self.config.orbit_view);
        view.place_camera(&mut ctx.camera);
        ctx.camera.fov = self.config.camera.base_fov;
        ctx.emit_event(GameEvent::new(events::SCENE_TRANSITION, 0.0, 0.0, 0.0));
        self.mode = Mode::Orbit(view);
    }

    // ── Status ──────────────────────────────────────────────────────

    pub fn hud(&self, ctx: &EngineContext) -> HudStatus {
        let camera = &ctx.camera;
        let rig = &self.state.rig;
        let altitude = self.state.clock.altitude();
        let ascent = &self.config.ascent;
        let (pitch, yaw) = rig.extra_rotation();
        HudStatus {
            scene: match self.mode {
                Mode::Launch => "launch",
                Mode::Orbit(_) => "orbit",
            },
            status: self.state.status().label(),
            camera: hud::round_vec(camera.position),
            camera_mode: rig.mode().label(),
            follow: rig.follow_enabled(),
            follow_offset: hud::round_vec(rig.offset()),
            follow_rotation: [hud::round2(pitch.to_degrees()), hud::round2(yaw.to_degrees())],
            clamp_angle: hud::round2(self.state.clamp.angle().to_degrees()),
            altitude: altitude.round(),
            progress: (progress(altitude, ascent.start_altitude, ascent.orbit_target) * 100.0).round(),
            fov: hud::round2(camera.fov),
            fog: [camera.fog_near, camera.fog_far],
            in_cloud_band: self.state.fog.in_band,
            particles: ctx.effects.len(),
            orbit_view: self.orbit_view().map(OrbitView::status),
        }
    }
}

impl Default for LaunchSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LaunchSequence {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 128,
            ..GameConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.config = LaunchConfig::from_json(json)?;
        self.state = LaunchState::new(&self.config, self.dt);
        log::info!("launch config applied");
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.dt = ctx.dt;
        self.reset(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.keys.apply(input);
        if self.handle_custom(ctx, input) {
            return;
        }
        if let Mode::Orbit(view) = &mut self.mode {
            view.handle_keys(ctx, &self.keys);
            view.update(ctx);
            CameraRig::look_around(&mut ctx.camera, &self.keys);
            return;
        }
        self.update_launch(ctx);
    }

    fn late_update(&mut self, ctx: &mut EngineContext) {
        if matches!(self.mode, Mode::Launch) {
            self.fade_launch_scene(ctx);
        }
    }

    fn on_timer(&mut self, ctx: &mut EngineContext, kind: u32) {
        match kind {
            timers::SCENE_TRANSITION => self.enter_orbit_view(ctx),
            _ => log::debug!("unknown timer {}", kind),
        }
    }

    fn on_asset(&mut self, ctx: &mut EngineContext, event: &AssetEvent) {
        match event {
            AssetEvent::Loaded { name, .. } => {
                if !matches!(self.mode, Mode::Launch) {
                    return;
                }
                if pad::attach_rocket(ctx, &self.config, &mut self.handles) {
                    ctx.emit_event(GameEvent::new(events::ROCKET_READY, 0.0, 0.0, 0.0));
                }
                log::debug!("asset ready: {}", name);
            }
            AssetEvent::Failed { name, reason } => {
                if name == pad::ROCKET_ASSET {
                    log::warn!("rocket model unavailable ({}); launch disabled", reason);
                    ctx.emit_event(GameEvent::new(events::ROCKET_UNAVAILABLE, 0.0, 0.0, 0.0));
                }
            }
        }
    }

    fn status_json(&self, ctx: &EngineContext) -> String {
        self.hud(ctx).to_json()
    }
}
