//! Whole-run checks, driven through the same runner the page uses.

use glam::Vec3;
use liftoff_engine::{codes, InputEvent, ParticleKind};
use liftoff_web::GameRunner;

use crate::game::{custom, events, LaunchSequence};
use crate::phase::{AscentPhase, StageState};

const FRAME: f32 = 1.0 / 60.0;
const MANIFEST: &str = r#"{ "models": { "rocket": { "path": "models/rocket.glb", "mesh": 100, "required": true } } }"#;

/// What one frame left behind.
struct Frame {
    altitude: f32,
    phase: AscentPhase,
    stage: StageState,
    events: Vec<f32>,
    camera: Vec3,
    rocket: Option<Vec3>,
    explosions: usize,
    orbit_scene: bool,
}

fn press(runner: &mut GameRunner<LaunchSequence>, key_code: u32) {
    runner.push_input(InputEvent::KeyDown { key_code });
    runner.push_input(InputEvent::KeyUp { key_code });
}

fn tick(runner: &mut GameRunner<LaunchSequence>) -> Frame {
    runner.tick(FRAME);
    let game = runner.game();
    let ctx = runner.context();
    Frame {
        altitude: game.state().clock.altitude(),
        phase: game.state().phase,
        stage: game.state().separation.state(),
        events: ctx.events.iter().map(|e| e.kind).collect(),
        camera: ctx.camera.position,
        rocket: game.handles().rocket.and_then(|id| ctx.scene.get(id)).map(|e| e.position()),
        explosions: ctx.effects.count_kind(ParticleKind::Explosion),
        orbit_scene: game.orbit_view().is_some(),
    }
}

/// Rocket on the pad, clamp swung clear, engines lit.
fn launched() -> GameRunner<LaunchSequence> {
    let mut runner = GameRunner::new(LaunchSequence::new());
    runner.load_manifest(MANIFEST);
    runner.init();
    runner.asset_loaded("rocket");

    press(&mut runner, codes::X);
    for _ in 0..2000 {
        if runner.game().state().clamp.released() {
            break;
        }
        tick(&mut runner);
    }
    assert!(runner.game().state().clamp.released());

    press(&mut runner, codes::L);
    for _ in 0..5 {
        if runner.game().state().launched() {
            break;
        }
        tick(&mut runner);
    }
    assert!(runner.game().state().launched());
    runner
}

/// Tick until the orbit view has taken over.
fn fly_to_orbit_view(runner: &mut GameRunner<LaunchSequence>) -> Vec<Frame> {
    let mut frames = Vec::new();
    for _ in 0..6000 {
        let frame = tick(runner);
        let done = frame.orbit_scene;
        frames.push(frame);
        if done {
            return frames;
        }
    }
    panic!("orbit view never opened");
}

fn first_event(frames: &[Frame], kind: f32) -> usize {
    frames
        .iter()
        .position(|f| f.events.contains(&kind))
        .unwrap_or_else(|| panic!("event {} never fired", kind))
}

fn event_count(frames: &[Frame], kind: f32) -> usize {
    frames.iter().map(|f| f.events.iter().filter(|&&k| k == kind).count()).sum()
}

#[test]
fn rocket_ready_reaches_the_page() {
    let mut runner = GameRunner::new(LaunchSequence::new());
    runner.load_manifest(MANIFEST);
    runner.init();
    tick(&mut runner);
    runner.asset_loaded("rocket");
    let frame = tick(&mut runner);
    assert!(frame.events.contains(&events::ROCKET_READY));
    assert!(frame.rocket.is_some());

    let frame = tick(&mut runner);
    assert!(!frame.events.contains(&events::ROCKET_READY));
}

#[test]
fn rocket_unavailable_reaches_the_page() {
    let mut runner = GameRunner::new(LaunchSequence::new());
    runner.load_manifest(MANIFEST);
    runner.init();
    runner.asset_failed("rocket", "404");
    let frame = tick(&mut runner);
    assert!(frame.events.contains(&events::ROCKET_UNAVAILABLE));
    assert!(frame.rocket.is_none());
}

#[test]
fn stage_separates_once_before_orbit() {
    let mut runner = launched();
    let frames = fly_to_orbit_view(&mut runner);

    let separated = first_event(&frames, events::STAGE_SEPARATED);
    let orbit = first_event(&frames, events::ORBIT_REACHED);
    assert!(separated < orbit);
    assert!(frames[separated].altitude >= 350.0);
    assert_eq!(event_count(&frames, events::STAGE_SEPARATED), 1);
    assert_eq!(event_count(&frames, events::ORBIT_REACHED), 1);
    assert_eq!(event_count(&frames, events::STAGE_LANDED), 1);
    assert!(frames[..separated].iter().all(|f| f.stage == StageState::Attached));
}

#[test]
fn altitude_climbs_and_orbit_waits_for_the_target() {
    let mut runner = launched();
    let frames = fly_to_orbit_view(&mut runner);

    for pair in frames.windows(2) {
        assert!(pair[1].altitude >= pair[0].altitude);
    }
    for f in &frames {
        if f.phase == AscentPhase::InOrbit {
            assert!(f.altitude >= 440.0);
        } else {
            assert!(f.altitude < 440.0);
        }
    }
    let space = frames.iter().position(|f| f.phase == AscentPhase::Space).unwrap();
    assert!(frames[space].altitude >= 330.0);
    assert!((frames.last().unwrap().altitude - 440.0).abs() < 1e-3);
}

#[test]
fn separation_explosion_burns_out() {
    let mut runner = launched();
    let frames = fly_to_orbit_view(&mut runner);

    let separated = first_event(&frames, events::STAGE_SEPARATED);
    assert!(frames[separated].explosions > 0);
    assert!(frames[separated].explosions <= 30);
    assert_eq!(frames[separated + 120].explosions, 0);
}

#[test]
fn camera_follows_then_overlooks() {
    let mut runner = launched();
    let frames = fly_to_orbit_view(&mut runner);
    let orbit = first_event(&frames, events::ORBIT_REACHED);

    for f in &frames[..orbit] {
        let rocket = f.rocket.unwrap();
        assert!((f.camera.y - (rocket.y + 10.0)).abs() < 1e-3);
        assert!((f.camera.z - (rocket.z + 35.0)).abs() < 1e-3);
    }
    // the last frame already belongs to the orbit view
    for f in &frames[orbit..frames.len() - 1] {
        assert_eq!(f.camera, Vec3::new(0.0, 100.0, 120.0));
    }
    assert_eq!(frames.last().unwrap().camera, Vec3::new(0.0, 50.0, 50.0));
}

#[test]
fn orbit_view_opens_a_second_after_orbit() {
    let mut runner = launched();
    let frames = fly_to_orbit_view(&mut runner);
    let orbit = first_event(&frames, events::ORBIT_REACHED);
    let opened = first_event(&frames, events::SCENE_TRANSITION);
    let waited = opened - orbit;
    assert!((55..=65).contains(&waited), "waited {} frames", waited);

    let status: serde_json::Value = serde_json::from_str(&runner.status_json()).unwrap();
    assert_eq!(status["scene"], "orbit");
    assert_eq!(status["orbit_view"]["orbiting"], false);

    runner.push_input(InputEvent::Custom { kind: custom::TOGGLE_ORBIT, a: 0.0, b: 0.0, c: 0.0 });
    tick(&mut runner);
    let view = runner.game().orbit_view().unwrap();
    assert!(view.status().orbiting);
    let lower = runner.context().scene.get(view.parts()[0]).unwrap();
    assert!(lower.visible);
    assert!((lower.position().x - 30.0).abs() > 1e-4 || lower.position().z.abs() > 1e-4);
}
