use wasm_bindgen::prelude::*;

pub mod ascent;
pub mod clamp;
pub mod config;
pub mod fades;
pub mod game;
pub mod hud;
pub mod orbit;
pub mod orbit_view;
pub mod pad;
pub mod phase;
pub mod rig;
pub mod separation;
#[cfg(test)]
mod scenario_tests;

pub use game::LaunchSequence;

liftoff_web::export_game!(LaunchSequence, "launch-sequence");
