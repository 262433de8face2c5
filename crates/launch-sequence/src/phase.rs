//! Launch state: the ascent phase ladder, the clamp and lower-stage
//! sub-states, and the clock that measures a run.

/// Where the rocket is on its climb. Only ever moves forward; declaration
/// order is climb order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AscentPhase {
    Grounded = 0,
    Atmosphere = 1,
    Space = 2,
    InOrbit = 3,
}

impl AscentPhase {

    /// Move to `next` if it lies ahead. Returns true when the phase changed;
    /// staying put or going back is refused.
    pub fn advance(&mut self, next: AscentPhase) -> bool {
        if next > *self {
            *self = next;
            true
        } else {
            false
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AscentPhase::Grounded => "grounded",
            AscentPhase::Atmosphere => "atmosphere",
            AscentPhase::Space => "space",
            AscentPhase::InOrbit => "in-orbit",
        }
    }

    /// Numeric id carried by phase-change game events.
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// The service-tower clamp that must swing clear before launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampState {
    Locked,
    Rotating,
    Released,
}

/// The rocket's lower stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Attached,
    Separated,
    Landed,
}

/// Status reported to the page, derived from the three sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    Grounded,
    RotatingClamp,
    AscendingInAtmosphere,
    AscendingInSpace,
    StageSeparated,
    Landed,
    InOrbit,
}

impl LaunchStatus {
    pub fn derive(phase: AscentPhase, clamp: ClampState, stage: StageState) -> Self {
        match phase {
            AscentPhase::Grounded if clamp == ClampState::Rotating => LaunchStatus::RotatingClamp,
            AscentPhase::Grounded => LaunchStatus::Grounded,
            AscentPhase::Atmosphere => LaunchStatus::AscendingInAtmosphere,
            AscentPhase::Space => match stage {
                StageState::Attached => LaunchStatus::AscendingInSpace,
                StageState::Separated => LaunchStatus::StageSeparated,
                StageState::Landed => LaunchStatus::Landed,
            },
            AscentPhase::InOrbit => LaunchStatus::InOrbit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LaunchStatus::Grounded => "grounded",
            LaunchStatus::RotatingClamp => "rotating-clamp",
            LaunchStatus::AscendingInAtmosphere => "ascending-in-atmosphere",
            LaunchStatus::AscendingInSpace => "ascending-in-space",
            LaunchStatus::StageSeparated => "stage-separated",
            LaunchStatus::Landed => "landed",
            LaunchStatus::InOrbit => "in-orbit",
        }
    }
}

/// A latch that lets an action happen at most once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time only.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            false
        } else {
            self.fired = true;
            true
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Time, frame count and altitude since launch.
///
/// Altitude is the scalar that gates every phase transition. It never
/// decreases while the clock runs.
#[derive(Debug, Clone, Default)]
pub struct PhaseClock {
    elapsed: f32,
    frames: u32,
    altitude: f32,
    running: bool,
}

impl PhaseClock {
    pub fn new(altitude: f32) -> Self {
        Self {
            altitude,
            ..Self::default()
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one fixed step, climbing by `climb` (negative climbs are ignored).
    pub fn step(&mut self, dt: f32, climb: f32) {
        if !self.running {
            return;
        }
        self.elapsed += dt;
        self.frames += 1;
        if climb > 0.0 {
            self.altitude += climb;
        }
    }

    /// Raise the altitude to at least `altitude`.
    pub fn raise_to(&mut self, altitude: f32) {
        self.altitude = self.altitude.max(altitude);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    pub fn running(&self) -> bool {
        self.running
    }
}
