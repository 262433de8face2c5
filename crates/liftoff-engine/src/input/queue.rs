/// What the page can tell the simulation between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// DOM `keyCode` of a key going down. Auto-repeat sends it again.
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Mouse motion in pixels. Only sent while the pointer is locked.
    MouseLook { dx: f32, dy: f32 },
    /// The canvas gained or lost pointer lock.
    PointerLock { locked: bool },
    /// A page control (slider, toggle button, reset). The game owns the
    /// meaning of `kind` and of the three payload floats.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events collected since the last frame that ran a fixed step.
///
/// The runner hands the queue to the first step of a frame only and clears
/// it afterwards. A frame with no steps keeps its events for the next one,
/// so a keypress during a stall is delayed rather than lost.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Forget everything queued. Called once a step has seen the events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Only the page-control events, as `(kind, [a, b, c])`.
    pub fn customs(&self) -> impl Iterator<Item = (u32, [f32; 3])> + '_ {
        self.events.iter().filter_map(|event| match *event {
            InputEvent::Custom { kind, a, b, c } => Some((kind, [a, b, c])),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
