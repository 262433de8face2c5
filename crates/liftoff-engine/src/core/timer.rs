#[derive(Debug, Clone)]
struct PendingTimer {
    remaining: f32,
    kind: u32,
}

/// Delayed events measured in simulated seconds.
///
/// Timers are advanced inside the fixed step, so a delay always fires on the
/// same tick for the same input regardless of frame rate. A fired timer is
/// removed and its `kind` handed back to the caller.
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(8),
        }
    }

    /// Schedule `kind` to fire after `delay` simulated seconds.
    /// Non-positive delays fire on the next tick.
    pub fn schedule(&mut self, delay: f32, kind: u32) {
        self.pending.push(PendingTimer {
            remaining: delay.max(0.0),
            kind,
        });
    }

    /// Advance every pending timer by `dt`. Returns the kinds that fired,
    /// in scheduling order.
    pub fn tick(&mut self, dt: f32) -> Vec<u32> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|t| {
            t.remaining -= dt;
            if t.remaining <= 0.0 {
                fired.push(t.kind);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Whether a timer with the given kind is still pending.
    pub fn is_pending(&self, kind: u32) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.05, 7);
        assert!(timers.tick(0.02).is_empty());
        assert!(timers.tick(0.02).is_empty());
        assert_eq!(timers.tick(0.02), vec![7]);
        assert!(timers.is_empty());
    }

    #[test]
    fn one_second_at_sixty_hz() {
        let mut timers = TimerQueue::new();
        timers.schedule(1.0, 3);
        let dt = 1.0 / 60.0;
        let mut fired_at = None;
        for step in 1..=70 {
            if !timers.tick(dt).is_empty() {
                fired_at = Some(step);
                break;
            }
        }
        let step = fired_at.expect("timer should fire");
        assert!((59..=61).contains(&step), "fired at step {}", step);
    }

    #[test]
    fn fires_in_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, 2);
        timers.schedule(0.0, 1);
        assert_eq!(timers.tick(0.016), vec![2, 1]);
    }

    #[test]
    fn clear_drops_pending() {
        let mut timers = TimerQueue::new();
        timers.schedule(1.0, 5);
        assert!(timers.is_pending(5));
        timers.clear();
        assert!(!timers.is_pending(5));
        assert_eq!(timers.len(), 0);
    }
}
