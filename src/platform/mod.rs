//! Platform abstraction layer
//!
//! Handles what the windowing/input collaborator provides:
//! - Held-key keyboard polling
//! - Monotonic frame timing

use std::time::{Duration, Instant};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::TickInput;

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    R,
    Q,
}

/// Held-key queries, polled once per frame
pub trait KeyboardState {
    fn is_pressed(&self, key: Key) -> bool;
}

impl KeyboardState for std::collections::HashSet<Key> {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl TickInput {
    /// Map held keys to tick input. Space both starts the game and fires.
    pub fn from_keyboard(keys: &impl KeyboardState) -> Self {
        let space = keys.is_pressed(Key::Space);
        Self {
            move_left: keys.is_pressed(Key::Left),
            move_right: keys.is_pressed(Key::Right),
            fire: space,
            start: space,
            restart: keys.is_pressed(Key::R),
            quit: keys.is_pressed(Key::Q),
        }
    }
}

/// Monotonic, restartable clock that converts frame time into fixed steps
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            accumulator: 0.0,
        }
    }

    /// Restart, returning the elapsed time
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }

    /// Feed a frame delta, returns how many fixed steps to run
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(0.1);
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop backlog we refused to simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keyboard_mapping() {
        let keys: HashSet<Key> = [Key::Left, Key::Space].into_iter().collect();
        let input = TickInput::from_keyboard(&keys);
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(input.fire);
        assert!(input.start);
        assert!(!input.restart && !input.quit);
    }

    #[test]
    fn test_accumulate_fixed_steps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.accumulate(SIM_DT * 3.5), 3);
        assert_eq!(clock.accumulate(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_accumulate_caps_substeps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.accumulate(5.0), MAX_SUBSTEPS);
        assert!(clock.accumulate(0.0) <= 1);
    }

    #[test]
    fn test_restart_is_monotonic() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.restart() >= Duration::from_millis(2));
        assert!(clock.restart() < Duration::from_secs(1));
    }
}
