//! Frame loop driver
//!
//! A `Session` bundles one run with its input and frame clock. The host calls
//! `key_down`/`key_up` from its event handlers and `frame` once per display
//! refresh.

use std::path::Path;

use crate::input::{InputState, Key};
use crate::render::{Renderer, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, LevelError, tick};

/// Turns host timestamps into clamped frame deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call, in `[0, max_dt]`; the first call is 0
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Next `advance` starts over with a zero delta
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

pub struct Session {
    pub state: GameState,
    pub input: InputState,
    clock: FrameClock,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        let clock = FrameClock::new(state.settings.max_frame_dt);
        Self {
            state,
            input: InputState::new(),
            clock,
        }
    }

    /// Session over the built-in levels with settings from `settings_path`
    /// (defaults when absent or unreadable)
    pub fn builtin(settings_path: Option<&Path>) -> Result<Self, LevelError> {
        let settings = Settings::load(settings_path);
        Ok(Self::new(GameState::builtin(settings)?))
    }

    /// Returns false for keys the game does not use
    pub fn key_down(&mut self, name: &str) -> bool {
        self.set_key(name, true)
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        self.set_key(name, false)
    }

    fn set_key(&mut self, name: &str, is_down: bool) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                self.input.set(key, is_down);
                true
            }
            None => false,
        }
    }

    /// Update then render one frame; returns what happened during the update
    pub fn frame<R: Renderer + ?Sized>(&mut self, now_ms: f64, renderer: &mut R) -> &[GameEvent] {
        let dt = self.clock.advance(now_ms);
        tick(&mut self.state, &mut self.input, dt);
        render(&self.state, renderer);
        &self.state.events
    }

    /// Fresh run from the starting level
    pub fn restart(&mut self) {
        self.state.restart();
        self.input.clear();
        self.clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::render::DrawStats;
    use crate::sim::GamePhase;

    #[test]
    fn test_clock_clamps() {
        let mut clock = FrameClock::new(MAX_FRAME_DT);
        assert_eq!(clock.advance(1000.0), 0.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.advance(2000.0), MAX_FRAME_DT);
        assert_eq!(clock.advance(1500.0), 0.0);

        clock.reset();
        assert_eq!(clock.advance(9000.0), 0.0);
    }

    #[test]
    fn test_key_names() {
        let mut session = Session::builtin(None).expect("builtin levels");
        assert!(session.key_down("ArrowRight"));
        assert!(session.input.is_held(Key::Right));
        assert!(!session.key_down("q"));
        assert!(session.key_up("d"));
        assert!(!session.input.is_held(Key::Right));
    }

    #[test]
    fn test_frame_updates_and_renders() {
        let mut session = Session::builtin(None).expect("builtin levels");
        let mut stats = DrawStats::default();
        for i in 0..10 {
            session.frame(f64::from(i) * 16.0, &mut stats);
        }
        assert_eq!(stats.frames, 10);
        assert_eq!(session.state.frame, 10);
        assert!(session.state.elapsed > 0.0);

        session.key_down("Escape");
        session.frame(200.0, &mut stats);
        assert_eq!(session.state.phase, GamePhase::Paused);
        assert_eq!(stats.overlays, 1);

        session.restart();
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert!(!session.input.is_held(Key::Pause));
    }
}
