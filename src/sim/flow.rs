//! Level flow: warp pipes, goal, secret level and end of run

use super::level::{Warp, WarpKind};
use super::state::{DamageSource, GameEvent, GamePhase, GameState, WarpGate};

impl GameState {
    /// Enter the first pipe the player is standing in while holding down.
    ///
    /// Any pipe the player is inside starts the cooldown, including pipes
    /// with no target; the scan goes on past those. Returns true when a pipe
    /// fired (decoy or real), which ends the frame's level-flow checks.
    pub fn check_warps(&mut self, descend_held: bool) -> bool {
        if !descend_held || !self.warp_gate.is_ready() {
            return false;
        }

        let player_rect = self.stage.player.rect();
        let mut entered = false;
        let fired = self
            .stage
            .warps
            .iter()
            .filter(|warp| warp.rect.overlaps(&player_rect))
            .map(Warp::kind)
            .find(|kind| {
                entered = true;
                kind.is_active()
            });

        if entered {
            self.warp_gate.trigger();
        }
        let Some(kind) = fired else {
            return false;
        };

        match kind {
            WarpKind::Decoy { damage } => {
                log::info!("Decoy pipe in level {}", self.level);
                self.events.push(GameEvent::DecoyWarp { damage });
                let hurt = self.stage.player.hurt(DamageSource::Decoy, damage);
                self.events.push(hurt);
            }
            WarpKind::Pipe { target, return_to } => {
                if let Some(target) = target {
                    self.warp_to(target, return_to);
                }
            }
        }
        true
    }

    /// Warp to `target`. Entering the secret level remembers where to come
    /// back to; the warp gate keeps cooling through the load.
    fn warp_to(&mut self, target: usize, return_to: Option<usize>) {
        let from = self.level;
        if self.catalog().is_secret(target) {
            let back = return_to.unwrap_or(from + 1);
            log::debug!("Secret level will return to level {}", back);
            self.secret_return.record(back);
        }

        let to = self.catalog().clamp(target);
        log::info!("Warp from level {} to level {}", from, to);
        self.events.push(GameEvent::Warped { from, to });
        self.load_level(to);
    }

    /// Player touches the goal (edges inclusive)
    pub fn goal_reached(&self) -> bool {
        self.stage.player.rect().touches(&self.stage.goal)
    }

    /// Leave the current level through its goal
    pub fn advance_level(&mut self) {
        let finished = self.level;
        log::info!("Level {} complete (score {})", finished, self.score);
        self.events.push(GameEvent::LevelComplete { level: finished });

        if self.stage.secret {
            let to = self
                .secret_return
                .take()
                .unwrap_or_else(|| self.catalog().secret_fallback());
            self.events.push(GameEvent::SecretReturn { to });
            self.load_level(to);
        } else if finished + 1 > self.catalog().regular_count() {
            log::info!("Victory with score {}", self.score);
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory { score: self.score });
            return;
        } else {
            self.load_level(finished + 1);
        }
        self.warp_gate = WarpGate::Ready;
    }

    /// End the run when the player fell out of the level or ran out of lives
    pub fn check_lose(&mut self) -> bool {
        let player = &self.stage.player;
        let fell = player.body.pos.y > self.settings.fall_limit_y;
        if !fell && !player.is_dead() {
            return false;
        }

        log::info!(
            "Game over in level {} ({}), score {}",
            self.level,
            if fell { "fell" } else { "no lives left" },
            self.score
        );
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::level::{LevelCatalog, LevelData, Platform, SurfaceKind};
    use crate::sim::rect::Rect;
    use crate::sim::state::SecretReturn;

    fn level(name: &str, warps: Vec<Warp>, secret: bool) -> LevelData {
        LevelData {
            name: name.to_string(),
            spawn: Vec2::new(50.0, 526.0),
            platforms: vec![Platform::new(
                Rect::new(0.0, 550.0, 800.0, 50.0),
                SurfaceKind::Ground,
            )],
            enemies: Vec::new(),
            collectibles: Vec::new(),
            warps,
            goal: Some(Rect::new(700.0, 490.0, 40.0, 60.0)),
            secret,
        }
    }

    const PIPE: Rect = Rect::new(40.0, 510.0, 32.0, 40.0);

    /// Three regular levels plus secret level 4
    fn state_with(first_warps: Vec<Warp>) -> GameState {
        let catalog = LevelCatalog::new(
            vec![
                level("one", first_warps, false),
                level("two", Vec::new(), false),
                level("three", Vec::new(), false),
                level("secret", Vec::new(), true),
            ],
            3,
            Some(4),
            2,
        )
        .expect("valid catalog");
        GameState::new(catalog, Settings::default())
    }

    #[test]
    fn test_warp_needs_down_and_strict_overlap() {
        let mut state = state_with(vec![Warp::pipe(PIPE, 3, None)]);
        assert!(!state.check_warps(false));

        // Touching the pipe's left edge is not inside it
        state.stage.player.body.pos.x = PIPE.x - 16.0;
        assert!(!state.check_warps(true));

        state.stage.player.body.pos.x = PIPE.x;
        assert!(state.check_warps(true));
        assert_eq!(state.level, 3);
        assert!(state.events.contains(&GameEvent::Warped { from: 1, to: 3 }));
    }

    #[test]
    fn test_decoy_hurts_without_level_change() {
        let mut state = state_with(vec![Warp::decoy(PIPE, 10), Warp::pipe(PIPE, 3, None)]);
        assert!(state.check_warps(true));
        assert_eq!(state.level, 1);
        assert_eq!(state.stage.player.lives, 2);
        assert!(!state.warp_gate.is_ready());

        // Cooling: holding down again does nothing
        assert!(!state.check_warps(true));
        assert_eq!(state.stage.player.lives, 2);
    }

    #[test]
    fn test_targetless_pipe_starts_cooldown() {
        let dead_pipe = Warp {
            target: None,
            ..Warp::pipe(PIPE, 1, None)
        };
        let mut state = state_with(vec![dead_pipe]);
        assert!(!state.check_warps(true));
        assert_eq!(state.level, 1);
        assert!(!state.warp_gate.is_ready());
        assert!(state.events.is_empty());

        let mut state = state_with(vec![dead_pipe, Warp::pipe(PIPE, 2, None)]);
        assert!(state.check_warps(true));
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_cooldown_survives_warp_load() {
        let mut state = state_with(vec![Warp::pipe(PIPE, 1, None)]);
        assert!(state.check_warps(true));
        assert_eq!(state.level, 1);
        // Respawned inside the same pipe, still cooling
        assert!(!state.check_warps(true));
    }

    #[test]
    fn test_unknown_target_loads_first_level() {
        let mut state = state_with(vec![Warp::pipe(PIPE, 42, None)]);
        state.load_level(2);
        state.stage.warps = vec![Warp::pipe(PIPE, 42, None)];
        assert!(state.check_warps(true));
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_secret_round_trip() {
        let mut state = state_with(vec![Warp::pipe(PIPE, 4, Some(3))]);
        assert!(state.check_warps(true));
        assert_eq!(state.level, 4);
        assert!(state.is_secret_level());
        assert_eq!(state.secret_return, SecretReturn::Pending { level: 3 });

        state.advance_level();
        assert_eq!(state.level, 3);
        assert_eq!(state.secret_return, SecretReturn::Idle);
        assert!(state.warp_gate.is_ready());
    }

    #[test]
    fn test_unknown_secret_return_loads_first_level() {
        let mut state = state_with(vec![Warp::pipe(PIPE, 4, Some(42))]);
        assert!(state.check_warps(true));
        assert_eq!(state.level, 4);
        assert_eq!(state.secret_return, SecretReturn::Pending { level: 42 });

        state.advance_level();
        assert_eq!(state.level, 1);
        assert_eq!(state.secret_return, SecretReturn::Idle);
        assert!(state.events.contains(&GameEvent::LevelLoaded { level: 1 }));
    }

    #[test]
    fn test_secret_return_defaults() {
        // No return level: the one after the pipe's level
        let mut state = state_with(vec![Warp::pipe(PIPE, 4, None)]);
        assert!(state.check_warps(true));
        assert_eq!(state.secret_return, SecretReturn::Pending { level: 2 });

        // Nothing recorded: the fallback level
        state.secret_return = SecretReturn::Idle;
        state.advance_level();
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_last_regular_level_wins() {
        let mut state = state_with(Vec::new());
        state.advance_level();
        assert_eq!(state.level, 2);
        state.advance_level();
        state.advance_level();
        assert_eq!(state.level, 3);
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(state.events.contains(&GameEvent::Victory { score: 0 }));
    }

    #[test]
    fn test_goal_touching_counts() {
        let mut state = state_with(Vec::new());
        assert!(!state.goal_reached());
        state.stage.player.body.pos = Vec2::new(684.0, 526.0);
        assert!(state.goal_reached());
    }

    #[test]
    fn test_lose_conditions() {
        let mut state = state_with(Vec::new());
        assert!(!state.check_lose());

        state.stage.player.body.pos.y = 650.5;
        assert!(state.check_lose());
        assert_eq!(state.phase, GamePhase::GameOver);

        let mut state = state_with(Vec::new());
        state.stage.player.lives = 0;
        assert!(state.check_lose());
    }
}
