//! End-to-end runs through `Session` on the built-in levels

use glam::Vec2;

use warp_runner::Session;
use warp_runner::render::DrawStats;
use warp_runner::sim::{DamageSource, GameEvent, GamePhase, SecretReturn};

/// 16 ms frames, like a 60 Hz display
struct Harness {
    session: Session,
    stats: DrawStats,
    now: f64,
    events: Vec<GameEvent>,
}

impl Harness {
    fn new() -> Self {
        Self {
            session: Session::builtin(None).expect("builtin levels load"),
            stats: DrawStats::default(),
            now: 0.0,
            events: Vec::new(),
        }
    }

    fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            let events = self.session.frame(self.now, &mut self.stats);
            self.events.extend_from_slice(events);
            self.now += 16.0;
        }
    }

    fn place_player(&mut self, x: f32, y: f32) {
        let body = &mut self.session.state.stage.player.body;
        body.pos = Vec2::new(x, y);
        body.vel = Vec2::ZERO;
    }

    fn lives(&self) -> u32 {
        self.session.state.stage.player.lives
    }
}

#[test]
fn test_spawn_falls_onto_ground() {
    let mut game = Harness::new();
    assert_eq!(game.session.state.stage.player.body.pos, Vec2::new(50.0, 500.0));

    game.run(60);
    let body = &game.session.state.stage.player.body;
    assert_eq!(body.pos.y, 526.0);
    assert!(body.grounded);
    assert_eq!(game.session.state.phase, GamePhase::Playing);
    assert_eq!(game.stats.frames, 60);
}

#[test]
fn test_running_right_moves_camera() {
    let mut game = Harness::new();
    game.session.key_down("ArrowRight");
    game.run(60);
    assert!(game.session.state.stage.player.body.pos.x > 200.0);
    assert!(game.session.state.camera.pos.x > 0.0);
}

#[test]
fn test_hazard_on_last_life_is_game_over() {
    let mut game = Harness::new();
    game.run(1);
    game.session.state.stage.player.lives = 1;
    // Level 1 spikes at x 600..680, y 510..530
    game.place_player(610.0, 500.0);
    game.run(1);

    assert_eq!(game.lives(), 0);
    assert_eq!(game.session.state.phase, GamePhase::GameOver);
    assert!(game.events.contains(&GameEvent::Damage {
        source: DamageSource::Hazard,
        amount: 10,
        absorbed: false,
        lives_left: 0,
    }));

    // Later frames change nothing but keep drawing
    let frozen = game.session.state.clone();
    game.session.key_down("ArrowLeft");
    game.run(30);
    assert_eq!(game.session.state.stage, frozen.stage);
    assert_eq!(game.session.state.frame, frozen.frame);
    assert_eq!(game.stats.overlays, 1);

    game.session.restart();
    assert_eq!(game.session.state.phase, GamePhase::Playing);
    assert_eq!(game.lives(), 3);
}

#[test]
fn test_invulnerability_absorbs_repeat_hits() {
    let mut game = Harness::new();
    game.run(1);
    game.place_player(610.0, 500.0);

    // Standing in spikes for a third of a second costs one life
    game.run(20);
    assert_eq!(game.lives(), 2);
    let absorbed = game
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::Damage { absorbed: true, .. }))
        .count();
    assert!(absorbed > 0);

    // Once the 1.5 s window is over the spikes bite again
    game.run(100);
    assert_eq!(game.lives(), 1);
}

#[test]
fn test_secret_round_trip() {
    let mut game = Harness::new();
    game.run(1);

    // Level 1 pipe at x 250 leads to the secret level and back to level 2
    game.place_player(255.0, 526.0);
    game.session.key_down("ArrowDown");
    game.run(1);
    let state = &game.session.state;
    assert_eq!(state.level, 6);
    assert!(state.is_secret_level());
    assert_eq!(state.secret_return, SecretReturn::Pending { level: 2 });
    assert!(game.events.contains(&GameEvent::Warped { from: 1, to: 6 }));

    game.session.key_up("ArrowDown");
    game.place_player(720.0, 380.0);
    game.run(1);
    let state = &game.session.state;
    assert_eq!(state.level, 2);
    assert_eq!(state.secret_return, SecretReturn::Idle);
    assert!(game.events.contains(&GameEvent::SecretReturn { to: 2 }));
}

#[test]
fn test_warp_cooldown_blocks_reentry() {
    let mut game = Harness::new();
    game.session.state.load_level(2);
    game.run(1);

    // Level 2 pipe to level 3, then straight into level 3's pipe to level 4
    game.place_player(415.0, 526.0);
    game.session.key_down("s");
    game.run(1);
    assert_eq!(game.session.state.level, 3);

    game.place_player(460.0, 526.0);
    game.run(20);
    assert_eq!(game.session.state.level, 3);

    game.place_player(460.0, 526.0);
    game.run(20);
    assert_eq!(game.session.state.level, 4);
}

#[test]
fn test_decoy_pipe_hurts() {
    let mut game = Harness::new();
    game.run(1);
    // Level 1 decoy at x 100
    game.place_player(105.0, 526.0);
    game.session.key_down("ArrowDown");
    game.run(1);

    assert_eq!(game.session.state.level, 1);
    assert_eq!(game.lives(), 2);
    assert!(game.events.contains(&GameEvent::DecoyWarp { damage: 10 }));
}

#[test]
fn test_finishing_last_level_wins() {
    let mut game = Harness::new();
    game.session.state.load_level(5);
    game.run(1);
    let goal = game.session.state.stage.goal;
    game.place_player(goal.x, goal.y + 10.0);
    game.run(1);

    assert_eq!(game.session.state.phase, GamePhase::Victory);
    assert_eq!(game.session.state.level, 5);
    game.run(5);
    assert_eq!(game.session.state.phase, GamePhase::Victory);
}
