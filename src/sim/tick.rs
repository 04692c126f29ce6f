//! Per-frame simulation tick
//!
//! Advances one `GameState` by one frame: player, platforms, enemies, pickups,
//! then level flow and the camera.

use super::collision::{Contact, resolve};
use super::enemy::resolve_player_contacts;
use super::items::{Pickups, collect_overlapping};
use super::level::Platform;
use super::player::Player;
use super::state::{DamageSource, GameEvent, GamePhase, GameState};
use crate::input::{InputState, Key};

/// Advance the game state by one frame of `dt` seconds.
///
/// Velocities are per frame; `dt` only drives timers. Does nothing while
/// paused or after the run has ended.
pub fn tick(state: &mut GameState, input: &mut InputState, dt: f32) {
    state.events.clear();

    if input.consume(Key::Pause) {
        state.toggle_pause();
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    state.elapsed += dt;
    state.warp_gate.tick(dt);

    let stage = &mut state.stage;
    let events = &mut state.events;

    stage.player.handle_input(input);
    stage.player.update(dt);
    collide_player(&mut stage.player, &stage.platforms, events);
    stage.player.body.settle(&stage.platforms);

    let player_pos = stage.player.body.pos;
    for enemy in &mut stage.enemies {
        enemy.update(dt, Some(player_pos), &stage.platforms);
    }
    resolve_player_contacts(&mut stage.enemies, &mut stage.player, events);

    for item in &mut stage.items {
        item.update(dt);
    }
    let pickups = collect_overlapping(&mut stage.items, &mut stage.player);
    record_pickups(state, pickups);

    if state.check_warps(input.is_held(Key::Down)) {
        return;
    }
    if state.goal_reached() {
        state.advance_level();
        return;
    }
    state.check_lose();

    state.camera.follow(state.stage.player.body.pos);
}

/// Player against every platform, in level order
fn collide_player(player: &mut Player, platforms: &[Platform], events: &mut Vec<GameEvent>) {
    for platform in platforms {
        match resolve(&player.rect(), &platform.rect, platform.kind) {
            Some(Contact::Push(correction)) => player.body.apply(&correction),
            Some(Contact::Hazard { damage }) => {
                events.push(player.hurt(DamageSource::Hazard, damage));
            }
            None => {}
        }
    }
}

fn record_pickups(state: &mut GameState, pickups: Pickups) {
    if pickups.coins > 0 {
        let points = u64::from(pickups.coins) * state.settings.coin_value;
        state.score += points;
        log::debug!("{} coin(s), score {}", pickups.coins, state.score);
        state.events.push(GameEvent::CoinsCollected {
            count: pickups.coins,
            points,
        });
    }
    for _ in 0..pickups.keys {
        state.events.push(GameEvent::KeyCollected);
    }
    for _ in 0..pickups.powerups {
        state.events.push(GameEvent::PowerupCollected);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::PLAYER_INITIAL_LIVES;
    use crate::settings::Settings;
    use crate::sim::enemy::Archetype;
    use crate::sim::items::{Collectible, ItemKind};
    use crate::sim::level::{LevelCatalog, LevelData, SurfaceKind};
    use crate::sim::rect::Rect;

    const DT: f32 = 1.0 / 60.0;

    fn flat_level() -> LevelData {
        LevelData {
            name: "flat".to_string(),
            spawn: Vec2::new(50.0, 500.0),
            platforms: vec![Platform::new(
                Rect::new(0.0, 550.0, 2000.0, 50.0),
                SurfaceKind::Ground,
            )],
            enemies: Vec::new(),
            collectibles: Vec::new(),
            warps: Vec::new(),
            goal: Some(Rect::new(1900.0, 490.0, 40.0, 60.0)),
            secret: false,
        }
    }

    fn flat_state() -> GameState {
        let catalog = LevelCatalog::new(vec![flat_level(), flat_level()], 2, None, 1)
            .expect("valid catalog");
        GameState::new(catalog, Settings::default())
    }

    fn run(state: &mut GameState, input: &mut InputState, frames: usize) {
        for _ in 0..frames {
            tick(state, input, DT);
        }
    }

    #[test]
    fn test_player_lands_on_ground() {
        let mut state = flat_state();
        let mut input = InputState::new();
        run(&mut state, &mut input, 60);

        let body = &state.stage.player.body;
        assert_eq!(body.pos.y, 526.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.grounded);
        assert_eq!(state.frame, 60);
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut state = flat_state();
        let mut input = InputState::new();
        run(&mut state, &mut input, 60);
        for _ in 0..30 {
            tick(&mut state, &mut input, DT);
            assert!(state.stage.player.body.grounded);
            assert_eq!(state.stage.player.body.pos.y, 526.0);
        }
    }

    #[test]
    fn test_flush_against_hazard_is_harmless() {
        let mut state = flat_state();
        let mut input = InputState::new();
        run(&mut state, &mut input, 60);
        let body = &state.stage.player.body;
        assert_eq!(body.pos, Vec2::new(50.0, 526.0));

        // Spikes whose right edge meets the player's left edge
        state.stage.platforms.push(Platform::new(
            Rect::new(30.0, 520.0, 20.0, 30.0),
            SurfaceKind::Hazard,
        ));
        tick(&mut state, &mut input, DT);
        assert_eq!(state.stage.player.lives, PLAYER_INITIAL_LIVES);
        assert!(state.events.is_empty());
        assert!(state.stage.player.body.grounded);

        // One pixel inside and they bite
        state.stage.player.body.pos.x = 49.0;
        tick(&mut state, &mut input, DT);
        assert_eq!(state.stage.player.lives, PLAYER_INITIAL_LIVES - 1);
    }

    #[test]
    fn test_hazard_on_last_life_ends_run() {
        let mut state = flat_state();
        state.stage.platforms.push(Platform::new(
            Rect::new(40.0, 520.0, 40.0, 10.0),
            SurfaceKind::Hazard,
        ));
        state.stage.player.lives = 1;
        let mut input = InputState::new();

        run(&mut state, &mut input, 10);
        assert_eq!(state.stage.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen until restart
        let frozen = state.stage.player.body.pos;
        let frame = state.frame;
        input.press(Key::Right);
        run(&mut state, &mut input, 10);
        assert_eq!(state.stage.player.body.pos, frozen);
        assert_eq!(state.frame, frame);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pause_skips_updates() {
        let mut state = flat_state();
        let mut input = InputState::new();
        input.press(Key::Pause);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Still held: no second toggle
        run(&mut state, &mut input, 5);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.frame, 0);

        input.release(Key::Pause);
        input.press(Key::Pause);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_coins_score() {
        let mut state = flat_state();
        state.stage.items = vec![
            Collectible::new(Vec2::new(52.0, 530.0), ItemKind::Coin),
            Collectible::new(Vec2::new(56.0, 540.0), ItemKind::Coin),
            Collectible::new(Vec2::new(60.0, 520.0), ItemKind::Key),
        ];
        state.stage.player.body.pos.y = 526.0;
        let mut input = InputState::new();
        tick(&mut state, &mut input, DT);

        assert_eq!(state.score, 20);
        assert!(state.stage.player.has_key);
        assert!(state.events.contains(&GameEvent::CoinsCollected { count: 2, points: 20 }));
        assert!(state.events.contains(&GameEvent::KeyCollected));
    }

    #[test]
    fn test_stomp_through_tick() {
        let mut state = flat_state();
        state.stage.enemies = vec![crate::sim::enemy::Enemy::new(
            Archetype::Goomba,
            Vec2::new(300.0, 534.0),
        )];
        state.stage.enemies[0].body.grounded = true;
        // Falling onto the goomba from just above
        state.stage.player.body.pos = Vec2::new(300.0, 508.0);
        state.stage.player.body.vel.y = 3.0;
        let mut input = InputState::new();
        tick(&mut state, &mut input, DT);

        assert!(state.stage.enemies.is_empty());
        assert_eq!(state.stage.player.body.vel.y, -5.0);
        assert!(state.events.contains(&GameEvent::Stomp {
            archetype: Archetype::Goomba,
            defeated: true
        }));
    }

    #[test]
    fn test_goal_advances_level() {
        let mut state = flat_state();
        state.stage.player.body.pos = Vec2::new(1890.0, 526.0);
        let mut input = InputState::new();
        tick(&mut state, &mut input, DT);
        assert_eq!(state.level, 2);
        assert_eq!(state.stage.player.body.pos, Vec2::new(50.0, 500.0));

        state.stage.player.body.pos = Vec2::new(1890.0, 526.0);
        tick(&mut state, &mut input, DT);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_fall_ends_run() {
        let mut state = flat_state();
        state.stage.platforms.clear();
        let mut input = InputState::new();
        run(&mut state, &mut input, 120);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.stage.player.body.pos.y > 650.0);
    }
}
