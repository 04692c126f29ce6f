//! Draw-call boundary
//!
//! `render` walks a `GameState` back to front and hands a `Renderer` screen
//! positions plus the semantic state it needs to pick sprites. Drawing itself
//! happens on the other side of the trait.

use glam::Vec2;

use crate::background::{Backdrop, Cloud, Tree};
use crate::camera::Camera;
use crate::consts::*;
use crate::sim::body::Facing;
use crate::sim::enemy::{Archetype, BehaviorState};
use crate::sim::items::ItemKind;
use crate::sim::level::SurfaceKind;
use crate::sim::player::Pose;
use crate::sim::rect::Rect;
use crate::sim::state::{GamePhase, GameState};

/// Backdrop polylines are drawn a little past the viewport edges
const RIDGE_MARGIN: f32 = 100.0;
const TREE_MARGIN: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RidgeLayer {
    Mountains,
    Hills,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub facing: Facing,
    pub pose: Pose,
    pub anim_frame: u8,
    pub has_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub archetype: Archetype,
    pub state: BehaviorState,
    pub facing: Facing,
    pub anim_frame: u8,
}

/// Numbers the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub score: u64,
    pub level: usize,
    pub secret: bool,
}

/// Receives one frame of draw calls. All rectangles and points are in screen
/// space. Every method defaults to doing nothing.
pub trait Renderer {
    fn begin_frame(&mut self) {}
    fn draw_cloud(&mut self, _center: Vec2, _cloud: &Cloud) {}
    fn draw_ridge(&mut self, _layer: RidgeLayer, _points: &[Vec2]) {}
    fn draw_tree(&mut self, _base: Vec2, _tree: &Tree) {}
    fn draw_platform(&mut self, _rect: Rect, _kind: SurfaceKind) {}
    fn draw_item(&mut self, _rect: Rect, _kind: ItemKind, _spin_frame: u8) {}
    fn draw_enemy(&mut self, _rect: Rect, _view: EnemyView) {}
    fn draw_warp(&mut self, _rect: Rect, _decoy: bool) {}
    fn draw_goal(&mut self, _rect: Rect) {}
    fn draw_player(&mut self, _rect: Rect, _view: PlayerView) {}
    fn draw_hud(&mut self, _hud: Hud) {}
    /// Pause, victory or game-over banner
    fn draw_overlay(&mut self, _phase: GamePhase, _score: u64) {}
}

fn to_screen(camera: &Camera, rect: &Rect) -> Rect {
    Rect::from_pos_size(camera.world_to_screen(rect.pos()), Vec2::new(rect.width, rect.height))
}

/// Draw the whole frame
pub fn render<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    let camera = &state.camera;
    let stage = &state.stage;

    renderer.begin_frame();
    render_backdrop(&state.backdrop, camera, state.elapsed, renderer);

    for platform in stage.platforms.iter().filter(|p| camera.is_visible(&p.rect)) {
        renderer.draw_platform(to_screen(camera, &platform.rect), platform.kind);
    }

    for item in stage.items.iter().filter(|i| !i.collected) {
        let rect = item.rect();
        if camera.is_visible(&rect) {
            let mut screen = to_screen(camera, &rect);
            screen.y += item.bob_offset();
            renderer.draw_item(screen, item.kind, item.spin_frame);
        }
    }

    for enemy in &stage.enemies {
        let rect = enemy.body.rect();
        if camera.is_visible(&rect) {
            renderer.draw_enemy(
                to_screen(camera, &rect),
                EnemyView {
                    archetype: enemy.archetype,
                    state: enemy.state,
                    facing: enemy.direction,
                    anim_frame: enemy.anim_frame,
                },
            );
        }
    }

    for warp in stage.warps.iter().filter(|w| camera.is_visible(&w.rect)) {
        renderer.draw_warp(to_screen(camera, &warp.rect), warp.decoy);
    }

    if camera.is_visible(&stage.goal) {
        renderer.draw_goal(to_screen(camera, &stage.goal));
    }

    let player = &stage.player;
    if !player.blink_hidden() {
        renderer.draw_player(
            to_screen(camera, &player.rect()),
            PlayerView {
                facing: player.facing,
                pose: player.pose(),
                anim_frame: player.anim_frame,
                has_key: player.has_key,
            },
        );
    }

    renderer.draw_hud(Hud {
        lives: player.lives,
        score: state.score,
        level: state.level,
        secret: stage.secret,
    });

    if state.phase != GamePhase::Playing {
        renderer.draw_overlay(state.phase, state.score);
    }
}

fn render_backdrop<R: Renderer + ?Sized>(backdrop: &Backdrop, camera: &Camera, time: f32, renderer: &mut R) {
    let cloud_y = camera.pos.y * CLOUD_FACTOR;
    for cloud in &backdrop.clouds {
        let center = Vec2::new(Backdrop::cloud_screen_x(cloud, camera, time), cloud.y - cloud_y);
        renderer.draw_cloud(center, cloud);
    }

    let width = camera.size.x;
    let ridge = |points: &[Vec2], factor: f32| -> Vec<Vec2> {
        let offset = Backdrop::layer_offset(camera, factor);
        points
            .iter()
            .map(|p| *p - offset)
            .filter(|p| (-RIDGE_MARGIN..=width + RIDGE_MARGIN).contains(&p.x))
            .collect()
    };
    renderer.draw_ridge(RidgeLayer::Mountains, &ridge(&backdrop.mountains, MOUNTAIN_FACTOR));
    renderer.draw_ridge(RidgeLayer::Hills, &ridge(&backdrop.hills, HILLS_FACTOR));

    let offset = Backdrop::layer_offset(camera, HILLS_FACTOR);
    for tree in &backdrop.trees {
        let base = tree.pos - offset;
        if (-TREE_MARGIN..=width + TREE_MARGIN).contains(&base.x) {
            renderer.draw_tree(base, tree);
        }
    }
}

/// Counts draw calls; stands in for a real backend in headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub frames: u64,
    pub clouds: usize,
    pub trees: usize,
    pub platforms: usize,
    pub items: usize,
    pub enemies: usize,
    pub warps: usize,
    pub goals: usize,
    pub players: usize,
    pub overlays: usize,
    pub last_hud: Option<Hud>,
}

impl DrawStats {
    /// Zero the per-frame counters, keeping the frame count
    fn reset_counts(&mut self) {
        *self = Self {
            frames: self.frames,
            ..Self::default()
        };
    }
}

impl Renderer for DrawStats {
    fn begin_frame(&mut self) {
        self.reset_counts();
        self.frames += 1;
    }

    fn draw_cloud(&mut self, _center: Vec2, _cloud: &Cloud) {
        self.clouds += 1;
    }

    fn draw_tree(&mut self, _base: Vec2, _tree: &Tree) {
        self.trees += 1;
    }

    fn draw_platform(&mut self, _rect: Rect, _kind: SurfaceKind) {
        self.platforms += 1;
    }

    fn draw_item(&mut self, _rect: Rect, _kind: ItemKind, _spin_frame: u8) {
        self.items += 1;
    }

    fn draw_enemy(&mut self, _rect: Rect, _view: EnemyView) {
        self.enemies += 1;
    }

    fn draw_warp(&mut self, _rect: Rect, _decoy: bool) {
        self.warps += 1;
    }

    fn draw_goal(&mut self, _rect: Rect) {
        self.goals += 1;
    }

    fn draw_player(&mut self, _rect: Rect, _view: PlayerView) {
        self.players += 1;
    }

    fn draw_hud(&mut self, hud: Hud) {
        self.last_hud = Some(hud);
    }

    fn draw_overlay(&mut self, _phase: GamePhase, _score: u64) {
        self.overlays += 1;
    }
}
