//! Parallax backdrop
//!
//! Decorative layers behind the level: drifting clouds, a mountain ridge and
//! rolling hills with trees on their peaks. Shapes are generated once per
//! level from a seeded RNG so a level always looks the same.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::*;

/// Mountain ridge sample spacing and extent
const MOUNTAIN_STEP: usize = 30;
const MOUNTAIN_SPAN: i32 = 3000;
/// Hill sample spacing and extent
const HILL_STEP: usize = 20;
const HILL_SPAN: i32 = 2000;
/// Both layers start slightly left of the level origin
const LAYER_START_X: i32 = -100;
/// Clouds wrap around inside this horizontal band
const CLOUD_WRAP_WIDTH: f32 = 1200.0;
const CLOUD_WRAP_MARGIN: f32 = 300.0;

/// One circle of a cloud, relative to the cloud center (unscaled)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudPuff {
    pub offset: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub base_x: f32,
    pub y: f32,
    pub scale: f32,
    /// Auto-drift in pixels per second
    pub speed: f32,
    pub puffs: Vec<CloudPuff>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Base of the trunk, on a hill peak
    pub pos: Vec2,
    pub height: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Backdrop {
    pub seed: u64,
    pub clouds: Vec<Cloud>,
    /// Ridge line, left to right
    pub mountains: Vec<Vec2>,
    /// Hill line, left to right
    pub hills: Vec<Vec2>,
    pub trees: Vec<Tree>,
}

impl Backdrop {
    pub fn for_level(level: usize) -> Self {
        let seed = level as u64 * 7 + 42;
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = generate_clouds(&mut rng);
        let mountains = generate_mountains(&mut rng);
        let (hills, trees) = generate_hills(&mut rng);
        Self {
            seed,
            clouds,
            mountains,
            hills,
            trees,
        }
    }

    /// Horizontal screen position of a cloud's center, wrapped so clouds that
    /// drift off to the right come back in from the left
    pub fn cloud_screen_x(cloud: &Cloud, camera: &Camera, time: f32) -> f32 {
        let x = cloud.base_x - camera.pos.x * CLOUD_FACTOR + time * cloud.speed;
        (x + CLOUD_WRAP_MARGIN).rem_euclid(CLOUD_WRAP_WIDTH) - CLOUD_WRAP_MARGIN
    }

    /// Screen offset of a layer scrolling at `factor` of the camera speed
    #[inline]
    pub fn layer_offset(camera: &Camera, factor: f32) -> Vec2 {
        camera.pos * factor
    }
}

fn generate_clouds(rng: &mut Pcg32) -> Vec<Cloud> {
    let count = rng.random_range(6..10);
    (0..count)
        .map(|_| {
            let puff_count = rng.random_range(3..6);
            let puffs = (0..puff_count)
                .map(|_| CloudPuff {
                    offset: Vec2::new(
                        (rng.random::<f32>() - 0.5) * 30.0,
                        (rng.random::<f32>() - 0.5) * 12.0,
                    ),
                    radius: 10.0 + rng.random::<f32>() * 14.0,
                })
                .collect();
            Cloud {
                base_x: rng.random::<f32>() * 1400.0 - 200.0,
                y: 20.0 + rng.random::<f32>() * 120.0,
                scale: 0.5 + rng.random::<f32>() * 0.6,
                speed: 3.0 + rng.random::<f32>() * CLOUD_AUTO_SPEED,
                puffs,
            }
        })
        .collect()
}

fn generate_mountains(rng: &mut Pcg32) -> Vec<Vec2> {
    (LAYER_START_X..MOUNTAIN_SPAN)
        .step_by(MOUNTAIN_STEP)
        .map(|x| {
            let x = x as f32;
            let ridge = (x * 0.003).sin() * 60.0
                + (x * 0.007 + 2.0).sin() * 35.0
                + (x * 0.015 + 5.0).sin() * 20.0;
            let peak = rng.random::<f32>() * 10.0;
            Vec2::new(x, 340.0 - ridge - peak)
        })
        .collect()
}

fn generate_hills(rng: &mut Pcg32) -> (Vec<Vec2>, Vec<Tree>) {
    let mut hills: Vec<Vec2> = Vec::new();
    let mut trees = Vec::new();

    for x in (LAYER_START_X..HILL_SPAN).step_by(HILL_STEP) {
        let x = x as f32;
        let y = 440.0 - (x * 0.005).sin() * 40.0 - (x * 0.012 + 3.0).sin() * 25.0;
        hills.push(Vec2::new(x, y));

        // Trees only on local peaks (smaller y is higher)
        if let [.., prev, mid, next] = hills.as_slice() {
            if mid.y < prev.y && mid.y < next.y && rng.random::<f32>() > 0.4 {
                trees.push(Tree {
                    pos: *mid,
                    height: 15.0 + rng.random::<f32>() * 20.0,
                    width: 10.0 + rng.random::<f32>() * 8.0,
                });
            }
        }
    }

    (hills, trees)
}
