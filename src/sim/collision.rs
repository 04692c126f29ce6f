//! Collision detection and response for axis-aligned boxes
//!
//! A moving body is pushed out of a static box along the axis of least
//! penetration. This can pick the wrong axis for a fast body deep in a corner;
//! the velocities and tile sizes used by the levels keep that out of reach.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::SurfaceKind;
use super::rect::Rect;
use crate::consts::HAZARD_DAMAGE;

/// Face of the static box the body is pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Body lands on the box
    Top,
    /// Body bumps its head on the box
    Bottom,
    /// Body hits the box's left wall (pushed left)
    Left,
    /// Body hits the box's right wall (pushed right)
    Right,
}

/// Geometric correction for one body/box pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub axis: Axis,
    /// Corrected top-left position of the body
    pub position: Vec2,
    /// Penetration depth along `axis` before correction
    pub penetration: f32,
}

/// Outcome of touching a static surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Solid surface: push the body out
    Push(Correction),
    /// Hazard surface: no push, the body takes damage
    Hazard { damage: u32 },
}

/// Resolve a moving body against one static surface.
///
/// Returns `None` unless the boxes share area on both axes; edges that only
/// touch are not a contact. See `resting_contact` for bodies standing exactly
/// on a surface.
pub fn resolve(body: &Rect, surface: &Rect, kind: SurfaceKind) -> Option<Contact> {
    debug_assert!(body.is_valid() && surface.is_valid());

    if !body.overlaps(surface) {
        return None;
    }
    if kind == SurfaceKind::Hazard {
        return Some(Contact::Hazard {
            damage: HAZARD_DAMAGE,
        });
    }
    min_penetration(body, surface).map(Contact::Push)
}

/// Minimum-penetration axis for two overlapping boxes.
///
/// Ties go to the first candidate in the order top, bottom, left, right.
pub fn min_penetration(body: &Rect, surface: &Rect) -> Option<Correction> {
    if !body.overlaps(surface) {
        return None;
    }

    let candidates = [
        (Axis::Top, body.bottom() - surface.top()),
        (Axis::Bottom, surface.bottom() - body.top()),
        (Axis::Left, body.right() - surface.left()),
        (Axis::Right, surface.right() - body.left()),
    ];

    let (axis, penetration) = candidates
        .into_iter()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })?;

    let position = match axis {
        Axis::Top => Vec2::new(body.x, surface.top() - body.height),
        Axis::Bottom => Vec2::new(body.x, surface.bottom()),
        Axis::Left => Vec2::new(surface.left() - body.width, body.y),
        Axis::Right => Vec2::new(surface.right(), body.y),
    };

    Some(Correction {
        axis,
        position,
        penetration,
    })
}

/// Zero-depth `Top` correction for a body whose bottom sits exactly on a
/// solid surface it spans horizontally. Hazards never support.
pub fn resting_contact(body: &Rect, surface: &Rect, kind: SurfaceKind) -> Option<Correction> {
    let on_top = body.bottom() == surface.top()
        && body.right() > surface.left()
        && body.left() < surface.right();
    (on_top && kind != SurfaceKind::Hazard).then(|| Correction {
        axis: Axis::Top,
        position: body.pos(),
        penetration: 0.0,
    })
}
