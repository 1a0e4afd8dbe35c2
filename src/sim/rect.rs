//! Axis-aligned rectangles
//!
//! Every body in the game (player, zombies, platforms, obstacles) is an
//! axis-aligned box. y grows downward and is shared by world and screen space;
//! only x is camera-relative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    #[serde(alias = "width")]
    pub w: f32,
    #[serde(alias = "height")]
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Open-interval overlap test. Rectangles that only share an edge do
    /// not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Same rectangle shifted horizontally (world <-> screen conversion)
    #[inline]
    pub fn shifted_x(&self, dx: f32) -> Rect {
        Rect::new(self.x + dx, self.y, self.w, self.h)
    }
}
