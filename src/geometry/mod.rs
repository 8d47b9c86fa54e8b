//! Layout-space geometry in density-independent units.

mod solve;

use serde::{Deserialize, Serialize};

pub use self::solve::{SolvedLayout, SolvedSlot, solve};

/// Pointer or offset coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn delta_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let d = self.delta_from(other);
        d.x.hypot(d.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Vertical extent of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBand {
    pub top: f32,
    pub height: f32,
}

impl RowBand {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn mid(&self) -> f32 {
        self.top + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}
