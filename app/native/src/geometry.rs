//! Geometric types shared by the bar layout and the compositor backends.
//!
//! Coordinates use a top-left origin, matching the window server's global
//! coordinate space. Bar-local frames always start at `(0, 0)`.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// A rectangle defined by origin point and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the origin (top-left corner).
    pub x: f64,
    /// Y coordinate of the origin (top-left corner).
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle at `(0, 0)` with the given size.
    #[must_use]
    pub const fn with_size(width: f64, height: f64) -> Self { Self::new(0.0, 0.0, width, height) }

    /// Returns the origin point of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Point { Point { x: self.x, y: self.y } }

    /// Returns the largest y coordinate covered by the rectangle.
    #[must_use]
    pub fn max_y(&self) -> f64 { self.y + self.height }

    /// Returns the rectangle shrunk by `dx` on the left and right and by `dy`
    /// on the top and bottom.
    ///
    /// Sizes never go negative; an over-inset rectangle collapses around its center.
    #[must_use]
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        let width = 2.0f64.mul_add(-dx, self.width);
        let height = 2.0f64.mul_add(-dy, self.height);

        Self {
            x: if width < 0.0 { self.x + self.width / 2.0 } else { self.x + dx },
            y: if height < 0.0 { self.y + self.height / 2.0 } else { self.y + dy },
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Returns whether a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}
