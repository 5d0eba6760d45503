// SPDX-License-Identifier: MIT OR Apache-2.0

pub use vello::kurbo::{BezPath, Circle, PathEl, Point, Rect, Size, Vec2};

/// Space reserved on each side of a decorated component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl Insets {
    /// Create insets from the four side values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Shrink `rect` by these insets.
    pub fn shrink(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 + self.left,
            rect.y0 + self.top,
            rect.x1 - self.right,
            rect.y1 - self.bottom,
        )
    }
}

/// Reading direction of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left-to-right reading order.
    #[default]
    LeftToRight,
    /// Right-to-left reading order, left and right sides are swapped.
    RightToLeft,
}
