// SPDX-License-Identifier: MIT OR Apache-2.0

//! Radial placement of menu items.

use decor_core::config::MenuConfig;
use decor_core::geometry::{Point, Rect, Size, Vec2};
use nalgebra::{Rotation2, Vector2};

use super::kind::{animate, DynamicMenuType, Polar};

/// Where an item is placed, relative to the overlay origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Item center.
    pub center: Point,
    /// Angle in degrees, clockwise from the top.
    pub angle: f64,
    /// Item bounds centered on `center`.
    pub bounds: Rect,
}

/// Places items evenly around a circle.
///
/// Angles are measured in degrees clockwise from the top of the circle. `N`
/// items are spaced `angle_range / N` apart whatever the range, so a full
/// circle never places the last item on top of the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Angle of the first item.
    pub starting_angle: f64,
    /// Angle available to the items.
    pub angle_range: f64,
    /// Winding direction.
    pub clockwise: bool,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self::from_config(&MenuConfig::default())
    }
}

impl RadialLayout {
    /// Create a layout.
    pub fn new(radius: f64, starting_angle: f64, angle_range: f64, clockwise: bool) -> Self {
        Self {
            radius,
            starting_angle,
            angle_range,
            clockwise,
        }
    }

    /// Create a layout from menu configuration.
    pub fn from_config(config: &MenuConfig) -> Self {
        Self::new(
            config.radius,
            config.starting_angle,
            config.angle_range,
            config.clockwise,
        )
    }

    fn sweep(&self, index: usize, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let sign = if self.clockwise { 1.0 } else { -1.0 };
        sign * index as f64 * self.angle_range / count as f64
    }

    /// Angle of item `index` out of `count`, normalized to `[0, 360)`.
    pub fn item_angle(&self, index: usize, count: usize) -> f64 {
        normalize(self.starting_angle + self.sweep(index, count))
    }

    /// Size of the overlay hosting items of the given sizes.
    pub fn preferred_size(&self, item_sizes: &[Size]) -> Size {
        let largest = item_sizes.iter().fold(Size::ZERO, |largest, size| {
            Size::new(largest.width.max(size.width), largest.height.max(size.height))
        });
        Size::new(
            self.radius * 2.0 + largest.width,
            self.radius * 2.0 + largest.height,
        )
    }

    /// Resting placement of every item.
    pub fn place(&self, item_sizes: &[Size]) -> Vec<ItemPlacement> {
        self.place_animated(item_sizes, DynamicMenuType::Plain, 1.0, None)
    }

    /// Placement of every item at `progress` of an animation.
    ///
    /// The item that caused the menu to hide, if any, stays at rest.
    pub fn place_animated(
        &self,
        item_sizes: &[Size],
        kind: DynamicMenuType,
        progress: f32,
        hiding_cause: Option<usize>,
    ) -> Vec<ItemPlacement> {
        let preferred = self.preferred_size(item_sizes);
        let center = Point::new(preferred.width / 2.0, preferred.height / 2.0);
        let count = item_sizes.len();

        item_sizes
            .iter()
            .enumerate()
            .map(|(index, size)| {
                let target = Polar::new(self.item_angle(index, count), self.radius);
                let polar = if hiding_cause == Some(index) {
                    target
                } else {
                    animate(kind, target, self.sweep(index, count), f64::from(progress))
                };
                let item_center = center + offset(polar);
                ItemPlacement {
                    center: item_center,
                    angle: target.angle,
                    bounds: Rect::from_center_size(item_center, *size),
                }
            })
            .collect()
    }
}

fn normalize(angle: f64) -> f64 {
    let angle = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Screen offset of a polar position, y pointing down.
fn offset(polar: Polar) -> Vec2 {
    let rotation = Rotation2::new(polar.angle.to_radians());
    let v = rotation * Vector2::new(0.0, -polar.distance);
    Vec2::new(v.x, v.y)
}
