// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item motion of the menu animation styles.

pub use decor_core::config::MenuAnimationType as DynamicMenuType;

/// Angle (degrees, clockwise from the top) and distance from the menu center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Angle in degrees.
    pub angle: f64,
    /// Distance from the center.
    pub distance: f64,
}

impl Polar {
    /// Create a polar position.
    pub fn new(angle: f64, distance: f64) -> Self {
        Self { angle, distance }
    }
}

/// Where an item resting at `target` sits at `progress` of an animation.
///
/// `sweep` is the signed angle between the starting angle and the item's
/// resting angle, following the winding direction of the menu.
pub fn animate(kind: DynamicMenuType, target: Polar, sweep: f64, progress: f64) -> Polar {
    let progress = progress.clamp(0.0, 1.0);
    let remaining = 1.0 - progress;
    let winding = if sweep < 0.0 { -1.0 } else { 1.0 };
    match kind {
        DynamicMenuType::Plain => target,
        DynamicMenuType::Shutter => Polar::new(target.angle - sweep * remaining, target.distance),
        DynamicMenuType::Star => Polar::new(target.angle, target.distance * progress),
        DynamicMenuType::Roll => Polar::new(
            target.angle - winding * 90.0 * remaining,
            target.distance * progress,
        ),
        DynamicMenuType::BlackHole => Polar::new(
            target.angle + winding * 360.0 * remaining,
            target.distance * progress * progress,
        ),
    }
}
