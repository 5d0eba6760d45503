// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::sync::Arc;

use decor_core::geometry::{Insets, Size};
use decor_core::vg::peniko::Color;

/// Callback run when a menu item is pressed.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// The graphic of a menu item.
///
/// The menu only needs the icon size for layout. Hosts resolve `name` to the
/// actual image when painting.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuIcon {
    /// Icon name or path understood by the host.
    pub name: String,
    /// Icon size in pixels.
    pub size: Size,
}

impl MenuIcon {
    /// Create an icon of the given size.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Create a square icon.
    pub fn square(name: impl Into<String>, side: f64) -> Self {
        Self::new(name, Size::new(side, side))
    }
}

/// A single entry of a [DynamicMenu](super::DynamicMenu).
///
/// An item is enabled when it has an action. Disabled items are drawn with
/// the disabled border color. Pressing any item closes the menu.
///
/// ### Example
/// ```rust
/// use decor_widgets::dynamic_menu::{DynamicMenuItem, MenuIcon};
///
/// let item = DynamicMenuItem::new(MenuIcon::square("edit-copy", 24.0))
///     .with_action(|| log::info!("copy"))
///     .with_draw_border(false);
/// assert!(item.is_enabled());
/// ```
#[derive(Clone)]
pub struct DynamicMenuItem {
    icon: MenuIcon,
    action: Option<MenuAction>,
    draw_border: bool,
    border_color: Color,
    disabled_border_color: Color,
    margin: Insets,
}

impl DynamicMenuItem {
    /// Create an item without an action.
    pub fn new(icon: MenuIcon) -> Self {
        Self {
            icon,
            action: None,
            draw_border: true,
            border_color: Color::from_rgb8(170, 170, 170),
            disabled_border_color: Color::from_rgb8(210, 210, 210),
            margin: Insets::uniform(6.0),
        }
    }

    /// Set the action run on press.
    pub fn with_action(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Set whether the round border is painted.
    pub fn with_draw_border(mut self, draw_border: bool) -> Self {
        self.draw_border = draw_border;
        self
    }

    /// Set the border color of the enabled item.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set the border color of the disabled item.
    pub fn with_disabled_border_color(mut self, color: Color) -> Self {
        self.disabled_border_color = color;
        self
    }

    /// Set the space between the icon and the item edge.
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// The item icon.
    pub fn icon(&self) -> &MenuIcon {
        &self.icon
    }

    /// The item action.
    pub fn action(&self) -> Option<&MenuAction> {
        self.action.as_ref()
    }

    /// Whether the item has an action to run on press.
    pub fn is_enabled(&self) -> bool {
        self.action.is_some()
    }

    /// Whether the round border is painted.
    pub fn draw_border(&self) -> bool {
        self.draw_border
    }

    /// Border color for the current enabled state.
    pub fn border_color(&self) -> Color {
        if self.is_enabled() {
            self.border_color
        } else {
            self.disabled_border_color
        }
    }

    /// The item margin.
    pub fn margin(&self) -> Insets {
        self.margin
    }

    /// Icon size plus margin.
    pub fn preferred_size(&self) -> Size {
        Size::new(
            self.icon.size.width + self.margin.horizontal(),
            self.icon.size.height + self.margin.vertical(),
        )
    }
}

impl fmt::Debug for DynamicMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicMenuItem")
            .field("icon", &self.icon)
            .field("enabled", &self.is_enabled())
            .field("draw_border", &self.draw_border)
            .field("margin", &self.margin)
            .finish()
    }
}
