// SPDX-License-Identifier: MIT OR Apache-2.0

//! Windowing collaborator abstraction.
//!
//! Popups never talk to a windowing toolkit directly. A host implements
//! [Windowing] (and the [OverlaySurface] handles it creates) on top of its
//! toolkit; [headless::HeadlessPlatform] is an in-memory implementation used
//! for tests and off-screen hosts.

use std::fmt;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::geometry::{Point, Rect, Size};

/// In-memory windowing backend.
pub mod headless;

pub use headless::HeadlessPlatform;

/// Identifier of a component known to the windowing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

/// Identifier of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Registration handle of a global pointer tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TapId(pub u64);

/// Registration handle of a window-follow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FollowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Kind of a pointer event seen by a global tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A button was pressed.
    Pressed,
    /// A button was released.
    Released,
    /// The pointer moved.
    Moved,
}

/// A pointer event dispatched process-wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Position in screen coordinates.
    pub position: Point,
    /// Top-level window the event targets, [None] for the desktop.
    pub window: Option<WindowId>,
}

impl PointerEvent {
    /// Create a press event.
    pub fn pressed(position: Point, window: Option<WindowId>) -> Self {
        Self {
            kind: PointerEventKind::Pressed,
            position,
            window,
        }
    }
}

/// Callback invoked for every pointer event while a tap is installed.
pub type PointerTap = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

/// A borderless translucent top-level window hosting popup content.
pub trait OverlaySurface: Send {
    /// The window id of this surface.
    fn id(&self) -> WindowId;

    /// Set the window opacity (0.0 to 1.0).
    fn set_opacity(&mut self, opacity: f32);

    /// Get the window opacity.
    fn opacity(&self) -> f32;

    /// Move the window to a screen position.
    fn set_position(&mut self, position: Point);

    /// Get the window screen position.
    fn position(&self) -> Point;

    /// Resize the window to its content's preferred size.
    fn pack(&mut self, preferred: Size);

    /// Get the window size.
    fn size(&self) -> Size;

    /// Show or hide the window.
    fn set_visible(&mut self, visible: bool);

    /// Whether the window is visible.
    fn is_visible(&self) -> bool;

    /// Ask the host to lay out and repaint the content.
    fn request_layout(&mut self) {}

    /// Destroy the window. Calling this twice is harmless.
    fn dispose(&mut self);

    /// Screen bounds of the window.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }
}

/// The windowing toolkit as seen by popups.
pub trait Windowing: Send + Sync {
    /// Create a hidden, non-opaque overlay owned by `invoker`'s window.
    fn create_overlay(&self, invoker: ComponentId) -> CoreResult<Box<dyn OverlaySurface>>;

    /// Screen bounds of a component.
    fn bounds_on_screen(&self, component: ComponentId) -> Option<Rect>;

    /// Top-level window containing a component.
    fn window_ancestor(&self, component: ComponentId) -> Option<WindowId>;

    /// Make `follower` move along with `target`.
    fn install_follow(&self, follower: WindowId, target: WindowId) -> FollowId;

    /// Remove a follow behavior. Unknown ids are ignored.
    fn uninstall_follow(&self, id: FollowId);

    /// Install a process-wide pointer tap.
    fn add_pointer_tap(&self, tap: PointerTap) -> TapId;

    /// Remove a pointer tap, returning whether it was installed.
    fn remove_pointer_tap(&self, id: TapId) -> bool;
}
