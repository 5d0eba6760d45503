// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{
    ComponentId, FollowId, OverlaySurface, PointerEvent, PointerTap, TapId, WindowId, Windowing,
};
use crate::error::{CoreError, CoreResult};
use crate::geometry::{Point, Rect, Size, Vec2};

/// State of a headless overlay window, as observed by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySnapshot {
    /// Window id.
    pub id: WindowId,
    /// Window that owns the overlay.
    pub owner: Option<WindowId>,
    /// Current opacity.
    pub opacity: f32,
    /// Screen position.
    pub position: Point,
    /// Window size.
    pub size: Size,
    /// Visibility flag.
    pub visible: bool,
    /// Number of layout requests received.
    pub layout_requests: usize,
}

#[derive(Debug, Clone, Copy)]
struct HeadlessComponent {
    bounds: Rect,
    window: Option<WindowId>,
}

#[derive(Default)]
struct HeadlessState {
    next_id: u64,
    windows: HashMap<WindowId, Point>,
    components: HashMap<ComponentId, HeadlessComponent>,
    overlays: HashMap<WindowId, Arc<Mutex<OverlaySnapshot>>>,
    follows: HashMap<FollowId, (WindowId, WindowId)>,
    taps: Vec<(TapId, PointerTap)>,
    disposed: usize,
}

impl HeadlessState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// A windowing backend that keeps every window in memory.
///
/// Components are registered with screen bounds; overlays, follow behaviors
/// and pointer taps are tracked so their lifecycle can be inspected.
#[derive(Clone, Default)]
pub struct HeadlessPlatform {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessPlatform {
    /// Create an empty headless platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level window at a screen position.
    pub fn add_window(&self, position: Point) -> WindowId {
        let mut state = self.state.lock();
        let id = WindowId(state.next_id());
        state.windows.insert(id, position);
        id
    }

    /// Register a component with its screen bounds.
    pub fn add_component(&self, window: Option<WindowId>, bounds: Rect) -> ComponentId {
        let mut state = self.state.lock();
        let id = ComponentId(state.next_id());
        state
            .components
            .insert(id, HeadlessComponent { bounds, window });
        id
    }

    /// Move a top-level window, dragging its components and followers along.
    pub fn move_window(&self, window: WindowId, position: Point) {
        let mut state = self.state.lock();
        let Some(current) = state.windows.get_mut(&window) else {
            log::warn!("Moving unknown {}", window);
            return;
        };
        let delta: Vec2 = position - *current;
        *current = position;

        for component in state.components.values_mut() {
            if component.window == Some(window) {
                component.bounds = component.bounds + delta;
            }
        }

        let followers: Vec<WindowId> = state
            .follows
            .values()
            .filter(|(_, target)| *target == window)
            .map(|(follower, _)| *follower)
            .collect();
        for follower in followers {
            if let Some(overlay) = state.overlays.get(&follower) {
                let mut overlay = overlay.lock();
                overlay.position += delta;
            }
        }
    }

    /// Dispatch a pointer event to every installed tap.
    pub fn dispatch(&self, event: PointerEvent) {
        let taps: Vec<PointerTap> = {
            let state = self.state.lock();
            state.taps.iter().map(|(_, tap)| tap.clone()).collect()
        };
        for tap in taps {
            tap(&event);
        }
    }

    /// Dispatch a press at `position` targeting `window`.
    pub fn press(&self, position: Point, window: Option<WindowId>) {
        self.dispatch(PointerEvent::pressed(position, window));
    }

    /// Number of installed pointer taps.
    pub fn tap_count(&self) -> usize {
        self.state.lock().taps.len()
    }

    /// Number of installed follow behaviors.
    pub fn follow_count(&self) -> usize {
        self.state.lock().follows.len()
    }

    /// Number of overlays that have not been disposed.
    pub fn overlay_count(&self) -> usize {
        self.state.lock().overlays.len()
    }

    /// Number of overlays disposed so far.
    pub fn disposed_count(&self) -> usize {
        self.state.lock().disposed
    }

    /// Snapshot of a live overlay.
    pub fn overlay(&self, id: WindowId) -> Option<OverlaySnapshot> {
        let state = self.state.lock();
        state.overlays.get(&id).map(|overlay| overlay.lock().clone())
    }

    /// Snapshots of all live overlays, ordered by id.
    pub fn overlays(&self) -> Vec<OverlaySnapshot> {
        let state = self.state.lock();
        let mut overlays: Vec<OverlaySnapshot> = state
            .overlays
            .values()
            .map(|overlay| overlay.lock().clone())
            .collect();
        overlays.sort_by_key(|overlay| overlay.id);
        overlays
    }
}

impl Windowing for HeadlessPlatform {
    fn create_overlay(&self, invoker: ComponentId) -> CoreResult<Box<dyn OverlaySurface>> {
        let mut state = self.state.lock();
        let component = state
            .components
            .get(&invoker)
            .copied()
            .ok_or(CoreError::UnknownComponent(invoker.0))?;

        let id = WindowId(state.next_id());
        let snapshot = Arc::new(Mutex::new(OverlaySnapshot {
            id,
            owner: component.window,
            opacity: 1.0,
            position: Point::ZERO,
            size: Size::ZERO,
            visible: false,
            layout_requests: 0,
        }));
        state.overlays.insert(id, snapshot.clone());
        log::debug!("Created headless overlay {}", id);

        Ok(Box::new(HeadlessOverlay {
            id,
            snapshot,
            platform: Arc::downgrade(&self.state),
            disposed: false,
        }))
    }

    fn bounds_on_screen(&self, component: ComponentId) -> Option<Rect> {
        let state = self.state.lock();
        state.components.get(&component).map(|c| c.bounds)
    }

    fn window_ancestor(&self, component: ComponentId) -> Option<WindowId> {
        let state = self.state.lock();
        state.components.get(&component).and_then(|c| c.window)
    }

    fn install_follow(&self, follower: WindowId, target: WindowId) -> FollowId {
        let mut state = self.state.lock();
        let id = FollowId(state.next_id());
        state.follows.insert(id, (follower, target));
        id
    }

    fn uninstall_follow(&self, id: FollowId) {
        self.state.lock().follows.remove(&id);
    }

    fn add_pointer_tap(&self, tap: PointerTap) -> TapId {
        let mut state = self.state.lock();
        let id = TapId(state.next_id());
        state.taps.push((id, tap));
        id
    }

    fn remove_pointer_tap(&self, id: TapId) -> bool {
        let mut state = self.state.lock();
        let before = state.taps.len();
        state.taps.retain(|(tap, _)| *tap != id);
        state.taps.len() != before
    }
}

struct HeadlessOverlay {
    id: WindowId,
    snapshot: Arc<Mutex<OverlaySnapshot>>,
    platform: Weak<Mutex<HeadlessState>>,
    disposed: bool,
}

impl OverlaySurface for HeadlessOverlay {
    fn id(&self) -> WindowId {
        self.id
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.snapshot.lock().opacity = opacity.clamp(0.0, 1.0);
    }

    fn opacity(&self) -> f32 {
        self.snapshot.lock().opacity
    }

    fn set_position(&mut self, position: Point) {
        self.snapshot.lock().position = position;
    }

    fn position(&self) -> Point {
        self.snapshot.lock().position
    }

    fn pack(&mut self, preferred: Size) {
        self.snapshot.lock().size = preferred;
    }

    fn size(&self) -> Size {
        self.snapshot.lock().size
    }

    fn set_visible(&mut self, visible: bool) {
        self.snapshot.lock().visible = visible;
    }

    fn is_visible(&self) -> bool {
        !self.disposed && self.snapshot.lock().visible
    }

    fn request_layout(&mut self) {
        self.snapshot.lock().layout_requests += 1;
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.snapshot.lock().visible = false;
        if let Some(platform) = self.platform.upgrade() {
            let mut state = platform.lock();
            state.overlays.remove(&self.id);
            state.disposed += 1;
        }
        log::debug!("Disposed headless overlay {}", self.id);
    }
}

impl Drop for HeadlessOverlay {
    fn drop(&mut self) {
        self.dispose();
    }
}
