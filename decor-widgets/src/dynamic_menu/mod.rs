// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Dynamic Menu
//!
//! A radial popup menu shown in its own translucent overlay window, with
//! timer-driven display and hide animations.
//!
//! ## Lifecycle
//!
//! [show](DynamicMenu::show) creates the overlay centered on a point of the
//! invoker, then a repeating timer raises the progress by the animation step
//! until it reaches 1. [hide](DynamicMenu::hide) lowers it back to 0 and
//! disposes the overlay. Overlay opacity and item placement follow progress.
//! While shown, any press outside the overlay window hides the menu.
//!
//! ## Locking
//!
//! State (flags, progress, overlay, timer) and the callback queues live
//! behind two separate mutexes, always taken in that order. Callbacks and
//! item actions run after both are released, so they may call back into the
//! menu. Every animation carries a generation number: ticks of a stopped
//! timer see a newer generation and change nothing.
//!
//! ### Example
//! ```rust
//! use std::sync::Arc;
//! use decor_core::geometry::{Point, Rect};
//! use decor_core::platform::HeadlessPlatform;
//! use decor_core::timer::ManualTimer;
//! use decor_widgets::dynamic_menu::{DynamicMenu, DynamicMenuItem, MenuIcon};
//!
//! let platform = HeadlessPlatform::new();
//! let timer = ManualTimer::new();
//! let window = platform.add_window(Point::ZERO);
//! let invoker = platform.add_component(Some(window), Rect::new(0.0, 0.0, 200.0, 200.0));
//!
//! let menu = DynamicMenu::new(Arc::new(platform.clone()), Arc::new(timer.clone()));
//! menu.add_item(DynamicMenuItem::new(MenuIcon::square("open", 24.0)).with_action(|| {}));
//! menu.on_full_display(|| log::info!("menu ready"));
//!
//! menu.show(invoker, Point::new(100.0, 100.0));
//! timer.run_until_idle(100);
//! assert_eq!(menu.progress(), 1.0);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use decor_core::animation::{AnimationController, Direction};
use decor_core::config::DecorConfig;
use decor_core::geometry::{Point, Rect, Size};
use decor_core::platform::{
    ComponentId, FollowId, OverlaySurface, PointerEvent, PointerEventKind, TapId, WindowId,
    Windowing,
};
use decor_core::timer::{Timer, TimerHandle};
use decor_core::vg::kurbo::{Affine, Ellipse, Shape};
use decor_core::vg::peniko::{Brush, Color, Fill};
use decor_core::vg::Scene;
use decor_core::{CoreError, CoreResult};
use parking_lot::Mutex;

mod registry;

/// Contains the [item::DynamicMenuItem] struct.
pub mod item;

/// Contains the animation styles.
pub mod kind;

/// Contains the [layout::RadialLayout] struct.
pub mod layout;

pub use item::{DynamicMenuItem, MenuAction, MenuIcon};
pub use kind::DynamicMenuType;
pub use layout::{ItemPlacement, RadialLayout};

type Callback = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MenuSettings {
    layout: RadialLayout,
    step: f32,
    interval: Duration,
    kind: DynamicMenuType,
    hide_kind: Option<DynamicMenuType>,
}

impl MenuSettings {
    fn from_config(config: &DecorConfig) -> Self {
        Self {
            layout: RadialLayout::from_config(&config.menu),
            step: config.animation.step,
            interval: config.animation.interval(),
            kind: config.menu.kind,
            hide_kind: config.menu.hide_kind,
        }
    }

    fn hide_kind(&self) -> DynamicMenuType {
        self.hide_kind.unwrap_or(self.kind)
    }
}

struct Animation {
    controller: AnimationController,
    timer: TimerHandle,
}

struct MenuWindow {
    overlay: Box<dyn OverlaySurface>,
    follow: Option<FollowId>,
    tap: TapId,
}

struct MenuState {
    settings: MenuSettings,
    items: Vec<DynamicMenuItem>,
    displaying: bool,
    hiding: bool,
    hiding_cause: Option<usize>,
    progress: f32,
    generation: u64,
    animation: Option<Animation>,
    window: Option<MenuWindow>,
}

impl MenuState {
    fn new(settings: MenuSettings) -> Self {
        Self {
            settings,
            items: Vec::new(),
            displaying: false,
            hiding: false,
            hiding_cause: None,
            progress: 0.0,
            generation: 0,
            animation: None,
            window: None,
        }
    }

    /// Stop the running animation. Ticks already queued become stale.
    fn stop_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.timer.stop();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    fn item_sizes(&self) -> Vec<Size> {
        self.items.iter().map(DynamicMenuItem::preferred_size).collect()
    }

    fn placements(&self) -> Vec<ItemPlacement> {
        let kind = if self.hiding {
            self.settings.hide_kind()
        } else {
            self.settings.kind
        };
        self.settings
            .layout
            .place_animated(&self.item_sizes(), kind, self.progress, self.hiding_cause)
    }
}

#[derive(Default)]
struct Callbacks {
    on_full_display: Vec<Callback>,
    on_full_hide: Vec<Callback>,
}

struct MenuShared {
    windowing: Arc<dyn Windowing>,
    timer: Arc<dyn Timer>,
    state: Mutex<MenuState>,
    callbacks: Mutex<Callbacks>,
}

impl MenuShared {
    fn start_animation(self: &Arc<Self>, state: &mut MenuState, direction: Direction) {
        state.stop_animation();
        let generation = state.generation;
        let controller = AnimationController::new(state.progress, state.settings.step, direction);

        let menu = Arc::downgrade(self);
        let timer = self.timer.repeat(
            state.settings.interval,
            Duration::ZERO,
            Arc::new(move || {
                if let Some(menu) = menu.upgrade() {
                    menu.on_tick(generation);
                }
            }),
        );
        state.animation = Some(Animation { controller, timer });
    }

    fn on_tick(&self, generation: u64) {
        let completed = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            let Some(animation) = state.animation.as_mut() else {
                return;
            };
            let tick = animation.controller.tick();
            let direction = animation.controller.direction();

            state.progress = tick.progress();
            let progress = state.progress;
            if let Some(window) = state.window.as_mut() {
                window.overlay.set_opacity(progress);
                window.overlay.request_layout();
            }
            if !tick.is_finished() {
                return;
            }

            state.stop_animation();
            match direction {
                Direction::Forward => {
                    state.displaying = false;
                    log::debug!("Dynamic menu fully displayed");
                },
                Direction::Backward => {
                    release_window(self.windowing.as_ref(), &mut state, self);
                    state.hiding = false;
                    state.hiding_cause = None;
                    log::debug!("Dynamic menu fully hidden");
                },
            }

            let mut callbacks = self.callbacks.lock();
            let queue = match direction {
                Direction::Forward => &mut callbacks.on_full_display,
                Direction::Backward => &mut callbacks.on_full_hide,
            };
            std::mem::take(queue)
        };

        for callback in completed {
            callback();
        }
    }

    fn open_window(
        self: &Arc<Self>,
        state: &MenuState,
        invoker: ComponentId,
        location: Point,
    ) -> CoreResult<MenuWindow> {
        let mut overlay = self.windowing.create_overlay(invoker)?;
        let Some(bounds) = self.windowing.bounds_on_screen(invoker) else {
            overlay.dispose();
            return Err(CoreError::UnknownComponent(invoker.0));
        };

        overlay.set_opacity(state.progress);
        overlay.pack(state.settings.layout.preferred_size(&state.item_sizes()));
        let size = overlay.size();
        overlay.set_position(Point::new(
            bounds.x0 + location.x - size.width / 2.0,
            bounds.y0 + location.y - size.height / 2.0,
        ));

        let overlay_id = overlay.id();
        let follow = self
            .windowing
            .window_ancestor(invoker)
            .map(|target| self.windowing.install_follow(overlay_id, target));

        let menu = Arc::downgrade(self);
        let tap = self
            .windowing
            .add_pointer_tap(Arc::new(move |event: &PointerEvent| {
                if event.kind != PointerEventKind::Pressed || event.window == Some(overlay_id) {
                    return;
                }
                if let Some(shared) = menu.upgrade() {
                    DynamicMenu { shared }.hide();
                }
            }));

        overlay.set_visible(true);
        log::debug!("Dynamic menu opened in {}", overlay_id);

        Ok(MenuWindow {
            overlay,
            follow,
            tap,
        })
    }
}

fn release_window(windowing: &dyn Windowing, state: &mut MenuState, menu: *const MenuShared) {
    if let Some(mut window) = state.window.take() {
        if !windowing.remove_pointer_tap(window.tap) {
            log::debug!("Pointer tap {:?} was already removed", window.tap);
        }
        if let Some(follow) = window.follow {
            windowing.uninstall_follow(follow);
        }
        window.overlay.dispose();
    }
    registry::deregister(menu);
}

impl Drop for MenuShared {
    fn drop(&mut self) {
        let menu: *const MenuShared = self;
        let MenuShared {
            windowing, state, ..
        } = self;
        let state = state.get_mut();
        if let Some(animation) = state.animation.take() {
            animation.timer.stop();
        }
        if state.window.is_some() {
            log::debug!("Dynamic menu dropped while shown");
        }
        release_window(&**windowing, state, menu);
    }
}

/// A radial popup menu with animated display and hide.
///
/// Cloning gives another handle to the same menu. The menu is cleaned up
/// (timer stopped, overlay disposed, pointer tap removed) when the last
/// handle is dropped.
#[derive(Clone)]
pub struct DynamicMenu {
    shared: Arc<MenuShared>,
}

impl DynamicMenu {
    /// Create a menu with default settings.
    pub fn new(windowing: Arc<dyn Windowing>, timer: Arc<dyn Timer>) -> Self {
        Self::with_config(windowing, timer, &DecorConfig::default())
    }

    /// Create a menu with settings taken from `config`.
    pub fn with_config(
        windowing: Arc<dyn Windowing>,
        timer: Arc<dyn Timer>,
        config: &DecorConfig,
    ) -> Self {
        Self {
            shared: Arc::new(MenuShared {
                windowing,
                timer,
                state: Mutex::new(MenuState::new(MenuSettings::from_config(config))),
                callbacks: Mutex::new(Callbacks::default()),
            }),
        }
    }

    /// Add an item, returning its index.
    pub fn add_item(&self, item: DynamicMenuItem) -> usize {
        let mut state = self.shared.state.lock();
        state.items.push(item);
        state.items.len() - 1
    }

    /// The menu items.
    pub fn items(&self) -> Vec<DynamicMenuItem> {
        self.shared.state.lock().items.clone()
    }

    /// Remove every item. Ignored while the menu is shown.
    pub fn clear_items(&self) {
        let mut state = self.shared.state.lock();
        if state.window.is_some() {
            log::debug!("Ignoring clear_items on a shown dynamic menu");
            return;
        }
        state.items.clear();
    }

    /// Show the menu centered on `location`, relative to `invoker`.
    ///
    /// Does nothing while the display animation runs, while the menu is
    /// shown, or when it has no items.
    pub fn show(&self, invoker: ComponentId, location: Point) {
        let mut state = self.shared.state.lock();
        if state.displaying || state.window.is_some() || state.items.is_empty() {
            log::debug!(
                "Ignoring show: displaying={}, shown={}, items={}",
                state.displaying,
                state.window.is_some(),
                state.items.len()
            );
            return;
        }

        if state.hiding {
            state.stop_animation();
            state.hiding = false;
            state.hiding_cause = None;
        }

        let window = match self.shared.open_window(&state, invoker, location) {
            Ok(window) => window,
            Err(err) => {
                log::warn!("Failed to show dynamic menu: {}", err);
                return;
            },
        };

        state.window = Some(window);
        state.displaying = true;
        registry::register(&self.shared);
        self.shared.start_animation(&mut state, Direction::Forward);
    }

    /// Hide the menu without a cause.
    pub fn hide(&self) {
        self.hide_with_cause(None);
    }

    /// Hide the menu, recording the index of the item that caused it.
    ///
    /// Does nothing while already hiding or when the menu is not shown.
    pub fn hide_with_cause(&self, cause: Option<usize>) {
        let mut state = self.shared.state.lock();
        if state.hiding {
            log::debug!("Ignoring hide: already hiding");
            return;
        }
        if state.window.is_none() {
            log::debug!("Ignoring hide: not shown");
            return;
        }

        state.hiding = true;
        state.hiding_cause = cause;
        if state.displaying {
            state.stop_animation();
            state.displaying = false;
        }
        self.shared.start_animation(&mut state, Direction::Backward);
    }

    /// Run `action` once the menu is fully displayed.
    ///
    /// Runs immediately when the menu is fully shown and not hiding,
    /// otherwise waits for the next full display.
    pub fn on_full_display(&self, action: impl FnOnce() + Send + 'static) {
        {
            let state = self.shared.state.lock();
            let mut callbacks = self.shared.callbacks.lock();
            if state.window.is_none() || state.displaying || state.hiding {
                callbacks.on_full_display.push(Box::new(action));
                return;
            }
        }
        action();
    }

    /// Run `action` once the menu is fully hidden, or now if it is not shown.
    pub fn on_full_hide(&self, action: impl FnOnce() + Send + 'static) {
        {
            let state = self.shared.state.lock();
            let mut callbacks = self.shared.callbacks.lock();
            if state.window.is_some() {
                callbacks.on_full_hide.push(Box::new(action));
                return;
            }
        }
        action();
    }

    /// Whether the display animation runs.
    pub fn is_displaying(&self) -> bool {
        self.shared.state.lock().displaying
    }

    /// Whether the hide animation runs.
    pub fn is_hiding(&self) -> bool {
        self.shared.state.lock().hiding
    }

    /// Whether the menu has a live overlay, in any animation state.
    pub fn is_shown(&self) -> bool {
        self.shared.state.lock().window.is_some()
    }

    /// Animation progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.shared.state.lock().progress
    }

    /// Index of the item that caused the running hide.
    pub fn hiding_cause(&self) -> Option<usize> {
        self.shared.state.lock().hiding_cause
    }

    /// Window id of the live overlay.
    pub fn overlay_id(&self) -> Option<WindowId> {
        let state = self.shared.state.lock();
        state.window.as_ref().map(|window| window.overlay.id())
    }

    /// Angle of item `index` in degrees, clockwise from the top.
    pub fn item_angle(&self, index: usize) -> f64 {
        let state = self.shared.state.lock();
        state.settings.layout.item_angle(index, state.items.len())
    }

    /// Current placement of the items in overlay coordinates.
    pub fn layout_items(&self) -> Vec<ItemPlacement> {
        self.shared.state.lock().placements()
    }

    /// Current item bounds in overlay coordinates.
    pub fn item_bounds(&self) -> Vec<Rect> {
        self.layout_items()
            .into_iter()
            .map(|placement| placement.bounds)
            .collect()
    }

    /// Handle a press at `point` in overlay coordinates.
    ///
    /// A press on an item runs its action, if it has one, and hides the menu
    /// with that item as the cause. Returns the index of the pressed item.
    pub fn handle_press(&self, point: Point) -> Option<usize> {
        let (index, action) = {
            let state = self.shared.state.lock();
            if state.window.is_none() || state.hiding {
                return None;
            }
            let index = state
                .placements()
                .iter()
                .position(|placement| Ellipse::from_rect(placement.bounds).contains(point))?;
            (index, state.items[index].action().cloned())
        };

        if let Some(action) = action {
            action();
        }
        self.hide_with_cause(Some(index));
        Some(index)
    }

    /// Paint the item borders into `scene`. Returns how many were painted.
    pub fn render(&self, scene: &mut Scene) -> usize {
        let state = self.shared.state.lock();
        let mut painted = 0;
        for (item, placement) in state.items.iter().zip(state.placements()) {
            if !item.draw_border() {
                continue;
            }
            scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                &Brush::Solid(item.border_color()),
                None,
                &Ellipse::from_rect(placement.bounds),
            );
            scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                &Brush::Solid(Color::WHITE),
                None,
                &Ellipse::from_rect(placement.bounds.inset(-2.0)),
            );
            painted += 1;
        }
        painted
    }

    /// Radius of the item circle.
    pub fn radius(&self) -> f64 {
        self.shared.state.lock().settings.layout.radius
    }

    /// Set the radius of the item circle.
    pub fn set_radius(&self, radius: f64) {
        self.shared.state.lock().settings.layout.radius = radius;
    }

    /// Angle of the first item.
    pub fn starting_angle(&self) -> f64 {
        self.shared.state.lock().settings.layout.starting_angle
    }

    /// Set the angle of the first item.
    pub fn set_starting_angle(&self, angle: f64) {
        self.shared.state.lock().settings.layout.starting_angle = angle;
    }

    /// Angle available to the items.
    pub fn angle_range(&self) -> f64 {
        self.shared.state.lock().settings.layout.angle_range
    }

    /// Set the angle available to the items.
    pub fn set_angle_range(&self, range: f64) {
        self.shared.state.lock().settings.layout.angle_range = range;
    }

    /// Whether items wind clockwise.
    pub fn is_clockwise(&self) -> bool {
        self.shared.state.lock().settings.layout.clockwise
    }

    /// Set the winding direction.
    pub fn set_clockwise(&self, clockwise: bool) {
        self.shared.state.lock().settings.layout.clockwise = clockwise;
    }

    /// Progress step of one tick.
    pub fn step(&self) -> f32 {
        self.shared.state.lock().settings.step
    }

    /// Set the progress step, used from the next animation on.
    pub fn set_step(&self, step: f32) {
        self.shared.state.lock().settings.step = step;
    }

    /// Delay between ticks.
    pub fn interval(&self) -> Duration {
        self.shared.state.lock().settings.interval
    }

    /// Set the delay between ticks, used from the next animation on.
    pub fn set_interval(&self, interval: Duration) {
        self.shared.state.lock().settings.interval = interval;
    }

    /// Display animation style.
    pub fn kind(&self) -> DynamicMenuType {
        self.shared.state.lock().settings.kind
    }

    /// Set the display animation style.
    pub fn set_kind(&self, kind: DynamicMenuType) {
        self.shared.state.lock().settings.kind = kind;
    }

    /// Hide animation style, the display style unless set.
    pub fn hide_kind(&self) -> DynamicMenuType {
        self.shared.state.lock().settings.hide_kind()
    }

    /// Set the hide animation style, [None] reuses the display style.
    pub fn set_hide_kind(&self, kind: Option<DynamicMenuType>) {
        self.shared.state.lock().settings.hide_kind = kind;
    }

    /// Whether any menu of the process is shown.
    pub fn is_any_shown() -> bool {
        registry::shown()
            .iter()
            .any(|menu| menu.state.lock().window.is_some())
    }

    /// Hide every shown menu of the process.
    pub fn hide_all() {
        for shared in registry::shown() {
            DynamicMenu { shared }.hide();
        }
    }
}

impl fmt::Debug for DynamicMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("DynamicMenu")
            .field("items", &state.items.len())
            .field("displaying", &state.displaying)
            .field("hiding", &state.hiding)
            .field("progress", &state.progress)
            .field("hiding_cause", &state.hiding_cause)
            .finish()
    }
}
