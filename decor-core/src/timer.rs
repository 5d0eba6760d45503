// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timer collaborator abstraction.
//!
//! Animations are driven by a retriggerable periodic timer rather than a
//! sleeping loop. Hosts plug their event loop timers in through [Timer];
//! [ManualTimer] fires ticks on demand and `TokioTimer` (feature
//! `tokio-timer`) uses a tokio interval.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// Callback invoked on every timer tick.
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a running repeating timer.
///
/// Stopping is synchronous from the owner's point of view: once [stop](Self::stop)
/// returns the timer never invokes its callback again.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    stopped: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Create a new running handle.
    pub fn new() -> Self {
        Self {
            id: NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Unique id of this timer.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the timer.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether the timer was stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A source of repeating timers.
pub trait Timer: Send + Sync {
    /// Invoke `on_tick` every `interval` after `initial_delay` until stopped.
    fn repeat(&self, interval: Duration, initial_delay: Duration, on_tick: TickFn) -> TimerHandle;
}

struct ManualEntry {
    handle: TimerHandle,
    interval: Duration,
    on_tick: TickFn,
}

/// A timer that only ticks when told to.
///
/// Every call to [tick](Self::tick) fires each running timer once, in
/// registration order. Stopped timers are dropped on the next tick.
#[derive(Clone, Default)]
pub struct ManualTimer {
    entries: Arc<Mutex<Vec<ManualEntry>>>,
}

impl ManualTimer {
    /// Create a manual timer with no running timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every running timer once. Returns how many callbacks ran.
    pub fn tick(&self) -> usize {
        let due: Vec<(TimerHandle, TickFn)> = {
            let mut entries = self.entries.lock();
            entries.retain(|entry| !entry.handle.is_stopped());
            entries
                .iter()
                .map(|entry| (entry.handle.clone(), entry.on_tick.clone()))
                .collect()
        };

        let mut fired = 0;
        for (handle, on_tick) in due {
            // A previous callback in this round may have stopped this one.
            if handle.is_stopped() {
                continue;
            }
            on_tick();
            fired += 1;
        }
        fired
    }

    /// Tick `count` times, returning the total number of callbacks run.
    pub fn tick_n(&self, count: usize) -> usize {
        (0..count).map(|_| self.tick()).sum()
    }

    /// Tick until no timer is running or `limit` ticks were spent.
    /// Returns the number of ticks spent.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        for spent in 0..limit {
            if self.tick() == 0 {
                return spent;
            }
        }
        limit
    }

    /// Number of timers that have not been stopped.
    pub fn running(&self) -> usize {
        let entries = self.entries.lock();
        entries
            .iter()
            .filter(|entry| !entry.handle.is_stopped())
            .count()
    }

    /// Interval of the most recently started running timer.
    pub fn last_interval(&self) -> Option<Duration> {
        let entries = self.entries.lock();
        entries
            .iter()
            .rev()
            .find(|entry| !entry.handle.is_stopped())
            .map(|entry| entry.interval)
    }
}

impl Timer for ManualTimer {
    fn repeat(&self, interval: Duration, _initial_delay: Duration, on_tick: TickFn) -> TimerHandle {
        let handle = TimerHandle::new();
        self.entries.lock().push(ManualEntry {
            handle: handle.clone(),
            interval,
            on_tick,
        });
        handle
    }
}

/// A timer backed by `tokio::time::interval` on a runtime handle.
#[cfg(feature = "tokio-timer")]
#[derive(Clone)]
pub struct TokioTimer {
    runtime: tokio::runtime::Handle,
}

#[cfg(feature = "tokio-timer")]
impl TokioTimer {
    /// Create a timer spawning onto the given runtime.
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Create a timer spawning onto the runtime of the current context.
    ///
    /// Returns [None] when called outside of a tokio runtime.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "tokio-timer")]
impl Timer for TokioTimer {
    fn repeat(&self, interval: Duration, initial_delay: Duration, on_tick: TickFn) -> TimerHandle {
        let handle = TimerHandle::new();
        let task_handle = handle.clone();
        let interval = interval.max(Duration::from_millis(1));

        self.runtime.spawn(async move {
            tokio::time::sleep(initial_delay).await;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if task_handle.is_stopped() {
                    break;
                }
                on_tick();
            }
            log::debug!("Timer {} finished", task_handle.id());
        });

        handle
    }
}
