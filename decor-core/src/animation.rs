// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Progress Animations
//!
//! A single tick engine shared by show and hide transitions. The controller
//! owns the progress value, the step size and the direction; each tick moves
//! progress one step towards the direction's target and reports whether the
//! target was reached.

/// Direction of a progress animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Progress grows towards 1.0.
    Forward,
    /// Progress shrinks towards 0.0.
    Backward,
}

impl Direction {
    /// Progress value this direction ends at.
    pub fn target(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => 0.0,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Result of a single animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Progress moved but the target was not reached yet.
    Progressed(f32),
    /// Progress is now exactly at the target.
    Finished(f32),
}

impl Tick {
    /// Progress after the tick.
    pub fn progress(self) -> f32 {
        match self {
            Self::Progressed(progress) | Self::Finished(progress) => progress,
        }
    }

    /// Whether the animation reached its target.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Steps a progress value in `[0, 1]` towards the target of its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    progress: f32,
    step: f32,
    direction: Direction,
}

impl AnimationController {
    /// Create a controller starting at `progress`.
    ///
    /// Non-positive or non-finite steps fall back to a full jump so the
    /// animation always terminates.
    pub fn new(progress: f32, step: f32, direction: Direction) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            log::warn!("Invalid animation step {}, finishing in one tick", step);
            1.0
        };
        Self {
            progress: progress.clamp(0.0, 1.0),
            step,
            direction,
        }
    }

    /// Current progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Step size.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether progress sits at the target of the current direction.
    pub fn is_finished(&self) -> bool {
        self.progress == self.direction.target()
    }

    /// Advance by one step, clamped to the target.
    pub fn tick(&mut self) -> Tick {
        self.progress = match self.direction {
            Direction::Forward => (self.progress + self.step).min(1.0),
            Direction::Backward => (self.progress - self.step).max(0.0),
        };

        if self.is_finished() {
            Tick::Finished(self.progress)
        } else {
            Tick::Progressed(self.progress)
        }
    }
}
