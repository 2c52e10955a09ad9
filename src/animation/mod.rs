//! Time-based interpolation between two data states.
//!
//! The host owns the clock: it asks for the pending [`FrameHandle`] and feeds
//! it back with a timestamp on each display frame. Starting a new
//! interpolation or cancelling the current one bumps the generation, so a
//! handle the host captured earlier can never drive a superseded animation.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Interpolation curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Maps progress `t` (clamped to 0..=1) through the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationOptions {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration_ms: default_duration_ms(),
            easing: Easing::default(),
        }
    }
}

impl AnimationOptions {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_duration_ms() -> f64 {
    800.0
}

/// Token identifying one scheduled animation of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle {
    pub instance: u64,
    pub generation: u64,
}

/// Result of delivering one frame to a live interpolation.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    InProgress { progress: f64, displayed: Vec<Vec<f64>> },
    /// Final frame; `displayed` equals the target exactly.
    Finished { displayed: Vec<Vec<f64>> },
}

#[derive(Debug, Clone)]
struct Interpolation {
    handle: FrameHandle,
    start: Vec<Vec<f64>>,
    target: Vec<Vec<f64>>,
    started_at_ms: Option<f64>,
    duration_ms: f64,
    easing: Easing,
}

impl Interpolation {
    fn sample(&self, eased: f64) -> Vec<Vec<f64>> {
        self.start
            .iter()
            .zip(&self.target)
            .map(|(from, to)| {
                from.iter()
                    .zip(to)
                    .map(|(from, to)| from + (to - from) * eased)
                    .collect()
            })
            .collect()
    }
}

/// Owns at most one in-flight interpolation for a chart instance.
#[derive(Debug, Clone)]
pub struct AnimationController {
    instance: u64,
    generation: u64,
    active: Option<Interpolation>,
}

impl AnimationController {
    #[must_use]
    pub fn new(instance: u64) -> Self {
        Self {
            instance,
            generation: 0,
            active: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Handle the host should deliver the next frame to, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.active.as_ref().map(|active| active.handle)
    }

    /// Values the running interpolation is heading to.
    #[must_use]
    pub fn target(&self) -> Option<&[Vec<f64>]> {
        self.active.as_ref().map(|active| active.target.as_slice())
    }

    /// Starts a new interpolation, superseding any running one.
    ///
    /// With `started_at_ms == None` the clock is anchored on the first frame
    /// delivered to the returned handle.
    pub fn start(
        &mut self,
        start: Vec<Vec<f64>>,
        target: Vec<Vec<f64>>,
        options: AnimationOptions,
        started_at_ms: Option<f64>,
    ) -> FrameHandle {
        self.cancel();
        let handle = FrameHandle {
            instance: self.instance,
            generation: self.generation,
        };
        trace!(
            instance = handle.instance,
            generation = handle.generation,
            duration_ms = options.duration_ms,
            "start interpolation"
        );
        self.active = Some(Interpolation {
            handle,
            start,
            target,
            started_at_ms,
            duration_ms: options.duration_ms,
            easing: options.easing,
        });
        handle
    }

    /// Drops the running interpolation and invalidates its handle.
    ///
    /// Returns the target it was heading to.
    pub fn cancel(&mut self) -> Option<Vec<Vec<f64>>> {
        self.generation += 1;
        let cancelled = self.active.take()?;
        trace!(
            instance = cancelled.handle.instance,
            generation = cancelled.handle.generation,
            "cancel interpolation"
        );
        Some(cancelled.target)
    }

    /// Advances the interpolation to `now_ms`.
    ///
    /// Returns `None` for a stale or foreign handle; nothing is touched then.
    pub fn tick(&mut self, handle: FrameHandle, now_ms: f64) -> Option<FrameOutcome> {
        let active = self.active.as_mut()?;
        if active.handle != handle {
            trace!(
                instance = handle.instance,
                generation = handle.generation,
                "ignore stale frame"
            );
            return None;
        }

        let started_at = *active.started_at_ms.get_or_insert(now_ms);
        let progress = if active.duration_ms > 0.0 {
            ((now_ms - started_at) / active.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            let finished = self.active.take()?;
            return Some(FrameOutcome::Finished {
                displayed: finished.target,
            });
        }

        let eased = active.easing.apply(progress);
        Some(FrameOutcome::InProgress {
            progress,
            displayed: active.sample(eased),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationController, AnimationOptions, Easing, FrameOutcome};
    use approx::assert_abs_diff_eq;

    fn options() -> AnimationOptions {
        AnimationOptions {
            enabled: true,
            duration_ms: 800.0,
            easing: Easing::EaseOutCubic,
        }
    }

    #[test]
    fn ease_out_cubic_matches_closed_form() {
        assert_eq!(Easing::EaseOutCubic.apply(0.0), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(0.5), 0.875);
        assert_eq!(Easing::EaseOutCubic.apply(1.0), 1.0);
        assert_eq!(Easing::EaseOutCubic.apply(3.0), 1.0);
    }

    #[test]
    fn ease_in_out_cubic_is_symmetric_around_midpoint() {
        assert_abs_diff_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
        assert_abs_diff_eq!(
            Easing::EaseInOutCubic.apply(0.25) + Easing::EaseInOutCubic.apply(0.75),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn first_frame_anchors_the_clock() {
        let mut controller = AnimationController::new(1);
        let handle = controller.start(vec![vec![0.0]], vec![vec![4.0]], options(), None);

        match controller.tick(handle, 10_000.0) {
            Some(FrameOutcome::InProgress { progress, displayed }) => {
                assert_eq!(progress, 0.0);
                assert_eq!(displayed, vec![vec![0.0]]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn superseded_handle_is_ignored() {
        let mut controller = AnimationController::new(1);
        let first = controller.start(vec![vec![0.0]], vec![vec![1.0]], options(), Some(0.0));
        let second = controller.start(vec![vec![0.0]], vec![vec![2.0]], options(), Some(0.0));

        assert_ne!(first, second);
        assert!(controller.tick(first, 400.0).is_none());
        assert!(controller.tick(second, 400.0).is_some());
    }

    #[test]
    fn completion_snaps_to_target_and_clears_handle() {
        let mut controller = AnimationController::new(1);
        let target = vec![vec![0.1, 0.2, 0.3]];
        let handle = controller.start(vec![vec![0.7, 0.9, 0.0]], target.clone(), options(), Some(0.0));

        let outcome = controller.tick(handle, 1_000.0);
        assert_eq!(outcome, Some(FrameOutcome::Finished { displayed: target }));
        assert!(!controller.is_active());
        assert!(controller.pending_frame().is_none());
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut controller = AnimationController::new(1);
        let opts = AnimationOptions {
            duration_ms: 0.0,
            ..options()
        };
        let handle = controller.start(vec![vec![0.0]], vec![vec![3.0]], opts, None);
        assert!(matches!(
            controller.tick(handle, 5.0),
            Some(FrameOutcome::Finished { .. })
        ));
    }
}
