use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::animation::{AnimationController, FrameHandle, FrameOutcome};
use crate::core::{BoundingBox, Category, ChartStats, MIN_VERTEX_COUNT, Series};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverState, SharedTooltipSlot, Tooltip, shared_tooltip_slot};
use crate::render::RadarScene;

use super::labels::{LabelTranslator, resolve_label};
use super::listeners::{ChartEvent, ChartEventContext, ChartListener, ListenerSet};
use super::scene_builder::{SceneInput, build_scene};
use super::{ChartOptions, Container};

static NEXT_INSTANCE_SERIAL: AtomicU64 = AtomicU64::new(1);

/// State shared by every chart a host composes together.
///
/// Charts created from the same environment share one tooltip slot, so at
/// most one tooltip is visible among them.
#[derive(Clone, Default)]
pub struct ChartEnvironment {
    pub tooltip: SharedTooltipSlot,
    pub translator: Option<Rc<dyn LabelTranslator>>,
}

impl ChartEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tooltip: shared_tooltip_slot(),
            translator: None,
        }
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Rc<dyn LabelTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }
}

enum Lifecycle {
    Live(Box<LiveChart>),
    Inert,
    Destroyed,
}

struct LiveChart {
    container: Container,
    categories: Vec<Category>,
    options: ChartOptions,
    series: SmallVec<[Series; 2]>,
    displayed: Vec<Vec<f64>>,
    animation: AnimationController,
    hover: HoverState,
    listeners: ListenerSet,
    scene: Option<RadarScene>,
    render_count: u64,
}

/// One live radar chart bound to a container.
///
/// Construction never fails: a missing container or invalid options produce
/// an inert instance that ignores every operation.
pub struct ChartInstance {
    serial: u64,
    environment: ChartEnvironment,
    lifecycle: Lifecycle,
}

impl ChartInstance {
    /// Creates a standalone chart with its own tooltip slot.
    ///
    /// The at-most-one-tooltip guarantee only spans charts sharing a
    /// [`ChartEnvironment`]; two charts built with `new` can each show a
    /// tooltip. Use [`Self::new_in`] or a `ChartRegistry` to share one slot.
    #[must_use]
    pub fn new(
        container: Option<Container>,
        categories: Vec<Category>,
        initial_data: Option<Vec<f64>>,
        options: ChartOptions,
    ) -> Self {
        Self::new_in(
            ChartEnvironment::new(),
            container,
            categories,
            initial_data,
            options,
        )
    }

    /// Creates a chart sharing tooltip slot and translator with `environment`.
    #[must_use]
    pub fn new_in(
        environment: ChartEnvironment,
        container: Option<Container>,
        categories: Vec<Category>,
        initial_data: Option<Vec<f64>>,
        options: ChartOptions,
    ) -> Self {
        let serial = NEXT_INSTANCE_SERIAL.fetch_add(1, Ordering::Relaxed);
        let mut instance = Self {
            serial,
            environment,
            lifecycle: Lifecycle::Inert,
        };

        let Some(container) = container else {
            warn!(instance = serial, "chart container not found; chart stays inert");
            return instance;
        };
        if let Err(err) = options.validate() {
            warn!(instance = serial, error = %err, "invalid chart options; chart stays inert");
            return instance;
        }

        let vertex_count = categories.len();
        if vertex_count < MIN_VERTEX_COUNT {
            debug!(
                instance = serial,
                vertex_count, "fewer than three categories; rendering will be skipped"
            );
        }

        let mut series: SmallVec<[Series; 2]> = (0..options.series_count())
            .map(|index| {
                let name = if index == 0 { "primary" } else { "comparison" };
                Series::zeroed(name, vertex_count, options.series_style(index))
            })
            .collect();
        match initial_data {
            Some(values) if values.len() != vertex_count => warn!(
                instance = serial,
                expected = vertex_count,
                actual = values.len(),
                "initial data length mismatch; starting from zeros"
            ),
            Some(values) if !values.iter().all(|value| value.is_finite()) => warn!(
                instance = serial,
                "initial data holds non-finite values; starting from zeros"
            ),
            Some(values) => series[0].values = values,
            None => {}
        }

        let displayed = series.iter().map(|series| series.values.clone()).collect();
        debug!(
            instance = serial,
            container = container.id(),
            vertex_count,
            series = series.len(),
            "create chart instance"
        );
        instance.lifecycle = Lifecycle::Live(Box::new(LiveChart {
            container,
            categories,
            options,
            series,
            displayed,
            animation: AnimationController::new(serial),
            hover: HoverState::default(),
            listeners: ListenerSet::default(),
            scene: None,
            render_count: 0,
        }));
        instance.redraw();
        instance
    }

    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Live(_))
    }

    #[must_use]
    pub fn is_inert(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Inert)
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Destroyed)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.live()
            .map(|live| live.categories.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.categories().len()
    }

    #[must_use]
    pub fn options(&self) -> Option<&ChartOptions> {
        self.live().map(|live| &live.options)
    }

    #[must_use]
    pub fn container(&self) -> Option<&Container> {
        self.live().map(|live| &live.container)
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        self.live()
            .map(|live| live.series.as_slice())
            .unwrap_or_default()
    }

    /// Committed values of the primary series.
    #[must_use]
    pub fn committed_data(&self) -> &[f64] {
        self.series()
            .first()
            .map(|series| series.values.as_slice())
            .unwrap_or_default()
    }

    /// Values currently drawn for the primary series (mid-animation included).
    #[must_use]
    pub fn displayed_data(&self) -> &[f64] {
        self.displayed_series(0)
    }

    #[must_use]
    pub fn displayed_series(&self, index: usize) -> &[f64] {
        self.live()
            .and_then(|live| live.displayed.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Last built scene; `None` when inert, destroyed or degenerate.
    #[must_use]
    pub fn scene(&self) -> Option<&RadarScene> {
        self.live().and_then(|live| live.scene.as_ref())
    }

    /// Number of redraw passes since construction.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.live().map_or(0, |live| live.render_count)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.live().is_some_and(|live| live.animation.is_active())
    }

    /// Handle the host should deliver the next display frame to.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.live().and_then(|live| live.animation.pending_frame())
    }

    #[must_use]
    pub fn stats(&self) -> ChartStats {
        ChartStats::from_values(self.committed_data())
    }

    /// Replaces the primary series; animates when enabled.
    pub fn update_data(&mut self, values: &[f64]) -> ChartResult<()> {
        self.update_series_inner(0, values, None)
    }

    /// Like [`Self::update_data`] but anchors the animation clock at `now_ms`.
    pub fn update_data_at(&mut self, values: &[f64], now_ms: f64) -> ChartResult<()> {
        self.update_series_inner(0, values, Some(now_ms))
    }

    pub fn update_series(&mut self, index: usize, values: &[f64]) -> ChartResult<()> {
        self.update_series_inner(index, values, None)
    }

    fn update_series_inner(
        &mut self,
        index: usize,
        values: &[f64],
        started_at_ms: Option<f64>,
    ) -> ChartResult<()> {
        let serial = self.serial;
        let live = self.live_mut()?;
        if index >= live.series.len() {
            warn!(instance = serial, series = index, "update for unknown series rejected");
            return Err(ChartError::InvalidData(format!(
                "series index {index} out of range (chart has {})",
                live.series.len()
            )));
        }
        let expected = live.categories.len();
        if values.len() != expected {
            warn!(
                instance = serial,
                expected,
                actual = values.len(),
                "update data length mismatch; keeping committed data"
            );
            return Err(ChartError::DataLength {
                expected,
                actual: values.len(),
            });
        }
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            warn!(
                instance = serial,
                series = index,
                position, "non-finite update value rejected; keeping committed data"
            );
            return Err(ChartError::InvalidData(format!(
                "value at position {position} must be finite"
            )));
        }

        live.animation.cancel();
        live.series[index].values = values.to_vec();
        let target: Vec<Vec<f64>> = live.series.iter().map(|s| s.values.clone()).collect();
        debug!(instance = serial, series = index, "commit chart data");
        live.emit(serial, ChartEvent::DataCommitted { series: index });

        if !live.options.animation.enabled {
            live.displayed = target;
            self.redraw();
            return Ok(());
        }

        let start = live.displayed.clone();
        let handle = live
            .animation
            .start(start, target, live.options.animation, started_at_ms);
        trace!(
            instance = serial,
            generation = handle.generation,
            "schedule animation frames"
        );
        live.emit(serial, ChartEvent::AnimationStarted);
        Ok(())
    }

    /// Delivers one display frame.
    ///
    /// Returns `false` when `handle` is stale (superseded, cancelled, or aimed
    /// at another instance) or the chart is not live; nothing changes then.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> bool {
        if handle.instance != self.serial {
            return false;
        }
        let serial = self.serial;
        let Lifecycle::Live(live) = &mut self.lifecycle else {
            return false;
        };
        let finished = match live.animation.tick(handle, now_ms) {
            None => return false,
            Some(FrameOutcome::InProgress { displayed, .. }) => {
                live.displayed = displayed;
                false
            }
            Some(FrameOutcome::Finished { displayed }) => {
                live.displayed = displayed;
                true
            }
        };
        self.redraw();
        if finished {
            debug!(instance = serial, "animation finished");
            if let Lifecycle::Live(live) = &mut self.lifecycle {
                live.emit(serial, ChartEvent::AnimationFinished);
            }
        }
        true
    }

    /// Rebuilds the scene at a new nominal size.
    ///
    /// A running animation is cancelled and the committed data shown directly;
    /// hover state and this chart's tooltip are dropped.
    pub fn resize(&mut self, new_size: f64) -> ChartResult<()> {
        let serial = self.serial;
        if !new_size.is_finite() || new_size <= 0.0 {
            warn!(instance = serial, new_size, "ignoring invalid resize");
            return Err(ChartError::InvalidData(
                "chart size must be finite and > 0".to_owned(),
            ));
        }
        let tooltip = self.environment.tooltip.clone();
        let live = self.live_mut()?;
        if let Some(target) = live.animation.cancel() {
            live.displayed = target;
        }
        live.options.size = new_size;
        live.hover.reset();
        if tooltip.borrow_mut().clear_owned_by(serial).is_some() {
            live.emit(serial, ChartEvent::TooltipHidden);
        }
        debug!(instance = serial, new_size, "resize chart");
        self.redraw();
        if let Lifecycle::Live(live) = &mut self.lifecycle {
            live.emit(serial, ChartEvent::Resized { size: new_size });
        }
        Ok(())
    }

    /// Updates the on-screen box used to place tooltips.
    pub fn set_container_bounds(&mut self, bounds: BoundingBox) {
        if let Lifecycle::Live(live) = &mut self.lifecycle {
            live.container.set_bounds(bounds);
        }
    }

    /// Tooltip currently shown by this instance.
    #[must_use]
    pub fn tooltip(&self) -> Option<Tooltip> {
        self.environment.tooltip.borrow().owned_by(self.serial).cloned()
    }

    #[must_use]
    pub fn hovered_marker(&self) -> Option<usize> {
        self.live().and_then(|live| live.hover.hovered_marker())
    }

    /// Pointer entered the marker of category `index`.
    ///
    /// Enlarges the marker and shows its tooltip, replacing any tooltip other
    /// charts of the same environment were showing.
    pub fn pointer_enter(&mut self, index: usize) {
        let serial = self.serial;
        let slot = self.environment.tooltip.clone();
        let translator = self.environment.translator.clone();
        let Lifecycle::Live(live) = &mut self.lifecycle else {
            return;
        };
        if !live.options.hover_enabled() || index >= live.categories.len() {
            return;
        }
        let Some(marker) = live
            .scene
            .as_ref()
            .and_then(|scene| scene.markers().get(index))
            .map(|marker| marker.center())
        else {
            return;
        };
        if !live.hover.enter(index) {
            return;
        }

        let label = resolve_label(translator.as_deref(), &live.categories[index]);
        let value = live.displayed.first().map_or(0.0, |values| values[index]);
        let tooltip = Tooltip::new(
            serial,
            index,
            label,
            value,
            marker,
            live.options.size,
            live.container.bounds(),
        );
        if let Some(previous) = slot.borrow_mut().show(tooltip) {
            trace!(
                instance = serial,
                previous_owner = previous.owner,
                "replace visible tooltip"
            );
        }
        live.emit(serial, ChartEvent::MarkerEntered { index });
        live.emit(serial, ChartEvent::TooltipShown { index });
        self.redraw();
    }

    /// Pointer left the marker of category `index`.
    pub fn pointer_leave(&mut self, index: usize) {
        let serial = self.serial;
        let slot = self.environment.tooltip.clone();
        let Lifecycle::Live(live) = &mut self.lifecycle else {
            return;
        };
        if !live.hover.leave(index) {
            return;
        }
        live.emit(serial, ChartEvent::MarkerLeft { index });
        if slot.borrow_mut().clear_owned_by(serial).is_some() {
            live.emit(serial, ChartEvent::TooltipHidden);
        }
        self.redraw();
    }

    /// Pointer moved to `(x, y)` in scene coordinates; dispatches enter/leave.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(live) = self.live() else {
            return;
        };
        let current = live.hover.hovered_marker();
        let hit = live
            .scene
            .as_ref()
            .and_then(|scene| scene.hit_test_marker(x, y));
        if hit == current {
            return;
        }
        if let Some(current) = current {
            self.pointer_leave(current);
        }
        if let Some(hit) = hit {
            self.pointer_enter(hit);
        }
    }

    pub fn register_listener(&mut self, listener: Box<dyn ChartListener>) -> ChartResult<()> {
        self.live_mut()?.listeners.register(listener)
    }

    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        match &mut self.lifecycle {
            Lifecycle::Live(live) => live.listeners.unregister(listener_id),
            _ => false,
        }
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.live().is_some_and(|live| live.listeners.contains(listener_id))
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.live().map_or(0, |live| live.listeners.len())
    }

    /// Tears the chart down: cancels the animation, drops listeners, scene and
    /// container, and removes its tooltip. Idempotent.
    pub fn destroy(&mut self) {
        let previous = std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed);
        if let Lifecycle::Live(mut live) = previous {
            live.animation.cancel();
            live.listeners.clear();
            live.scene = None;
            debug!(
                instance = self.serial,
                container = live.container.id(),
                "destroy chart instance"
            );
        }
        self.environment.tooltip.borrow_mut().clear_owned_by(self.serial);
    }

    fn live(&self) -> Option<&LiveChart> {
        match &self.lifecycle {
            Lifecycle::Live(live) => Some(&**live),
            _ => None,
        }
    }

    fn live_mut(&mut self) -> ChartResult<&mut LiveChart> {
        match &mut self.lifecycle {
            Lifecycle::Live(live) => Ok(&mut **live),
            _ => Err(ChartError::Inert),
        }
    }

    fn redraw(&mut self) {
        let serial = self.serial;
        let translator = self.environment.translator.clone();
        let Lifecycle::Live(live) = &mut self.lifecycle else {
            return;
        };

        let built = build_scene(&SceneInput {
            options: &live.options,
            categories: &live.categories,
            series: &live.displayed,
            hovered_marker: live.hover.hovered_marker(),
            translator: translator.as_deref(),
        });
        live.scene = match built {
            Ok(scene) => Some(scene),
            Err(ChartError::DegenerateGeometry { vertex_count }) => {
                trace!(instance = serial, vertex_count, "skip degenerate render");
                None
            }
            Err(err) => {
                warn!(instance = serial, error = %err, "scene build failed; keeping last scene");
                return;
            }
        };

        let Some(scene) = live.scene.as_ref() else {
            return;
        };
        if let Err(err) = live.container.present(scene) {
            warn!(instance = serial, error = %err, "presenting scene failed");
        }
        live.render_count += 1;
        live.emit(serial, ChartEvent::Rendered);
    }
}

impl LiveChart {
    fn emit(&mut self, serial: u64, event: ChartEvent) {
        let context = ChartEventContext {
            instance: serial,
            size: self.options.size,
            vertex_count: self.categories.len(),
            animating: self.animation.is_active(),
            hovered_marker: self.hover.hovered_marker(),
        };
        self.listeners.emit(event, context);
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}
