use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::animation::FrameHandle;
use crate::core::Category;
use crate::interaction::Tooltip;

use super::labels::LabelTranslator;
use super::{ChartEnvironment, ChartInstance, ChartOptions, Container};

/// Owns the live chart of every identifier.
///
/// Replaces the ad hoc global chart manager: the composing component builds
/// one registry, hands it a translator if it has one, and drops it on
/// teardown. All charts of a registry share one tooltip slot.
#[derive(Default)]
pub struct ChartRegistry {
    environment: ChartEnvironment,
    charts: IndexMap<String, ChartInstance>,
}

impl ChartRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_translator(translator: Rc<dyn LabelTranslator>) -> Self {
        Self {
            environment: ChartEnvironment::new().with_translator(translator),
            charts: IndexMap::new(),
        }
    }

    /// Builds a chart under `id`, destroying any chart already registered
    /// there first.
    pub fn create_chart(
        &mut self,
        id: impl Into<String>,
        container: Option<Container>,
        categories: Vec<Category>,
        initial_data: Option<Vec<f64>>,
        options: ChartOptions,
    ) -> &mut ChartInstance {
        let id = id.into();
        if let Some(mut previous) = self.charts.shift_remove(&id) {
            debug!(chart = %id, instance = previous.serial(), "replace existing chart");
            previous.destroy();
        }

        let instance = ChartInstance::new_in(
            self.environment.clone(),
            container,
            categories,
            initial_data,
            options,
        );
        debug!(chart = %id, instance = instance.serial(), inert = instance.is_inert(), "register chart");
        self.charts.entry(id).or_insert(instance)
    }

    /// Pushes new primary data; unknown ids are ignored.
    ///
    /// Returns `true` when the update was accepted.
    pub fn update_chart(&mut self, id: &str, data: &[f64]) -> bool {
        let Some(chart) = self.charts.get_mut(id) else {
            debug!(chart = id, "update for unknown chart ignored");
            return false;
        };
        match chart.update_data(data) {
            Ok(()) => true,
            Err(err) => {
                warn!(chart = id, error = %err, "chart update rejected");
                false
            }
        }
    }

    /// Returns `true` when a chart was registered under `id`.
    pub fn destroy_chart(&mut self, id: &str) -> bool {
        match self.charts.shift_remove(id) {
            Some(mut chart) => {
                chart.destroy();
                debug!(chart = id, "destroy chart");
                true
            }
            None => false,
        }
    }

    pub fn destroy_all(&mut self) {
        let count = self.charts.len();
        for (_, mut chart) in self.charts.drain(..) {
            chart.destroy();
        }
        self.environment.tooltip.borrow_mut().clear();
        debug!(count, "destroy all charts");
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ChartInstance> {
        self.charts.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChartInstance> {
        self.charts.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.charts.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Registered ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    /// The one tooltip visible among this registry's charts.
    #[must_use]
    pub fn active_tooltip(&self) -> Option<Tooltip> {
        self.environment.tooltip.borrow().active().cloned()
    }

    /// Frames the host should deliver on its next display tick.
    #[must_use]
    pub fn pending_frames(&self) -> Vec<(String, FrameHandle)> {
        self.charts
            .iter()
            .filter_map(|(id, chart)| chart.pending_frame().map(|handle| (id.clone(), handle)))
            .collect()
    }

    /// Delivers one frame to the chart under `id`.
    ///
    /// Stale handles (for a replaced or destroyed chart, or a superseded
    /// animation) are ignored and `false` is returned.
    pub fn on_frame(&mut self, id: &str, handle: FrameHandle, now_ms: f64) -> bool {
        self.charts
            .get_mut(id)
            .is_some_and(|chart| chart.on_frame(handle, now_ms))
    }

    /// Delivers a frame at `now_ms` to every animating chart; returns how many
    /// charts advanced.
    pub fn tick_all(&mut self, now_ms: f64) -> usize {
        let mut advanced = 0;
        for chart in self.charts.values_mut() {
            let Some(handle) = chart.pending_frame() else {
                continue;
            };
            if chart.on_frame(handle, now_ms) {
                advanced += 1;
            }
        }
        advanced
    }
}
