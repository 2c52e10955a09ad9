use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Read-only state snapshot passed to listener hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEventContext {
    pub instance: u64,
    pub size: f64,
    pub vertex_count: usize,
    pub animating: bool,
    pub hovered_marker: Option<usize>,
}

/// Event stream exposed to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    DataCommitted { series: usize },
    AnimationStarted,
    AnimationFinished,
    Rendered,
    Resized { size: f64 },
    MarkerEntered { index: usize },
    MarkerLeft { index: usize },
    TooltipShown { index: usize },
    TooltipHidden,
}

/// Hook interface for hosts observing one chart instance.
///
/// Listeners are owned by the instance and dropped when it is destroyed.
pub trait ChartListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: ChartEventContext);
}

#[derive(Default)]
pub(crate) struct ListenerSet {
    listeners: Vec<Box<dyn ChartListener>>,
}

impl ListenerSet {
    pub(crate) fn register(&mut self, listener: Box<dyn ChartListener>) -> ChartResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(ChartError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.contains(&listener_id) {
            return Err(ChartError::InvalidData(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    pub(crate) fn unregister(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    pub(crate) fn contains(&self, listener_id: &str) -> bool {
        self.listeners.iter().any(|entry| entry.id() == listener_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn emit(&mut self, event: ChartEvent, context: ChartEventContext) {
        if self.listeners.is_empty() {
            return;
        }
        trace!(?event, listeners = self.listeners.len(), "emit chart event");
        for listener in &mut self.listeners {
            listener.on_event(event, context);
        }
    }
}
