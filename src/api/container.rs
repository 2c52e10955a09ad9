use std::fmt;

use crate::core::BoundingBox;
use crate::error::ChartResult;
use crate::render::{RadarScene, Renderer};

/// Host surface a chart draws into.
///
/// A container is moved into exactly one chart instance, which drops it (and
/// its presenting renderer) on destruction.
pub struct Container {
    id: String,
    bounds: BoundingBox,
    presenter: Option<Box<dyn Renderer>>,
}

impl Container {
    #[must_use]
    pub fn new(id: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            id: id.into(),
            bounds,
            presenter: None,
        }
    }

    /// Attaches the backend every redraw is pushed to.
    #[must_use]
    pub fn with_presenter(mut self, presenter: Box<dyn Renderer>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    #[must_use]
    pub fn has_presenter(&self) -> bool {
        self.presenter.is_some()
    }

    pub(crate) fn present(&mut self, scene: &RadarScene) -> ChartResult<()> {
        match self.presenter.as_mut() {
            Some(presenter) => presenter.render(scene),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("has_presenter", &self.presenter.is_some())
            .finish()
    }
}
