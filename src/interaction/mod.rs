use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, Point};

/// Glyph repeated `floor(value)` times in tooltip content.
pub const TOOLTIP_GLYPH: char = '★';
/// Gap between the tooltip's bottom edge and the hovered marker, in pixels.
pub const TOOLTIP_GAP_PX: f64 = 10.0;

const TOOLTIP_FONT_SIZE_PX: f64 = 12.0;
const TOOLTIP_PADDING_X_PX: f64 = 8.0;
const TOOLTIP_PADDING_Y_PX: f64 = 6.0;
const TOOLTIP_LINE_HEIGHT: f64 = 1.4;
const TOOLTIP_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Where a tooltip box goes, in container-relative display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Content and position of the single visible tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Serial of the chart instance that shows it.
    pub owner: u64,
    pub category_index: usize,
    pub label: String,
    pub value: f64,
    pub glyphs: String,
    pub placement: TooltipPlacement,
}

impl Tooltip {
    #[must_use]
    pub fn new(
        owner: u64,
        category_index: usize,
        label: impl Into<String>,
        value: f64,
        marker: Point,
        nominal_size: f64,
        container: BoundingBox,
    ) -> Self {
        let label = label.into();
        let glyphs = glyph_run(value);
        let (width, height) = estimate_tooltip_size(&[&label, &format_value(value), &glyphs]);
        Self {
            owner,
            category_index,
            placement: place_tooltip(marker, nominal_size, container, width, height),
            label,
            value,
            glyphs,
        }
    }

    /// Text lines in display order.
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            self.label.clone(),
            format_value(self.value),
            self.glyphs.clone(),
        ]
    }
}

/// `floor(value)` copies of the tooltip glyph; none for negative values.
#[must_use]
pub fn glyph_run(value: f64) -> String {
    let count = if value.is_finite() && value > 0.0 {
        value.floor() as usize
    } else {
        0
    };
    std::iter::repeat_n(TOOLTIP_GLYPH, count).collect()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn estimate_tooltip_size(lines: &[&str]) -> (f64, f64) {
    let widest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let width = widest * TOOLTIP_FONT_SIZE_PX * TOOLTIP_CHAR_WIDTH_RATIO + 2.0 * TOOLTIP_PADDING_X_PX;
    let height = lines.len() as f64 * TOOLTIP_FONT_SIZE_PX * TOOLTIP_LINE_HEIGHT
        + 2.0 * TOOLTIP_PADDING_Y_PX;
    (width, height)
}

/// Places a `width` x `height` tooltip above a marker.
///
/// The marker's scene coordinates are scaled by the ratio between the
/// container's on-screen width and the chart's nominal size, then the box is
/// centered horizontally on the marker and lifted by its height plus a gap.
#[must_use]
pub fn place_tooltip(
    marker: Point,
    nominal_size: f64,
    container: BoundingBox,
    width: f64,
    height: f64,
) -> TooltipPlacement {
    let scale = if nominal_size > 0.0 && container.is_valid() {
        container.width / nominal_size
    } else {
        1.0
    };
    let x = marker.x * scale;
    let y = marker.y * scale;
    TooltipPlacement {
        left: x - width / 2.0,
        top: y - height - TOOLTIP_GAP_PX,
        width,
        height,
    }
}

/// Holder of the one visible tooltip shared by every chart of a registry.
#[derive(Debug, Default)]
pub struct TooltipSlot {
    active: Option<Tooltip>,
}

impl TooltipSlot {
    #[must_use]
    pub fn active(&self) -> Option<&Tooltip> {
        self.active.as_ref()
    }

    /// Replaces whatever is showing; returns the tooltip that was removed.
    pub fn show(&mut self, tooltip: Tooltip) -> Option<Tooltip> {
        self.active.replace(tooltip)
    }

    pub fn clear(&mut self) -> Option<Tooltip> {
        self.active.take()
    }

    /// Clears the tooltip only when `owner` shows it.
    pub fn clear_owned_by(&mut self, owner: u64) -> Option<Tooltip> {
        if self.active.as_ref().is_some_and(|tooltip| tooltip.owner == owner) {
            return self.active.take();
        }
        None
    }

    #[must_use]
    pub fn owned_by(&self, owner: u64) -> Option<&Tooltip> {
        self.active.as_ref().filter(|tooltip| tooltip.owner == owner)
    }
}

pub type SharedTooltipSlot = Rc<RefCell<TooltipSlot>>;

#[must_use]
pub fn shared_tooltip_slot() -> SharedTooltipSlot {
    Rc::new(RefCell::new(TooltipSlot::default()))
}

/// Per-instance pointer state over the marker layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverState {
    hovered_marker: Option<usize>,
}

impl HoverState {
    #[must_use]
    pub fn hovered_marker(self) -> Option<usize> {
        self.hovered_marker
    }

    /// Returns `false` when `marker` was already hovered.
    pub fn enter(&mut self, marker: usize) -> bool {
        if self.hovered_marker == Some(marker) {
            return false;
        }
        self.hovered_marker = Some(marker);
        true
    }

    /// Returns `true` when `marker` was the hovered one.
    pub fn leave(&mut self, marker: usize) -> bool {
        if self.hovered_marker != Some(marker) {
            return false;
        }
        self.hovered_marker = None;
        true
    }

    pub fn reset(&mut self) {
        self.hovered_marker = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverState, TooltipSlot, Tooltip, glyph_run, place_tooltip, TOOLTIP_GAP_PX};
    use crate::core::{BoundingBox, Point};
    use approx::assert_abs_diff_eq;

    #[test]
    fn glyph_run_floors_value() {
        assert_eq!(glyph_run(3.9).chars().count(), 3);
        assert_eq!(glyph_run(0.4), "");
        assert_eq!(glyph_run(-2.0), "");
    }

    #[test]
    fn placement_scales_with_container_width() {
        // Container displayed at half the nominal size.
        let placement = place_tooltip(
            Point::new(140.0, 40.0),
            280.0,
            BoundingBox::new(0.0, 0.0, 140.0, 140.0),
            60.0,
            30.0,
        );
        assert_abs_diff_eq!(placement.left, 70.0 - 30.0);
        assert_abs_diff_eq!(placement.top, 20.0 - 30.0 - TOOLTIP_GAP_PX);
    }

    #[test]
    fn slot_clears_only_for_its_owner() {
        let mut slot = TooltipSlot::default();
        let tooltip = Tooltip::new(
            7,
            0,
            "Safety",
            3.0,
            Point::new(10.0, 10.0),
            280.0,
            BoundingBox::square(280.0),
        );
        assert!(slot.show(tooltip).is_none());
        assert!(slot.clear_owned_by(8).is_none());
        assert!(slot.owned_by(7).is_some());
        assert!(slot.clear_owned_by(7).is_some());
        assert!(slot.active().is_none());
    }

    #[test]
    fn hover_enter_and_leave_track_one_marker() {
        let mut hover = HoverState::default();
        assert!(hover.enter(2));
        assert!(!hover.enter(2));
        assert!(!hover.leave(1));
        assert!(hover.leave(2));
        assert_eq!(hover.hovered_marker(), None);
    }
}
