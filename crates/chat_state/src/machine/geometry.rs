//! Geometry - position/size types and clamping math

use serde::{Deserialize, Serialize};

/// Smallest size a resize may produce.
pub const MIN_SIZE: Size = Size {
    width: 300.0,
    height: 200.0,
};

/// Height of the widget while minimized (header only).
pub const MINIMIZED_HEIGHT: f64 = 60.0;

const DEFAULT_SIZE: Size = Size {
    width: 400.0,
    height: 500.0,
};
const RESET_POSITION: Point = Point { x: 20.0, y: 20.0 };
const EDGE_MARGIN: f64 = 20.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visible area the widget must stay inside.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WidgetGeometry {
    pub position: Point,
    pub size: Size,
}

impl WidgetGeometry {
    /// Initial placement: top-right corner with a margin.
    pub fn initial(viewport: Viewport) -> Self {
        Self {
            position: Point::new(
                EDGE_MARGIN.max(viewport.width - DEFAULT_SIZE.width - EDGE_MARGIN),
                EDGE_MARGIN,
            ),
            size: DEFAULT_SIZE,
        }
        .fitted(viewport)
    }

    /// Placement after an explicit reset gesture.
    pub fn reset(viewport: Viewport) -> Self {
        Self {
            position: RESET_POSITION,
            size: DEFAULT_SIZE,
        }
        .fitted(viewport)
    }

    /// Shrink to the room left of and below the current position, never
    /// under [`MIN_SIZE`], then pull the position back inside.
    pub fn fitted(&self, viewport: Viewport) -> Self {
        let size = Size::new(
            self.size
                .width
                .min(viewport.width - self.position.x)
                .max(MIN_SIZE.width),
            self.size
                .height
                .min(viewport.height - self.position.y)
                .max(MIN_SIZE.height),
        );
        Self {
            position: self.position,
            size,
        }
        .moved_to(self.position, viewport)
    }

    /// Move to `target`, keeping the whole widget inside the viewport.
    pub fn moved_to(&self, target: Point, viewport: Viewport) -> Self {
        Self {
            position: Point::new(
                clamp_axis(target.x, viewport.width - self.size.width),
                clamp_axis(target.y, viewport.height - self.size.height),
            ),
            size: self.size,
        }
    }

    /// Resize to `start + delta`, floored at [`MIN_SIZE`] and then capped so
    /// the far edges stay inside the viewport.
    pub fn resized(&self, start: Size, delta: Point, viewport: Viewport) -> Self {
        let width = (start.width + delta.x).max(MIN_SIZE.width);
        let height = (start.height + delta.y).max(MIN_SIZE.height);
        Self {
            position: self.position,
            size: Size::new(
                width.min(viewport.width - self.position.x),
                height.min(viewport.height - self.position.y),
            ),
        }
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }
}

// `f64::clamp` panics when max < 0, which happens when the widget is wider
// than the viewport. The left/top edge wins in that case.
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
