//! Pointer events that drive gesture transitions

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Region of the widget a press landed on.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PressTarget {
    /// The header, outside the control buttons.
    DragHandle,
    /// Clear/minimize/close buttons inside the header.
    Controls,
    /// Bottom-right resize grip.
    ResizeHandle,
    /// Anywhere else inside the widget.
    Body,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Press { target: PressTarget, at: Point },
    Move { at: Point },
    /// Release anywhere on the page, not only inside the widget.
    Release,
    DoubleClick { target: PressTarget },
}
