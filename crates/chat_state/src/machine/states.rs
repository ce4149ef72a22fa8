//! Gesture states

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};

/// What the pointer is currently doing to the widget.
///
/// Dragging and resizing are mutually exclusive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,

    /// Moving the widget by its header.
    Dragging {
        /// Pointer position relative to the widget origin at press time.
        offset: Point,
    },

    /// Resizing from the bottom-right handle.
    Resizing {
        /// Pointer position at press time.
        origin: Point,
        /// Widget size at press time.
        start_size: Size,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether global move/release listeners must be held.
    pub fn captures_pointer(&self) -> bool {
        !self.is_idle()
    }

    /// Cursor hint for the drag handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::Idle => "grab",
            Self::Dragging { .. } => "grabbing",
            Self::Resizing { .. } => "nwse-resize",
        }
    }
}
