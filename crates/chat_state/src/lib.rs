//! chat_state - State machine for the floating chat widget
//!
//! This crate tracks the widget's on-screen position and size and drives
//! the drag/resize gesture state machine.

pub mod machine;

// Re-export commonly used types
pub use machine::{
    CaptureGuard, GeometryController, GeometryStore, GestureState, GestureTransition,
    NoopCapture, Point, PointerCapture, PointerEvent, PressTarget, SharedGeometry, Size,
    Viewport, WidgetGeometry, MINIMIZED_HEIGHT, MIN_SIZE,
};
