//! State machine module
//!
//! Contains the gesture FSM and the geometry it mutates.

mod capture;
mod events;
mod geometry;
mod states;
mod store;
mod transitions;

pub use capture::{CaptureGuard, NoopCapture, PointerCapture};
pub use events::{PointerEvent, PressTarget};
pub use geometry::{Point, Size, Viewport, WidgetGeometry, MINIMIZED_HEIGHT, MIN_SIZE};
pub use states::GestureState;
pub use store::{GeometryStore, SharedGeometry};
pub use transitions::{GeometryController, GestureTransition};
