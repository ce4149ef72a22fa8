//! Gesture transitions - FSM transition logic
//!
//! Implements the drag/resize state machine on top of an injected
//! geometry store.

use std::sync::Arc;

use super::capture::{CaptureGuard, NoopCapture, PointerCapture};
use super::events::{PointerEvent, PressTarget};
use super::geometry::{Point, Size, Viewport, WidgetGeometry, MINIMIZED_HEIGHT};
use super::states::GestureState;
use super::store::GeometryStore;

/// Result of feeding one pointer event to the controller.
#[derive(Debug, Clone)]
pub struct GestureTransition {
    /// The gesture state before the event.
    pub from: GestureState,
    /// The gesture state after the event.
    pub to: GestureState,
    /// The event that was handled.
    pub event: PointerEvent,
    /// New geometry, if the event moved or resized the widget.
    pub geometry: Option<WidgetGeometry>,
}

impl GestureTransition {
    pub fn changed(&self) -> bool {
        self.from != self.to || self.geometry.is_some()
    }
}

/// Owns the gesture state; reads and writes geometry through `S`.
pub struct GeometryController<S: GeometryStore> {
    store: S,
    viewport: Viewport,
    state: GestureState,
    capture_host: Arc<dyn PointerCapture>,
    capture: Option<CaptureGuard>,
    minimized: bool,
}

impl<S: GeometryStore> GeometryController<S> {
    pub fn new(store: S, viewport: Viewport) -> Self {
        Self {
            store,
            viewport,
            state: GestureState::Idle,
            capture_host: Arc::new(NoopCapture),
            capture: None,
            minimized: false,
        }
    }

    /// Use `host` to install global listeners during gestures.
    pub fn with_capture(mut self, host: Arc<dyn PointerCapture>) -> Self {
        self.capture_host = host;
        self
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current geometry; the initial placement until something is stored.
    pub fn geometry(&self) -> WidgetGeometry {
        self.store
            .load()
            .unwrap_or_else(|| WidgetGeometry::initial(self.viewport))
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Flip the minimized flag. Stored size is untouched.
    pub fn toggle_minimize(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    /// Size to draw, honoring the minimized header-only height.
    pub fn rendered_size(&self) -> Size {
        let size = self.geometry().size;
        if self.minimized {
            Size::new(size.width, MINIMIZED_HEIGHT)
        } else {
            size
        }
    }

    /// Handle a pointer event and transition to a new state.
    pub fn handle_event(&mut self, event: PointerEvent) -> GestureTransition {
        let from = self.state;
        let geometry = self.apply(&event);
        GestureTransition {
            from,
            to: self.state,
            event,
            geometry,
        }
    }

    fn apply(&mut self, event: &PointerEvent) -> Option<WidgetGeometry> {
        use GestureState::*;
        use PointerEvent::*;

        match (self.state, *event) {
            (_, DoubleClick {
                target: PressTarget::DragHandle,
            }) => Some(self.reset()),

            (Idle, Press {
                target: PressTarget::DragHandle,
                at,
            }) => {
                let origin = self.geometry().position;
                self.begin(Dragging {
                    offset: Point::new(at.x - origin.x, at.y - origin.y),
                });
                None
            }

            (Idle, Press {
                target: PressTarget::ResizeHandle,
                at,
            }) if !self.minimized => {
                let start_size = self.geometry().size;
                self.begin(Resizing {
                    origin: at,
                    start_size,
                });
                None
            }

            (Dragging { offset }, Move { at }) => {
                let current = self.geometry();
                let target = Point::new(at.x - offset.x, at.y - offset.y);
                self.commit(current, current.moved_to(target, self.viewport))
            }

            (Resizing { origin, start_size }, Move { at }) => {
                let current = self.geometry();
                let delta = Point::new(at.x - origin.x, at.y - origin.y);
                self.commit(current, current.resized(start_size, delta, self.viewport))
            }

            (Dragging { .. } | Resizing { .. }, Release) => {
                self.end();
                None
            }

            (Dragging { .. } | Resizing { .. }, Press { target, .. }) => {
                tracing::warn!(?target, state = ?self.state, "Press during active gesture ignored");
                None
            }

            _ => None,
        }
    }

    fn begin(&mut self, state: GestureState) {
        self.capture = Some(CaptureGuard::acquire(self.capture_host.clone()));
        self.state = state;
        tracing::debug!(state = ?self.state, "Gesture started");
    }

    fn end(&mut self) {
        self.capture = None;
        self.state = GestureState::Idle;
        tracing::debug!("Gesture ended");
    }

    fn commit(&mut self, current: WidgetGeometry, next: WidgetGeometry) -> Option<WidgetGeometry> {
        if next == current {
            return None;
        }
        self.store.store(next);
        Some(next)
    }

    /// Restore the default placement from any state.
    pub fn reset(&mut self) -> WidgetGeometry {
        self.end();
        let geometry = WidgetGeometry::reset(self.viewport);
        self.store.store(geometry);
        geometry
    }

    /// Track a viewport change. The widget is moved back inside first and
    /// only shrunk when moving is not enough.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Option<WidgetGeometry> {
        self.viewport = viewport;
        let current = self.store.load()?;
        let next = current.moved_to(current.position, viewport).fitted(viewport);
        self.commit(current, next)
    }
}
