//! Geometry store that reports every write on the session event bus

use chat_state::{GeometryStore, WidgetGeometry};
use tokio::sync::broadcast;

use crate::events::SessionEvent;

pub struct EventedGeometryStore<S> {
    inner: S,
    events: broadcast::Sender<SessionEvent>,
}

impl<S: GeometryStore> EventedGeometryStore<S> {
    pub(crate) fn new(inner: S, events: broadcast::Sender<SessionEvent>) -> Self {
        Self { inner, events }
    }
}

impl<S: GeometryStore> GeometryStore for EventedGeometryStore<S> {
    fn load(&self) -> Option<WidgetGeometry> {
        self.inner.load()
    }

    fn store(&self, geometry: WidgetGeometry) {
        self.inner.store(geometry);
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::GeometryChanged { geometry });
    }
}
