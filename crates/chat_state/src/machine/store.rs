//! Injectable geometry cell
//!
//! Geometry outlives any single controller (it survives close/reopen and
//! page navigation), so the controller reads and writes it through this
//! seam instead of owning it.

use std::sync::{Arc, RwLock};

use super::geometry::WidgetGeometry;

pub trait GeometryStore: Send + Sync {
    /// Stored geometry, or `None` before the first placement.
    fn load(&self) -> Option<WidgetGeometry>;

    fn store(&self, geometry: WidgetGeometry);
}

/// Cloneable in-memory cell. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct SharedGeometry {
    slot: Arc<RwLock<Option<WidgetGeometry>>>,
}

impl SharedGeometry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryStore for SharedGeometry {
    fn load(&self) -> Option<WidgetGeometry> {
        *self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store(&self, geometry: WidgetGeometry) {
        *self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(geometry);
    }
}

impl<S: GeometryStore + ?Sized> GeometryStore for Arc<S> {
    fn load(&self) -> Option<WidgetGeometry> {
        (**self).load()
    }

    fn store(&self, geometry: WidgetGeometry) {
        (**self).store(geometry)
    }
}
