//! # Session Manager
//!
//! Owns the widget's conversation: session identity, message history,
//! suggestions and the unrelated-topic lockout. Talks to the chat backend
//! through a `ChatApiClient` and reports every change as a typed event.

pub mod events;
pub mod geometry;
pub mod manager;
mod session;
pub mod view;

// Re-exports
pub use events::{SessionEvent, WidgetStatus};
pub use geometry::EventedGeometryStore;
pub use manager::{SessionManager, SkipReason, TurnOutcome};
pub use view::{SuggestionPanel, WidgetView};
