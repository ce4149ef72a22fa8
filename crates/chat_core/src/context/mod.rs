//! Context module
//!
//! The host-owned ticker binding and the welcome texts derived from it.

mod ticker;

pub use ticker::{clear_greeting, open_greeting, TickerContext};
