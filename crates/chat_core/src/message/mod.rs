//! Message module
//!
//! Conversation entries and the append-only history that holds them.

mod entry;
mod history;

pub use entry::{Message, MessageId, MessageStatus, Sender};
pub use history::MessageHistory;
