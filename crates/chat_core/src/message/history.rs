//! MessageHistory - append-only, oldest first

use super::entry::{Message, MessageId, MessageStatus, Sender};

/// Ordered conversation history.
///
/// Entries are only ever appended. `reset` is the single operation that
/// discards entries, and it always leaves exactly one welcome message.
#[derive(Clone, Debug, Default)]
pub struct MessageHistory {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageHistory {
    /// Create an empty history (nothing seeded yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history seeded with a single welcome message.
    pub fn with_welcome(text: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.push_bot(text);
        history
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_id += 1;
        MessageId::new(self.next_id)
    }

    /// Append a user message in the `Pending` state.
    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages
            .push(Message::new(id, text.into(), Sender::User, MessageStatus::Pending));
        id
    }

    /// Append a bot message.
    pub fn push_bot(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages
            .push(Message::new(id, text.into(), Sender::Bot, MessageStatus::Delivered));
        id
    }

    /// Settle a pending message. Returns false if the id is unknown or
    /// the message was already settled.
    pub fn settle(&mut self, id: MessageId, status: MessageStatus) -> bool {
        match self.messages.iter_mut().find(|m| m.id() == id) {
            Some(message) if message.is_pending() => {
                message.set_status(status);
                true
            }
            _ => false,
        }
    }

    /// Discard everything and seed a fresh welcome message.
    ///
    /// Ids keep increasing across resets.
    pub fn reset(&mut self, welcome: impl Into<String>) {
        self.messages.clear();
        self.push_bot(welcome);
    }

    /// True when the history holds nothing but (at most) a welcome message.
    pub fn is_pristine(&self) -> bool {
        self.messages.len() <= 1 && self.messages.iter().all(|m| m.sender() == Sender::Bot)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_ordered_across_reset() {
        let mut history = MessageHistory::with_welcome("hi");
        let first = history.push_user("question");
        history.reset("hi again");
        let after_reset = history.messages()[0].id();
        assert!(after_reset > first);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_user_messages_start_pending() {
        let mut history = MessageHistory::with_welcome("hi");
        let id = history.push_user("question");
        assert!(history.last().unwrap().is_pending());

        assert!(history.settle(id, MessageStatus::Delivered));
        assert_eq!(history.last().unwrap().status(), MessageStatus::Delivered);

        // Already settled
        assert!(!history.settle(id, MessageStatus::Failed));
    }

    #[test]
    fn test_pristine_detection() {
        let mut history = MessageHistory::new();
        assert!(history.is_pristine());
        history.push_bot("welcome");
        assert!(history.is_pristine());
        history.push_user("hello");
        assert!(!history.is_pristine());
    }
}
