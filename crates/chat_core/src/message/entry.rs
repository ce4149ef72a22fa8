//! Message - a single conversation entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered message identifier. Later messages always compare greater.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Who authored a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Delivery status of a message.
///
/// User messages start as `Pending` (optimistic append) and are reconciled
/// once the turn settles. Bot messages are always `Delivered`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Delivered,
    Failed,
}

/// A conversation entry. Text, sender and timestamp never change after creation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    status: MessageStatus,
}

impl Message {
    pub(crate) fn new(id: MessageId, text: String, sender: Sender, status: MessageStatus) -> Self {
        Self {
            id,
            text,
            sender,
            timestamp: Utc::now(),
            status,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Time label shown under the bubble, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub(crate) fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }
}
