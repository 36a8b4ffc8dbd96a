//! Chat messages exchanged between two accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors for message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageValidationError {
    /// Message body was empty.
    #[error("message content must not be empty")]
    EmptyContent,
}

/// Non-empty message body.
///
/// Whitespace is preserved verbatim; only the empty string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageContent(String);

impl MessageContent {
    /// Validate and wrap message text.
    pub fn new(content: impl Into<String>) -> Result<Self, MessageValidationError> {
        let content = content.into();
        if content.is_empty() {
            return Err(MessageValidationError::EmptyContent);
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = MessageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Message awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Sending account.
    pub sender_id: UserId,
    /// Receiving account.
    pub receiver_id: UserId,
    /// Message body.
    pub content: MessageContent,
    /// Server-assigned timestamp.
    pub sent_at: DateTime<Utc>,
}

/// Stored chat message. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Row identifier.
    pub id: Uuid,
    /// Sending account.
    #[schema(value_type = String)]
    pub sender_id: UserId,
    /// Receiving account.
    #[schema(value_type = String)]
    pub receiver_id: UserId,
    /// Message body.
    #[schema(value_type = String)]
    pub content: MessageContent,
    /// Server-assigned timestamp.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Whether the message belongs to the unordered pair `(a, b)`.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Sort a thread oldest first. The sort is stable, so messages sharing a
/// timestamp keep the order they were given in.
pub fn sort_thread(messages: &mut [Message]) {
    messages.sort_by_key(|message| message.sent_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn message(sender: UserId, receiver: UserId, secs: i64) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            content: MessageContent::new("hi").expect("content"),
            sent_at: Utc.timestamp_opt(secs, 0).single().expect("timestamp"),
        }
    }

    #[rstest]
    fn empty_content_is_rejected() {
        assert_eq!(
            MessageContent::new(""),
            Err(MessageValidationError::EmptyContent)
        );
    }

    #[rstest]
    fn whitespace_content_is_kept() {
        let content = MessageContent::new("  ").expect("whitespace is content");
        assert_eq!(content.as_ref(), "  ");
    }

    #[rstest]
    fn membership_is_direction_agnostic() {
        let (a, b, c) = (UserId::random(), UserId::random(), UserId::random());
        let msg = message(a, b, 0);
        assert!(msg.is_between(a, b));
        assert!(msg.is_between(b, a));
        assert!(!msg.is_between(a, c));
    }

    #[rstest]
    fn sort_thread_orders_by_timestamp_then_input_order() {
        let (a, b) = (UserId::random(), UserId::random());
        let mut thread = vec![
            message(a, b, 30),
            message(b, a, 10),
            message(a, b, 20),
            message(b, a, 10),
        ];
        let tied = [thread[1].id, thread[3].id];
        sort_thread(&mut thread);

        let stamps: Vec<i64> = thread.iter().map(|m| m.sent_at.timestamp()).collect();
        assert_eq!(stamps, vec![10, 10, 20, 30]);
        assert_eq!([thread[0].id, thread[1].id], tied);
    }
}
