//! Mutex-guarded message log.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{MessagePersistenceError, MessageRepository};
use crate::domain::{Message, NewMessage, UserId, sort_thread};

/// Append-only message log kept in memory, in insertion order.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Message>>, MessagePersistenceError> {
        self.messages
            .lock()
            .map_err(|_| MessagePersistenceError::query("message store lock poisoned"))
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: &NewMessage) -> Result<Message, MessagePersistenceError> {
        let stored = Message {
            id: Uuid::new_v4(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            sent_at: message.sent_at,
        };
        self.lock()?.push(stored.clone());
        Ok(stored)
    }

    async fn list_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<Message>, MessagePersistenceError> {
        let mut thread: Vec<Message> = self
            .lock()?
            .iter()
            .filter(|message| message.is_between(*a, *b))
            .cloned()
            .collect();
        sort_thread(&mut thread);
        Ok(thread)
    }

    async fn distinct_senders_to(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<UserId>, MessagePersistenceError> {
        let mut senders: Vec<UserId> = Vec::new();
        for message in self.lock()?.iter() {
            if message.receiver_id == *receiver && !senders.contains(&message.sender_id) {
                senders.push(message.sender_id);
            }
        }
        Ok(senders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageContent;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("fixture time")
    }

    fn new_message(from: UserId, to: UserId, text: &str, secs: i64) -> NewMessage {
        NewMessage {
            sender_id: from,
            receiver_id: to,
            content: MessageContent::new(text).expect("fixture content"),
            sent_at: at(secs),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn thread_is_symmetric_and_ordered() {
        let repo = InMemoryMessageRepository::new();
        let (a, b, c) = (UserId::random(), UserId::random(), UserId::random());
        repo.insert(&new_message(a, b, "second", 20)).await.expect("insert");
        repo.insert(&new_message(b, a, "first", 10)).await.expect("insert");
        repo.insert(&new_message(a, c, "elsewhere", 5)).await.expect("insert");
        repo.insert(&new_message(a, b, "tie", 20)).await.expect("insert");

        let ab = repo.list_between(&a, &b).await.expect("thread");
        let ba = repo.list_between(&b, &a).await.expect("thread");
        assert_eq!(ab, ba);
        let texts: Vec<&str> = ab.iter().map(|m| m.content.as_ref()).collect();
        assert_eq!(texts, ["first", "second", "tie"]);
    }

    #[rstest]
    #[tokio::test]
    async fn senders_are_distinct_in_first_contact_order() {
        let repo = InMemoryMessageRepository::new();
        let (doctor, p1, p2) = (UserId::random(), UserId::random(), UserId::random());
        repo.insert(&new_message(p2, doctor, "hi", 1)).await.expect("insert");
        repo.insert(&new_message(p1, doctor, "hi", 2)).await.expect("insert");
        repo.insert(&new_message(p2, doctor, "again", 3)).await.expect("insert");
        repo.insert(&new_message(doctor, p1, "reply", 4)).await.expect("insert");

        let senders = repo.distinct_senders_to(&doctor).await.expect("senders");
        assert_eq!(senders, vec![p2, p1]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_thread_is_empty() {
        let repo = InMemoryMessageRepository::new();
        let thread = repo
            .list_between(&UserId::random(), &UserId::random())
            .await
            .expect("thread");
        assert!(thread.is_empty());
    }
}
