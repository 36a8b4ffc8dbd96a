//! PostgreSQL-backed `MessageRepository`.
//!
//! Rows are never updated or deleted. Threads order by `(sent_at, id)`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MessagePersistenceError, MessageRepository};
use crate::domain::{Message, NewMessage, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{MessageRow, NewMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::messages;

/// Diesel implementation of the message log.
#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MessagePersistenceError {
    MessagePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> MessagePersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => MessagePersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            MessagePersistenceError::query(format!("unique constraint violated: {constraint:?}"))
        }
        DieselFailure::Query(message) => MessagePersistenceError::query(message),
    }
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn insert(&self, message: &NewMessage) -> Result<Message, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMessageRow {
            id: Uuid::new_v4(),
            sender_id: *message.sender_id.as_uuid(),
            receiver_id: *message.receiver_id.as_uuid(),
            content: message.content.as_ref(),
            sent_at: message.sent_at,
        };
        let stored = diesel::insert_into(messages::table)
            .values(&row)
            .returning(MessageRow::as_returning())
            .get_result::<MessageRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "insert message"))?;
        Message::try_from(stored).map_err(MessagePersistenceError::query)
    }

    async fn list_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<Message>, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (a, b) = (*a.as_uuid(), *b.as_uuid());
        let rows = messages::table
            .filter(
                messages::sender_id
                    .eq(a)
                    .and(messages::receiver_id.eq(b))
                    .or(messages::sender_id.eq(b).and(messages::receiver_id.eq(a))),
            )
            .order((messages::sent_at.asc(), messages::id.asc()))
            .select(MessageRow::as_select())
            .load::<MessageRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list thread"))?;
        rows.into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(MessagePersistenceError::query)
    }

    async fn distinct_senders_to(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<UserId>, MessagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let senders = messages::table
            .filter(messages::receiver_id.eq(*receiver.as_uuid()))
            .select(messages::sender_id)
            .distinct()
            .order(messages::sender_id.asc())
            .load::<Uuid>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list inbox senders"))?;
        Ok(senders.into_iter().map(UserId::from_uuid).collect())
    }
}
