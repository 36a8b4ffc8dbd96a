//! Message log use-cases: send, read a thread, list a doctor's inbox.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::doctor_directory::map_user_persistence_error;
use crate::domain::ports::{
    MessagePersistenceError, MessageRepository, MessagingCommand, MessagingQuery, UserRepository,
};
use crate::domain::{Error, Message, MessageContent, NewMessage, User, UserId, sort_thread};

/// Messaging service implementing the command and query ports.
#[derive(Clone)]
pub struct MessagingService<M, U> {
    messages: Arc<M>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<M, U> MessagingService<M, U> {
    /// Create a service. `clock` stamps every appended message.
    pub fn new(messages: Arc<M>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            messages,
            users,
            clock,
        }
    }
}

fn map_message_error(error: MessagePersistenceError) -> Error {
    match error {
        MessagePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("message repository unavailable: {message}"))
        }
        MessagePersistenceError::Query { message } => {
            Error::internal(format!("message repository error: {message}"))
        }
    }
}

#[async_trait]
impl<M, U> MessagingCommand for MessagingService<M, U>
where
    M: MessageRepository,
    U: Send + Sync,
{
    async fn send(
        &self,
        sender: &UserId,
        receiver: &UserId,
        content: &str,
    ) -> Result<Message, Error> {
        let content = MessageContent::new(content).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "messageContent", "code": "empty_content" }))
        })?;
        let message = NewMessage {
            sender_id: *sender,
            receiver_id: *receiver,
            content,
            sent_at: self.clock.utc(),
        };
        self.messages
            .insert(&message)
            .await
            .map_err(map_message_error)
    }
}

#[async_trait]
impl<M, U> MessagingQuery for MessagingService<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    async fn thread(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, Error> {
        let mut thread = self
            .messages
            .list_between(a, b)
            .await
            .map_err(map_message_error)?;
        sort_thread(&mut thread);
        Ok(thread)
    }

    async fn inbox(&self, doctor: &UserId) -> Result<Vec<User>, Error> {
        let senders = self
            .messages
            .distinct_senders_to(doctor)
            .await
            .map_err(map_message_error)?;

        let mut patients = Vec::with_capacity(senders.len());
        for sender in senders {
            match self
                .users
                .find_by_id(&sender)
                .await
                .map_err(map_user_persistence_error)?
            {
                Some(user) => patients.push(user),
                None => debug!(sender_id = %sender, "skipping inbox sender without an account"),
            }
        }
        Ok(patients)
    }
}
