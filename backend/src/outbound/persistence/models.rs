//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to domain values and report malformed rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Age, Message, MessageContent, PasswordHash, Role, User, UserAccount, UserId, Username,
};

use super::schema::{messages, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub age: i32,
    pub role: String,
}

/// Insertable struct for new accounts. `created_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub age: i32,
    pub role: &'a str,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = account.user();
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: account.password_hash().as_str(),
            age: i32::from(user.age().years()),
            role: user.role().as_str(),
        }
    }
}

impl UserRow {
    /// Convert into a domain user, dropping the hash.
    pub fn into_user(self) -> Result<User, String> {
        self.into_account().map(UserAccount::into_user)
    }

    /// Convert into a domain account.
    pub fn into_account(self) -> Result<UserAccount, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored username {:?} is invalid: {err}", self.username))?;
        let age = u16::try_from(self.age)
            .map_err(|_| format!("stored age {} is out of range", self.age))
            .and_then(|years| Age::new(years).map_err(|err| err.to_string()))?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| format!("stored role {:?} is invalid: {err}", self.role))?;
        let user = User::new(UserId::from_uuid(self.id), username, age, role);
        Ok(UserAccount::new(user, PasswordHash::new(self.password_hash)))
    }
}

/// Row struct for reading from the messages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Insertable struct for appending to the chat log.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow<'a> {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: &'a str,
    pub sent_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = String;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let content = MessageContent::new(row.content)
            .map_err(|err| format!("stored message {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: row.id,
            sender_id: UserId::from_uuid(row.sender_id),
            receiver_id: UserId::from_uuid(row.receiver_id),
            content,
            sent_at: row.sent_at,
        })
    }
}
