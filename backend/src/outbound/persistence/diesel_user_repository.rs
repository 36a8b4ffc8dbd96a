//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DoctorSearch, Role, User, UserAccount, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, escape_like};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            UserPersistenceError::query(format!("unique constraint violated: {constraint:?}"))
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn corrupt_row(message: String) -> UserPersistenceError {
    UserPersistenceError::query(message)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow::from(account);
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match classify_diesel_error(error, "insert user") {
                DieselFailure::UniqueViolation(_) => {
                    UserPersistenceError::duplicate_username(row.username)
                }
                DieselFailure::Connection(message) => UserPersistenceError::connection(message),
                DieselFailure::Query(message) => UserPersistenceError::query(message),
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find user by id"))?;
        row.map(UserRow::into_user).transpose().map_err(corrupt_row)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find user by username"))?;
        row.map(UserRow::into_account)
            .transpose()
            .map_err(corrupt_row)
    }

    async fn list_doctors(&self, search: &DoctorSearch) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = users::table
            .filter(users::role.eq(Role::Doctor.as_str()))
            .select(UserRow::as_select())
            .order(users::username.asc())
            .into_boxed();
        if let Some(needle) = search.needle() {
            query = query.filter(users::username.ilike(format!("%{}%", escape_like(needle))));
        }
        let rows = query
            .load::<UserRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list doctors"))?;
        debug!(count = rows.len(), "loaded doctors");
        rows.into_iter()
            .map(UserRow::into_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt_row)
    }
}
