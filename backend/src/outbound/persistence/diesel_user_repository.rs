//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each user is one row: `id` and `email` are columns, every other field
//! lives in the `document` JSONB object. Saves are a single
//! `INSERT ... ON CONFLICT (id) DO UPDATE`, so an overwrite is atomic per
//! document.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId, UserValidationError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// `INSERT .. ON CONFLICT (id) DO UPDATE .. RETURNING` for one user row.
macro_rules! upsert_user {
    ($row:expr) => {
        diesel::insert_into(users::table)
            .values($row)
            .on_conflict(users::id)
            .do_update()
            .set((
                users::email.eq(excluded(users::email)),
                users::document.eq(excluded(users::document)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .returning(UserRow::as_returning())
    };
}

/// `SELECT EXISTS (..)` over exact email matches.
macro_rules! email_exists {
    ($email:expr) => {
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq($email)),
        ))
    };
}

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a stored row back into a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        email,
        document,
    } = row;
    let Value::Object(attributes) = document else {
        return Err(UserPersistenceError::query(format!(
            "stored document for user {id} is not a JSON object"
        )));
    };

    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };
    let user_id = UserId::new(id.clone()).map_err(invalid)?;
    let user = User::from_email(email)
        .with_attributes(attributes)
        .map_err(invalid)?;
    Ok(user.with_id(user_id))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: User) -> Result<User, UserPersistenceError> {
        let id = user.id().cloned().unwrap_or_else(UserId::random);
        let document = Value::Object(user.attributes().clone());
        let row = NewUserRow {
            id: id.as_ref(),
            email: user.email().as_ref(),
            document: &document,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: UserRow = upsert_user!(&row)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.filter(users::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        email_exists!(email.as_ref())
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
