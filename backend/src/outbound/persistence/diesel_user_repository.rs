//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! A thin adapter: translates between Diesel rows and domain types and maps
//! database failures to typed persistence errors. Uniqueness is left to the
//! database constraints; a rejected insert is reported with the violated
//! column so the caller can map it back to a request field.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{NewUser, UniqueColumn, UserPersistenceError, UserRepository};
use crate::domain::{User, UserCredentials, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

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

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Identify which unique constraint a rejected write violated.
///
/// PostgreSQL names the constraints after the column
/// (`users_username_key`, `users_email_key`), so matching on the constraint
/// name is sufficient.
fn violated_column(constraint_name: Option<&str>) -> Option<UniqueColumn> {
    let name = constraint_name?;
    if name.contains("username") {
        Some(UniqueColumn::Username)
    } else if name.contains("email") {
        Some(UniqueColumn::Email)
    } else {
        None
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
        if matches!(kind, DatabaseErrorKind::UniqueViolation) {
            return match violated_column(info.constraint_name()) {
                Some(column) => UserPersistenceError::unique_violation(column),
                None => UserPersistenceError::query("unique constraint violated"),
            };
        }
        if matches!(kind, DatabaseErrorKind::ClosedConnection) {
            return UserPersistenceError::connection("database connection error");
        }
        return UserPersistenceError::query("database error");
    }

    debug!(
        error_type = %std::any::type_name_of_val(&error),
        "diesel operation failed"
    );
    UserPersistenceError::query("database error")
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: &user.username,
            email: &user.email,
            password_hash: &user.password_hash,
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into_user())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_credentials))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_credentials))
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(*id.as_uuid()))
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::query("no user row to update"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the Diesel error mapping.
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    struct ConstraintInfo {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo { constraint }),
        )
    }

    #[rstest]
    #[case(Some("users_username_key"), UniqueColumn::Username)]
    #[case(Some("users_email_key"), UniqueColumn::Email)]
    fn unique_violation_maps_to_named_column(
        #[case] constraint: Option<&'static str>,
        #[case] expected: UniqueColumn,
    ) {
        let mapped = map_diesel_error(unique_violation(constraint));
        assert_eq!(
            mapped,
            UserPersistenceError::unique_violation(expected),
            "constraint {constraint:?} should map to {expected:?}"
        );
    }

    #[test]
    fn unnamed_unique_violation_degrades_to_query_error() {
        let mapped = map_diesel_error(unique_violation(None));
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
    }

    #[test]
    fn not_found_maps_to_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
    }

    #[test]
    fn pool_failures_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }
}
