//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::Post;

use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostPersistenceError::connection("database connection error")
        }
        _ => PostPersistenceError::query("database error"),
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PostRow> = posts::table
            .order(posts::created_at.desc())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = posts::table
            .find(id)
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(PostRow::into_post))
    }

    async fn create(&self, title: String) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            id: Uuid::new_v4(),
            title: &title,
        };

        let inserted: PostRow = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into_post())
    }

    async fn update_title(
        &self,
        id: Uuid,
        title: String,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<PostRow> = diesel::update(posts::table.find(id))
            .set((posts::title.eq(&title), posts::updated_at.eq(diesel::dsl::now)))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(updated.map(PostRow::into_post))
    }

    async fn delete(&self, id: Uuid) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(posts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the Diesel error mapping.
    use diesel::result::Error as DieselError;

    use super::*;

    #[test]
    fn not_found_maps_to_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, PostPersistenceError::Query { .. }));
    }

    #[test]
    fn pool_failures_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::build("bad url"));
        assert_eq!(mapped, PostPersistenceError::connection("bad url"));
    }
}
