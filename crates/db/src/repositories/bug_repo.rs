//! Repository for the `bugs` table.

use bugtrack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::bug::{Bug, BugFields};

/// Column list for `bugs` queries.
const COLUMNS: &str = "\
    id, title, description, status, priority, reporter, assignee, \
    steps_to_reproduce, environment, created_at, updated_at";

/// Provides CRUD operations for bugs.
pub struct BugRepo;

impl BugRepo {
    /// List every bug, newest first. Ties on `created_at` fall back to the
    /// higher id so the order is total.
    pub async fn list(pool: &PgPool) -> Result<Vec<Bug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bugs ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Bug>(&query).fetch_all(pool).await
    }

    /// Find a bug by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bug>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bugs WHERE id = $1");
        sqlx::query_as::<_, Bug>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new bug, returning the full row.
    pub async fn create(pool: &PgPool, input: &BugFields) -> Result<Bug, sqlx::Error> {
        let query = format!(
            "INSERT INTO bugs \
                (title, description, status, priority, reporter, \
                 assignee, steps_to_reproduce, environment) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bug>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.reporter)
            .bind(input.assignee.as_deref().unwrap_or_default())
            .bind(input.steps_to_reproduce.clone().unwrap_or_default())
            .bind(input.environment.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Replace a bug's fields. Optional fields absent from `input` keep their
    /// stored value. Returns `None` if no bug has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BugFields,
    ) -> Result<Option<Bug>, sqlx::Error> {
        let query = format!(
            "UPDATE bugs SET \
                title = $1, \
                description = $2, \
                status = $3, \
                priority = $4, \
                reporter = $5, \
                assignee = COALESCE($6, assignee), \
                steps_to_reproduce = COALESCE($7, steps_to_reproduce), \
                environment = COALESCE($8, environment) \
             WHERE id = $9 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bug>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.reporter)
            .bind(input.assignee.as_deref())
            .bind(input.steps_to_reproduce.as_deref())
            .bind(input.environment.as_ref().map(Json))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a bug. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bugs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
