//! Repository for the `memberships` table.
//!
//! The partial unique index `uq_memberships_open_window` keeps at most one
//! open window per (user, mess); a second open enrolment fails with a unique
//! violation that the API maps to 409.

use chrono::NaiveDate;
use forge_core::types::{DbId, MessId, UserId};
use sqlx::PgPool;

use crate::models::membership::{CreateMembership, Membership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, mess_id, active_from, active_to, created_at, updated_at";

/// Provides membership registry operations.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Whether the user holds a membership window covering `date`.
    pub async fn is_active_member(
        pool: &PgPool,
        user_id: UserId,
        mess_id: MessId,
        date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM memberships
                WHERE user_id = $1 AND mess_id = $2
                  AND active_from <= $3
                  AND (active_to IS NULL OR active_to >= $3)
             )",
        )
        .bind(user_id)
        .bind(mess_id)
        .bind(date)
        .fetch_one(pool)
        .await
    }

    /// Insert a membership window, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMembership) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (user_id, mess_id, active_from, active_to)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(input.user_id)
            .bind(input.mess_id)
            .bind(input.active_from)
            .bind(input.active_to)
            .fetch_one(pool)
            .await
    }

    /// Find the open window for a (user, mess) pair.
    pub async fn find_open(
        pool: &PgPool,
        user_id: UserId,
        mess_id: MessId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships
             WHERE user_id = $1 AND mess_id = $2 AND active_to IS NULL"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(mess_id)
            .fetch_optional(pool)
            .await
    }

    /// Close an open window at `active_to`.
    ///
    /// Returns `None` if the row no longer exists or was already closed.
    pub async fn close(
        pool: &PgPool,
        id: DbId,
        active_to: NaiveDate,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "UPDATE memberships SET active_to = $2
             WHERE id = $1 AND active_to IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(id)
            .bind(active_to)
            .fetch_optional(pool)
            .await
    }

    /// List windows, optionally filtered by user and/or mess, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<UserId>,
        mess_id: Option<MessId>,
    ) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships
             WHERE ($1::uuid IS NULL OR user_id = $1)
               AND ($2::uuid IS NULL OR mess_id = $2)
             ORDER BY active_from DESC, id DESC"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(user_id)
            .bind(mess_id)
            .fetch_all(pool)
            .await
    }
}
