//! Members queries

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{
    error::{AppError, AppResult},
    models::member::{Member, NewMember},
};

/// Members table queries
#[derive(Debug, Clone, Copy, Default)]
pub struct MembersRepository;

impl MembersRepository {
    /// All members, newest first
    pub async fn list(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, name, email, joined_date FROM members ORDER BY joined_date DESC, id DESC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(members)
    }

    pub async fn get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, name, email, joined_date FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(member)
    }

    /// Insert a member; a taken email is a conflict
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        member: &NewMember,
        joined_date: DateTime<Utc>,
    ) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, joined_date)
            VALUES (?, ?, ?)
            RETURNING id, name, email, joined_date
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(joined_date)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("email must be unique".to_string())
            }
            other => AppError::Database(other),
        })
    }

    /// Returns the number of rows removed
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
