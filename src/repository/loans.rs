//! Loans queries

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{
    error::{AppError, AppResult},
    models::loan::{ActiveLoan, Loan, NewLoan},
};

/// Loans table queries
#[derive(Debug, Clone, Copy, Default)]
pub struct LoansRepository;

impl LoansRepository {
    /// Get loan by ID
    pub async fn get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT id, member_id, book_id, loan_date, return_date FROM loans WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(loan)
    }

    /// Unreturned loans with member name and book title, newest first
    pub async fn list_active(&self, conn: &mut SqliteConnection) -> AppResult<Vec<ActiveLoan>> {
        let loans = sqlx::query_as::<_, ActiveLoan>(
            r#"
            SELECT l.id, l.member_id, l.book_id, l.loan_date, l.return_date,
                   m.name AS member_name, b.title AS book_title
            FROM loans l
            JOIN members m ON l.member_id = m.id
            JOIN books b ON l.book_id = b.id
            WHERE l.return_date IS NULL
            ORDER BY l.loan_date DESC, l.id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(loans)
    }

    /// Number of unreturned loans for a book
    #[cfg(test)]
    pub(crate) async fn count_active_for_book(&self, conn: &mut SqliteConnection, book_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count)
    }

    /// Insert an active loan
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        loan: &NewLoan,
        loan_date: DateTime<Utc>,
    ) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (member_id, book_id, loan_date, return_date)
            VALUES (?, ?, ?, NULL)
            RETURNING id, member_id, book_id, loan_date, return_date
            "#,
        )
        .bind(loan.member_id)
        .bind(loan.book_id)
        .bind(loan_date)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::NotFound("member or book not found".to_string())
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("book not available".to_string())
            }
            other => AppError::Database(other),
        })
    }

    /// Stamp the return date of an active loan.
    ///
    /// Returns the loan's book id, or `None` when the loan does not exist or
    /// was already returned.
    pub async fn mark_returned(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        return_date: DateTime<Utc>,
    ) -> AppResult<Option<i64>> {
        let book_id = sqlx::query_scalar::<_, i64>(
            "UPDATE loans SET return_date = ? WHERE id = ? AND return_date IS NULL RETURNING book_id",
        )
        .bind(return_date)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(book_id)
    }

    pub async fn delete_for_member(&self, conn: &mut SqliteConnection, member_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM loans WHERE member_id = ?")
            .bind(member_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_for_book(&self, conn: &mut SqliteConnection, book_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM loans WHERE book_id = ?")
            .bind(book_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
