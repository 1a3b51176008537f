//! Books queries

use sqlx::SqliteConnection;

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Books table queries
#[derive(Debug, Clone, Copy, Default)]
pub struct BooksRepository;

impl BooksRepository {
    /// All books, highest id first
    pub async fn list(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, available FROM books ORDER BY id DESC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(books)
    }

    pub async fn get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, available FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(book)
    }

    pub async fn insert(&self, conn: &mut SqliteConnection, book: &NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, available)
            VALUES (?, ?, 1)
            RETURNING id, title, author, available
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&mut *conn)
        .await?;

        Ok(book)
    }

    /// Flip an available book to on-loan.
    ///
    /// The guard and the write are one statement, so of two concurrent lends
    /// only the first sees a row affected. Returns false when the book is
    /// missing or already on loan.
    pub async fn claim(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE books SET available = 0 WHERE id = ? AND available = 1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Mark a book available again
    pub async fn release(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE books SET available = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Release every book the member currently holds
    pub async fn release_held_by_member(&self, conn: &mut SqliteConnection, member_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE books SET available = 1
            WHERE id IN (
                SELECT book_id FROM loans
                WHERE member_id = ? AND return_date IS NULL
            )
            "#,
        )
        .bind(member_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
