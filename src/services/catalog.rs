//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, highest id first
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let mut conn = self.repository.acquire().await?;
        self.repository.books.list(&mut conn).await
    }

    #[cfg(test)]
    pub(crate) async fn get_book(&self, id: i64) -> AppResult<Book> {
        let mut conn = self.repository.acquire().await?;
        self.repository
            .books
            .get_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("book not found".to_string()))
    }

    /// Add a book to the catalog; new books are available
    pub async fn add_book(&self, title: &str, author: &str) -> AppResult<Book> {
        let new_book = NewBook::new(title, author)?;

        let mut tx = self.repository.begin().await?;
        let book = self.repository.books.insert(&mut tx, &new_book).await?;
        tx.commit().await?;

        tracing::info!(book_id = book.id, "Book added");
        Ok(book)
    }

    /// Delete a book together with every loan record referencing it
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        let removed_loans = self.repository.loans.delete_for_book(&mut tx, id).await?;
        if self.repository.books.delete(&mut tx, id).await? == 0 {
            return Err(AppError::NotFound("book not found".to_string()));
        }

        tx.commit().await?;

        tracing::info!(book_id = id, removed_loans, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_repository;

    #[tokio::test]
    async fn test_add_and_list_books() {
        let service = CatalogService::new(test_repository().await);

        let dune = service.add_book("Dune", "Herbert").await.unwrap();
        assert!(dune.available);
        let emma = service.add_book(" Emma ", " Austen ").await.unwrap();
        assert_eq!(emma.title, "Emma");

        let listed = service.list_books().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![emma.id, dune.id]);
    }

    #[tokio::test]
    async fn test_missing_author_is_rejected() {
        let service = CatalogService::new(test_repository().await);

        let err = service.add_book("Dune", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(service.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_book() {
        let service = CatalogService::new(test_repository().await);

        let dune = service.add_book("Dune", "Herbert").await.unwrap();
        service.delete_book(dune.id).await.unwrap();
        assert!(matches!(service.get_book(dune.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete_book(dune.id).await, Err(AppError::NotFound(_))));
    }
}
