//! Lending workflow service
//!
//! A book is either available or on loan. `lend` moves it to on-loan and
//! creates the loan record, `return_loan` stamps the return date and moves it
//! back. Both transitions run in a single transaction.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::loan::{ActiveLoan, Loan, NewLoan},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend a book to a member
    pub async fn lend(&self, request: NewLoan) -> AppResult<Loan> {
        let mut tx = self.repository.begin().await?;

        // Write first: the guarded update takes the write lock before any
        // read, so concurrent lends of one book serialize here.
        let claimed = self.repository.books.claim(&mut tx, request.book_id).await?;

        let member = self.repository.members.get_by_id(&mut tx, request.member_id).await?;
        let book = self.repository.books.get_by_id(&mut tx, request.book_id).await?;
        if member.is_none() || book.is_none() {
            return Err(AppError::NotFound("member or book not found".to_string()));
        }
        if !claimed {
            tracing::debug!(book_id = request.book_id, "Lend refused, book on loan");
            return Err(AppError::Conflict("book not available".to_string()));
        }

        let loan = self.repository.loans.insert(&mut tx, &request, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(
            loan_id = loan.id,
            member_id = loan.member_id,
            book_id = loan.book_id,
            "Book lent"
        );
        Ok(loan)
    }

    /// Active loans with member name and book title
    pub async fn list_active_loans(&self) -> AppResult<Vec<ActiveLoan>> {
        let mut conn = self.repository.acquire().await?;
        self.repository.loans.list_active(&mut conn).await
    }

    /// Return a loan and make its book available again.
    ///
    /// Returning an already-returned loan succeeds without touching the
    /// store: the book may have been lent again since.
    pub async fn return_loan(&self, loan_id: i64) -> AppResult<Loan> {
        let mut tx = self.repository.begin().await?;

        match self.repository.loans.mark_returned(&mut tx, loan_id, Utc::now()).await? {
            Some(book_id) => {
                self.repository.books.release(&mut tx, book_id).await?;
                let loan = self
                    .repository
                    .loans
                    .get_by_id(&mut tx, loan_id)
                    .await?
                    .ok_or_else(|| AppError::Internal(format!("Loan {} vanished during return", loan_id)))?;
                tx.commit().await?;

                tracing::info!(loan_id, book_id, "Book returned");
                Ok(loan)
            }
            None => {
                let loan = self
                    .repository
                    .loans
                    .get_by_id(&mut tx, loan_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("loan not found".to_string()))?;

                tracing::info!(loan_id, "Loan already returned");
                Ok(loan)
            }
        }
    }
}
