//! Member registry service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::member::{Member, NewMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All members, newest first
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        let mut conn = self.repository.acquire().await?;
        self.repository.members.list(&mut conn).await
    }

    /// Register a member (fields are trimmed, email must be unused)
    pub async fn add_member(&self, name: &str, email: &str) -> AppResult<Member> {
        let new_member = NewMember::new(name, email)?;

        let mut tx = self.repository.begin().await?;
        let member = self.repository.members.insert(&mut tx, &new_member, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(member_id = member.id, "Member added");
        Ok(member)
    }

    /// Delete a member together with their loan records.
    ///
    /// Books the member still holds become available again.
    pub async fn delete_member(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        let released = self.repository.books.release_held_by_member(&mut tx, id).await?;
        let removed_loans = self.repository.loans.delete_for_member(&mut tx, id).await?;
        if self.repository.members.delete(&mut tx, id).await? == 0 {
            return Err(AppError::NotFound("member not found".to_string()));
        }

        tx.commit().await?;

        tracing::info!(member_id = id, removed_loans, released_books = released, "Member deleted");
        Ok(())
    }
}
