//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::required_text;
use crate::error::{AppError, AppResult};

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// False while the book has an unreturned loan
    pub available: bool,
}

/// Normalized input for a new book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

impl NewBook {
    pub fn new(title: &str, author: &str) -> AppResult<Self> {
        match (required_text(title), required_text(author)) {
            (Some(title), Some(author)) => Ok(Self { title, author }),
            _ => Err(AppError::Validation("title and author required".to_string())),
        }
    }
}
