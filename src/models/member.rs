//! Member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::required_text;
use crate::error::{AppError, AppResult};

/// Member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i64,
    pub name: String,
    /// Unique across all members
    pub email: String,
    pub joined_date: DateTime<Utc>,
}

/// Normalized input for a new member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub email: String,
}

impl NewMember {
    /// Trims both fields; either one empty is a validation error
    pub fn new(name: &str, email: &str) -> AppResult<Self> {
        match (required_text(name), required_text(email)) {
            (Some(name), Some(email)) => Ok(Self { name, email }),
            _ => Err(AppError::Validation("name and email required".to_string())),
        }
    }
}
