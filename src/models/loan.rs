//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub member_id: i64,
    pub book_id: i64,
    pub loan_date: DateTime<Utc>,
    /// Null while the loan is active
    pub return_date: Option<DateTime<Utc>>,
}

/// Active loan joined with the borrower's name and the book title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActiveLoan {
    pub id: i64,
    pub member_id: i64,
    pub book_id: i64,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub member_name: String,
    pub book_title: String,
}

/// Lend request after boundary validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLoan {
    pub member_id: i64,
    pub book_id: i64,
}
