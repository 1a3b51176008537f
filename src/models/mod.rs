//! Data models for the book club

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, NewBook};
pub use loan::{ActiveLoan, Loan, NewLoan};
pub use member::{Member, NewMember};

/// Trim a required text field, `None` when nothing is left
pub(crate) fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
