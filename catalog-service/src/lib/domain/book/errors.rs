use thiserror::Error;

use crate::domain::book::models::BookId;

/// Error type for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for book field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookFieldError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Top-level error type for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book: {0}")]
    InvalidField(#[from] BookFieldError),

    #[error("Book not found: {0}")]
    NotFound(BookId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
