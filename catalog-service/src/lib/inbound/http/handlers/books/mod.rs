use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::inbound::http::handlers::ApiError;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub isbn: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            published_date: book.published_date.clone(),
            isbn: book.isbn.clone(),
            created_at: book.created_at,
        }
    }
}

fn parse_book_id(id: &str) -> Result<BookId, ApiError> {
    BookId::from_string(id).map_err(|e| ApiError::from(BookError::from(e)))
}
