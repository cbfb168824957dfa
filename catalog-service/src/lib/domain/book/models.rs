use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::book::errors::BookFieldError;
use crate::domain::book::errors::BookIdError;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: BookText,
    pub author: BookText,
    pub published_date: String,
    pub isbn: String,
    pub created_at: DateTime<Utc>,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Required, non-blank text field of a book (title, author).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookText(String);

impl BookText {
    const MAX_LENGTH: usize = 512;

    /// Validate a required text field; surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// * `Empty` - Value is empty or whitespace only
    /// * `TooLong` - Value is longer than 512 characters
    pub fn new(field: &'static str, value: String) -> Result<Self, BookFieldError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(BookFieldError::Empty { field });
        }

        let length = value.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(BookFieldError::TooLong {
                field,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a book to the catalog
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: BookText,
    pub author: BookText,
    pub published_date: String,
    pub isbn: String,
}

/// Partial update of a book; `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateBookCommand {
    pub title: Option<BookText>,
    pub author: Option<BookText>,
    pub published_date: Option<String>,
    pub isbn: Option<String>,
}

impl UpdateBookCommand {
    /// Apply the supplied fields to `book`.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(published_date) = self.published_date {
            book.published_date = published_date;
        }
        if let Some(isbn) = self.isbn {
            book.isbn = isbn;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: BookId::new(),
            title: BookText::new("title", "Dune".to_string()).unwrap(),
            author: BookText::new("author", "Frank Herbert".to_string()).unwrap(),
            published_date: "1965-08-01".to_string(),
            isbn: "9780441013593".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_book_text_trims() {
        let title = BookText::new("title", "  Dune  ".to_string()).unwrap();
        assert_eq!(title.as_str(), "Dune");
    }

    #[test]
    fn test_book_text_empty() {
        assert_eq!(
            BookText::new("title", "   ".to_string()),
            Err(BookFieldError::Empty { field: "title" })
        );
    }

    #[test]
    fn test_book_text_too_long() {
        assert!(matches!(
            BookText::new("author", "x".repeat(513)),
            Err(BookFieldError::TooLong { actual: 513, .. })
        ));
    }

    #[test]
    fn test_partial_update_keeps_unset_fields() {
        let mut book = book();
        let original = book.clone();

        UpdateBookCommand {
            isbn: Some("0441013597".to_string()),
            ..Default::default()
        }
        .apply_to(&mut book);

        assert_eq!(book.isbn, "0441013597");
        assert_eq!(book.title, original.title);
        assert_eq!(book.author, original.author);
        assert_eq!(book.published_date, original.published_date);
    }

    #[test]
    fn test_book_id_parse() {
        assert!(BookId::from_string("not-a-uuid").is_err());
        let id = BookId::new();
        assert_eq!(BookId::from_string(&id.to_string()), Ok(id));
    }
}
