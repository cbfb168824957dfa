use async_trait::async_trait;

use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Port for catalog operations.
///
/// Mutations take the caller's identity explicitly; reads are public.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// List every book in the catalog.
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve one book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Add a book.
    async fn create_book(
        &self,
        identity: &AuthenticatedIdentity,
        command: CreateBookCommand,
    ) -> Result<Book, BookError>;

    /// Change the supplied fields of a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn update_book(
        &self,
        identity: &AuthenticatedIdentity,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError>;

    /// Remove a book and return it.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn delete_book(
        &self,
        identity: &AuthenticatedIdentity,
        id: &BookId,
    ) -> Result<Book, BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Retrieve book by identifier; `None` if absent.
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Apply a partial update in one atomic step, returning the stored result.
    ///
    /// Fields left as `None` keep their current value. `None` if the book does
    /// not exist.
    async fn update(
        &self,
        id: &BookId,
        changes: UpdateBookCommand,
    ) -> Result<Option<Book>, BookError>;

    /// Remove a book, returning it if it existed.
    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError>;
}
