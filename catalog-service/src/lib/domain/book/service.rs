use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for catalog operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(*id))
    }

    async fn create_book(
        &self,
        identity: &AuthenticatedIdentity,
        command: CreateBookCommand,
    ) -> Result<Book, BookError> {
        let book = Book {
            id: BookId::new(),
            title: command.title,
            author: command.author,
            published_date: command.published_date,
            isbn: command.isbn,
            created_at: Utc::now(),
        };

        let created_book = self.repository.create(book).await?;

        tracing::info!(
            book_id = %created_book.id,
            actor = %identity.username(),
            "Book created"
        );

        Ok(created_book)
    }

    async fn update_book(
        &self,
        identity: &AuthenticatedIdentity,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let updated_book = self
            .repository
            .update(id, command)
            .await?
            .ok_or(BookError::NotFound(*id))?;

        tracing::info!(
            book_id = %updated_book.id,
            actor = %identity.username(),
            "Book updated"
        );

        Ok(updated_book)
    }

    async fn delete_book(
        &self,
        identity: &AuthenticatedIdentity,
        id: &BookId,
    ) -> Result<Book, BookError> {
        let deleted_book = self
            .repository
            .delete(id)
            .await?
            .ok_or(BookError::NotFound(*id))?;

        tracing::info!(
            book_id = %deleted_book.id,
            actor = %identity.username(),
            "Book deleted"
        );

        Ok(deleted_book)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::book::models::BookText;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    mock! {
        pub TestBookRepository {}

        #[async_trait]
        impl BookRepository for TestBookRepository {
            async fn create(&self, book: Book) -> Result<Book, BookError>;
            async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;
            async fn list_all(&self) -> Result<Vec<Book>, BookError>;
            async fn update(
                &self,
                id: &BookId,
                changes: UpdateBookCommand,
            ) -> Result<Option<Book>, BookError>;
            async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError>;
        }
    }

    fn identity() -> AuthenticatedIdentity {
        AuthenticatedIdentity::resolved(User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        })
    }

    fn dune(id: BookId) -> Book {
        Book {
            id,
            title: BookText::new("title", "Dune".to_string()).unwrap(),
            author: BookText::new("author", "Frank Herbert".to_string()).unwrap(),
            published_date: "1965-08-01".to_string(),
            isbn: "9780441013593".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_book() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_create()
            .withf(|book| book.title.as_str() == "Dune" && book.isbn == "9780441013593")
            .times(1)
            .returning(|book| Ok(book));

        let service = BookService::new(Arc::new(repository));

        let command = CreateBookCommand {
            title: BookText::new("title", "Dune".to_string()).unwrap(),
            author: BookText::new("author", "Frank Herbert".to_string()).unwrap(),
            published_date: "1965-08-01".to_string(),
            isbn: "9780441013593".to_string(),
        };

        let book = service.create_book(&identity(), command).await.unwrap();
        assert_eq!(book.author.as_str(), "Frank Herbert");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repository));

        let id = BookId::new();
        let result = service.get_book(&id).await;
        assert!(matches!(result, Err(BookError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_book_is_one_repository_call() {
        let id = BookId::new();
        let mut stored = dune(id);

        let mut repository = MockTestBookRepository::new();
        // No read before the write: a concurrent update cannot be overwritten
        repository.expect_find_by_id().times(0);
        repository
            .expect_update()
            .withf(move |candidate, changes| {
                *candidate == id
                    && changes.title.as_ref().map(|t| t.as_str()) == Some("Dune Messiah")
                    && changes.author.is_none()
                    && changes.isbn.is_none()
            })
            .times(1)
            .returning(move |_, changes| {
                changes.apply_to(&mut stored);
                Ok(Some(stored.clone()))
            });

        let service = BookService::new(Arc::new(repository));

        let command = UpdateBookCommand {
            title: Some(BookText::new("title", "Dune Messiah".to_string()).unwrap()),
            ..Default::default()
        };

        let book = service.update_book(&identity(), &id, command).await.unwrap();
        assert_eq!(book.title.as_str(), "Dune Messiah");
        assert_eq!(book.author.as_str(), "Frank Herbert");
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let mut repository = MockTestBookRepository::new();
        repository
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = BookService::new(Arc::new(repository));

        let result = service
            .update_book(&identity(), &BookId::new(), UpdateBookCommand::default())
            .await;
        assert!(matches!(result, Err(BookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_book_returns_removed_book() {
        let id = BookId::new();
        let stored = dune(id);

        let mut repository = MockTestBookRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = BookService::new(Arc::new(repository));

        let book = service.delete_book(&identity(), &id).await.unwrap();
        assert_eq!(book.id, id);
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let mut repository = MockTestBookRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repository));

        let result = service.delete_book(&identity(), &BookId::new()).await;
        assert!(matches!(result, Err(BookError::NotFound(_))));
    }
}
