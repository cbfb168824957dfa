use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookText;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `books` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), BookError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                published_date TEXT NOT NULL,
                isbn TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn row_to_book(row: PgRow) -> Result<Book, BookError> {
        Ok(Book {
            id: BookId(row.get("id")),
            title: BookText::new("title", row.get("title"))?,
            author: BookText::new("author", row.get("author"))?,
            published_date: row.get("published_date"),
            isbn: row.get("isbn"),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, published_date, isbn, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(&book.published_date)
        .bind(&book.isbn)
        .bind(book.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, published_date, isbn, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_book).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, published_date, isbn, created_at
            FROM books
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_book).collect()
    }

    async fn update(
        &self,
        id: &BookId,
        changes: UpdateBookCommand,
    ) -> Result<Option<Book>, BookError> {
        // One statement: no read-modify-write window
        let row = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                published_date = COALESCE($4, published_date),
                isbn = COALESCE($5, isbn)
            WHERE id = $1
            RETURNING id, title, author, published_date, isbn, created_at
            "#,
        )
        .bind(id.0)
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.author.as_ref().map(|a| a.as_str()))
        .bind(changes.published_date.as_deref())
        .bind(changes.isbn.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_book).transpose()
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            RETURNING id, title, author, published_date, isbn, created_at
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_book).transpose()
    }
}
