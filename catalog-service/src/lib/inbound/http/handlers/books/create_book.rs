use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::BookData;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::book::errors::BookFieldError;
use crate::domain::book::models::BookText;
use crate::domain::book::models::CreateBookCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .book_service
        .create_book(&identity, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for adding a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    published_date: String,
    isbn: String,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookFieldError> {
        Ok(CreateBookCommand {
            title: BookText::new("title", self.title)?,
            author: BookText::new("author", self.author)?,
            published_date: self.published_date,
            isbn: self.isbn,
        })
    }
}
