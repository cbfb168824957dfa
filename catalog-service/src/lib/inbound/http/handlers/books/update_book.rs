use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_book_id;
use super::BookData;
use crate::domain::auth::models::AuthenticatedIdentity;
use crate::domain::book::errors::BookFieldError;
use crate::domain::book::models::BookText;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a book; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
    pub isbn: Option<String>,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, BookFieldError> {
        Ok(UpdateBookCommand {
            title: self.title.map(|t| BookText::new("title", t)).transpose()?,
            author: self.author.map(|a| BookText::new("author", a)).transpose()?,
            published_date: self.published_date,
            isbn: self.isbn,
        })
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = parse_book_id(&id)?;
    let command = req
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .book_service
        .update_book(&identity, &book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
