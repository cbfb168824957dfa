use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_book_id;
use super::BookData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = parse_book_id(&id)?;

    state
        .book_service
        .get_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
