use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::books::create_book::create_book;
use super::handlers::books::delete_book::delete_book;
use super::handlers::books::get_book::get_book;
use super::handlers::books::list_books::list_books;
use super::handlers::books::update_book::update_book;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::require_authenticated;
use crate::domain::auth::ports::AuthGatewayPort;
use crate::domain::book::ports::BookServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_gateway: Arc<dyn AuthGatewayPort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
}

/// Builds the HTTP application.
///
/// Reads on `/books` are public. Creating, updating and deleting books go
/// through the bearer guard, which runs before the request body is parsed.
pub fn create_router(
    auth_gateway: Arc<dyn AuthGatewayPort>,
    user_service: Arc<dyn UserServicePort>,
    book_service: Arc<dyn BookServicePort>,
) -> Router {
    let state = AppState {
        auth_gateway,
        user_service,
        book_service,
    };

    let guard = middleware::from_fn_with_state(state.clone(), require_authenticated);

    let account_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let book_routes = Router::new()
        .route(
            "/books",
            get(list_books).merge(post(create_book).route_layer(guard.clone())),
        )
        .route(
            "/books/:id",
            get(get_book).merge(
                put(update_book)
                    .delete(delete_book)
                    .route_layer(guard),
            ),
        );

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(account_routes)
        .merge(book_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
