use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use catalog_service::config::Config;
use catalog_service::domain::auth::service::AuthGateway;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::PostgresBookRepository;
use catalog_service::outbound::repositories::PostgresUserDirectory;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const RECOMMENDED_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < RECOMMENDED_SECRET_BYTES {
        tracing::warn!(
            secret_bytes = config.jwt.secret.len(),
            recommended = RECOMMENDED_SECRET_BYTES,
            "JWT signing secret is shorter than recommended"
        );
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    let user_directory = Arc::new(PostgresUserDirectory::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));
    user_directory.ensure_schema().await?;
    book_repository.ensure_schema().await?;
    tracing::info!(database = "postgresql", "Database schema ready");

    let password_hasher = PasswordHasher::with_work_factor(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let token_service = TokenService::from_config(&config.jwt.secret, &config.jwt.algorithm)?
        .with_default_ttl(Duration::minutes(config.jwt.expiration_minutes));
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_service));

    let auth_gateway = Arc::new(AuthGateway::new(
        Arc::clone(&user_directory),
        Arc::clone(&authenticator),
    ));
    let user_service = Arc::new(UserService::new(user_directory, authenticator));
    let book_service = Arc::new(BookService::new(book_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_gateway, user_service, book_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
