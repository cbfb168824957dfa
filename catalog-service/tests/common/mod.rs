use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use catalog_service::domain::auth::service::AuthGateway;
use catalog_service::domain::book::errors::BookError;
use catalog_service::domain::book::models::Book;
use catalog_service::domain::book::models::BookId;
use catalog_service::domain::book::models::UpdateBookCommand;
use catalog_service::domain::book::ports::BookRepository;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::user::errors::UserError;
use catalog_service::domain::user::models::User;
use catalog_service::domain::user::models::Username;
use catalog_service::domain::user::ports::UserDirectory;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::router::create_router;
use serde_json::json;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User directory held in memory, so tests can run without Postgres.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    /// Drop a user record, as an administrator would.
    pub fn remove(&self, username: &str) {
        self.users.lock().unwrap().remove(username);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }

    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let key = user.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(UserError::UsernameAlreadyExists(key));
        }
        users.insert(key, user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn update(
        &self,
        id: &BookId,
        changes: UpdateBookCommand,
    ) -> Result<Option<Book>, BookError> {
        let mut books = self.books.lock().unwrap();
        Ok(books.iter_mut().find(|b| b.id == *id).map(|book| {
            changes.apply_to(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let mut books = self.books.lock().unwrap();
        let position = books.iter().position(|b| b.id == *id);
        Ok(position.map(|i| books.remove(i)))
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub users: Arc<InMemoryUserDirectory>,
    pub token_service: TokenService,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserDirectory::default());
        let books = Arc::new(InMemoryBookRepository::default());

        // Minimal work factor keeps the suite fast
        let password_hasher =
            PasswordHasher::with_work_factor(8, 1, 1).expect("Failed to build hasher");
        let token_service = TokenService::new(SECRET).expect("Failed to build token service");
        let authenticator = Arc::new(Authenticator::new(password_hasher, token_service.clone()));

        let auth_gateway = Arc::new(AuthGateway::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&users), authenticator));
        let book_service = Arc::new(BookService::new(books));

        let router = create_router(auth_gateway, user_service, book_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            users,
            token_service,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return a fresh access token for it.
    pub async fn token_for(&self, username: &str) -> String {
        self.register(username, "correct-horse").await;
        let body: serde_json::Value = self
            .login(username, "correct-horse")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    pub async fn create_book(&self, token: &str, title: &str) -> serde_json::Value {
        self.post("/books")
            .bearer_auth(token)
            .json(&json!({
                "title": title,
                "author": "Frank Herbert",
                "published_date": "1965-08-01",
                "isbn": "9780441013593",
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }
}
