use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::domain::user::ports::UserServicePort;

/// Domain service for user registration.
pub struct UserService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    authenticator: Arc<Authenticator>,
}

impl<UD> UserService<UD>
where
    UD: UserDirectory,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User persistence implementation
    /// * `authenticator` - Shared hasher and token service
    pub fn new(directory: Arc<UD>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }
}

#[async_trait]
impl<UD> UserServicePort for UserService<UD>
where
    UD: UserDirectory,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        // Argon2 is CPU-bound; keep it off the async workers
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::PasswordHashing(format!("hashing task failed: {}", e)))?
                .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.directory.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use auth::TokenService;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn create(&self, user: User) -> Result<User, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            PasswordHasher::with_work_factor(8, 1, 1).unwrap(),
            TokenService::new(b"test_secret_key_at_least_32_bytes!").unwrap(),
        ))
    }

    fn command(password: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.email.as_str() == "alice@example.com"
                    && user.password_hash.starts_with("$argon2id$")
                    && !user.password_hash.contains("correct-horse")
            })
            .times(1)
            .returning(|user| Ok(user));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(directory), Arc::clone(&authenticator));

        let user = service.register(command("correct-horse")).await.unwrap();

        assert_eq!(user.username.as_str(), "alice");
        assert!(authenticator.verify_password("correct-horse", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut directory = MockTestUserDirectory::new();

        directory.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(directory), authenticator());

        let result = service.register(command("correct-horse")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_directory_failure() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_create()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let service = UserService::new(Arc::new(directory), authenticator());

        let result = service.register(command("correct-horse")).await;
        assert!(matches!(result.unwrap_err(), UserError::DatabaseError(_)));
    }
}
