use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("only letters, digits, '_' and '-' are allowed")]
    InvalidCharacters,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("not a valid address: {0}")]
    InvalidFormat(String),
}

/// Failures of user registration and of the user directory.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
