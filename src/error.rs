use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Recipe load error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    Duplicate(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Database errors might contain sensitive schema information
            Error::Database(_) => "Database operation failed".to_string(),
            Error::Migration(_) => "Database migration failed".to_string(),

            // Internal errors might contain sensitive details
            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password") || lower.contains("secret") || lower.contains("hash")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            // These errors are generally safe to log as-is
            Error::Load(msg) => format!("Recipe load error: {msg}"),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Duplicate(username) => format!("Duplicate username: {username}"),
            Error::InvalidCredentials => "Invalid credentials".to_string(),
            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::PasswordHash => "Password hashing failed".to_string(),
        }
    }

    /// Whether the error is a rejected user input that the user can retry
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Duplicate(_) | Error::InvalidCredentials | Error::Validation(_)
        )
    }
}
