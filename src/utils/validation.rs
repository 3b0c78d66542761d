// Validation utilities
use crate::error::{Error, Result};
use regex::Regex;

const MAX_USERNAME_LENGTH: usize = 64;

/// Validate a username: 1-64 characters from `[A-Za-z0-9_.-]`
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::Validation("Username must not be empty".to_string()));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(Error::Validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }

    let pattern = Regex::new(r"^[A-Za-z0-9_.-]+$")
        .map_err(|e| Error::Internal(format!("Invalid username pattern: {e}")))?;
    if !pattern.is_match(username) {
        return Err(Error::Validation(
            "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
        ));
    }

    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str, min_length: usize) -> Result<()> {
    if password.chars().count() < min_length {
        return Err(Error::Validation(format!(
            "Password must be at least {min_length} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("bob.smith-2_x").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret", 6).is_ok());
        assert!(validate_password("short", 6).is_err());
        assert!(validate_password("", 1).is_err());
    }
}
