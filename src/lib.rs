pub mod config;
pub mod db;
pub mod error;

// Recipe loading and search
pub mod index;

// Accounts
pub mod auth;

// Terminal front end
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
