// Terminal front end: one-shot subcommands plus the interactive session

pub mod commands;
pub mod display;
pub mod session;

use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "recipe-search")]
#[command(about = "Find recipes by the ingredients you have", long_about = None)]
pub struct Cli {
    /// Recipe file (.csv, .yaml or .yml)
    #[arg(long, global = true, env = "RECIPES_PATH")]
    pub recipes: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in or sign up, then search interactively (default)
    Run,

    /// Create an account
    Signup {
        /// Username
        username: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "RECIPE_SEARCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Check a username and password
    Login {
        /// Username
        username: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "RECIPE_SEARCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Search recipes containing all of the given ingredients
    Search {
        /// Comma-separated ingredients, e.g. "egg, milk"
        #[arg(default_value = "")]
        ingredients: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one recipe's ingredients and instructions
    Show {
        /// Recipe name
        name: String,
    },

    /// List every recipe name
    List,

    /// Run database migrations
    Migrate,
}

/// Process exit status for a finished command.
///
/// A failure is logged once via [`crate::Error::log_safe`] and never printed
/// in its raw form, which may carry database or credential detail.
pub fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e.log_safe());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["recipe-search"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "recipe-search",
            "--recipes",
            "data/recipes.yaml",
            "search",
            "egg, milk",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.recipes, Some(PathBuf::from("data/recipes.yaml")));
        match cli.command {
            Some(Commands::Search { ingredients, json }) => {
                assert_eq!(ingredients, "egg, milk");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(())), 0);
        assert_eq!(exit_status(Err(Error::InvalidCredentials)), 1);
        assert_eq!(exit_status(Err(Error::Load("bad row".to_string()))), 1);
    }
}
