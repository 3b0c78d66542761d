// Interactive terminal session: authenticate, then search until the user quits
use crate::auth::{AuthService, Credential, CredentialStore};
use crate::cli::display::{render_recipe, render_results};
use crate::error::{Error, Result};
use crate::index::{Query, RecipeIndex};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "\
Enter ingredients separated by commas to search.
Commands:
  :show <number|name>  show a recipe from the current results
  :list                list every recipe
  :clear               clear the current results
  :help                show this help
  :quit                exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthAction {
    Login,
    Signup,
}

/// A line-oriented session over any reader/writer pair
pub struct Session<R, W> {
    input: R,
    output: W,
    last_results: Vec<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            last_results: Vec::new(),
        }
    }

    /// Authenticate, then run the search loop
    pub async fn run<S: CredentialStore>(
        &mut self,
        auth: &AuthService<S>,
        index: &RecipeIndex,
    ) -> Result<()> {
        let Some(user) = self.authenticate(auth).await? else {
            return Ok(());
        };

        writeln!(
            self.output,
            "Welcome, {}. {} recipes loaded.",
            user.username,
            index.len()
        )?;
        self.search_loop(index)
    }

    /// Prompt for login or signup until one succeeds or input ends.
    ///
    /// Rejected attempts are reported and the user is asked again.
    pub async fn authenticate<S: CredentialStore>(
        &mut self,
        auth: &AuthService<S>,
    ) -> Result<Option<Credential>> {
        loop {
            let Some(choice) = self.prompt("[l]ogin, [s]ignup or [q]uit: ")? else {
                return Ok(None);
            };

            let action = match choice.trim().to_lowercase().as_str() {
                "l" | "login" => AuthAction::Login,
                "s" | "signup" => AuthAction::Signup,
                "q" | "quit" => return Ok(None),
                other => {
                    writeln!(self.output, "Unknown choice '{other}'")?;
                    continue;
                }
            };

            let Some(username) = self.prompt("Username: ")? else {
                return Ok(None);
            };
            let Some(password) = self.prompt("Password: ")? else {
                return Ok(None);
            };

            let result = match action {
                AuthAction::Login => auth.login(&username, &password).await,
                AuthAction::Signup => auth.signup(&username, &password).await,
            };

            match result {
                Ok(credential) => {
                    if action == AuthAction::Signup {
                        writeln!(self.output, "Account created successfully.")?;
                    }
                    return Ok(Some(credential));
                }
                Err(e) if e.is_user_facing() => {
                    let title = match action {
                        AuthAction::Login => "Login failed",
                        AuthAction::Signup => "Sign up failed",
                    };
                    writeln!(self.output, "{title}: {e}")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read queries and commands until `:quit` or end of input
    pub fn search_loop(&mut self, index: &RecipeIndex) -> Result<()> {
        writeln!(self.output, "Type :help for commands.")?;

        while let Some(line) = self.prompt("Ingredients> ")? {
            let line = line.trim();

            match line.split_once(' ').unwrap_or((line, "")) {
                (":quit" | ":q", _) => break,
                (":help", _) => write!(self.output, "{HELP}")?,
                (":clear", _) => {
                    self.last_results.clear();
                    writeln!(self.output, "Results cleared.")?;
                }
                (":list", _) => {
                    for name in index.names() {
                        writeln!(self.output, "{name}")?;
                    }
                }
                (":show", arg) => self.show(index, arg.trim())?,
                (command, _) if command.starts_with(':') => {
                    writeln!(self.output, "Unknown command '{command}'. Type :help.")?;
                }
                _ => self.search(index, line)?,
            }
        }

        Ok(())
    }

    fn search(&mut self, index: &RecipeIndex, input: &str) -> Result<()> {
        let query = Query::parse(input);
        let results = index.search(&query);

        write!(self.output, "{}", render_results(&results, input))?;
        self.last_results = results
            .sorted_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(())
    }

    /// Show a recipe from the last result list, by number or by name
    fn show(&mut self, index: &RecipeIndex, selection: &str) -> Result<()> {
        if selection.is_empty() {
            writeln!(self.output, "Usage: :show <number|name>")?;
            return Ok(());
        }

        let name = match selection.parse::<usize>() {
            Ok(n) => match n.checked_sub(1).and_then(|i| self.last_results.get(i)) {
                Some(name) => name.clone(),
                None => {
                    writeln!(self.output, "No result numbered {n}")?;
                    return Ok(());
                }
            },
            Err(_) => match self.last_results.iter().find(|name| *name == selection) {
                Some(name) => name.clone(),
                None => {
                    writeln!(self.output, "'{selection}' is not in the current results")?;
                    return Ok(());
                }
            },
        };

        match index.get(&name) {
            Ok(recipe) => {
                debug!("Showing recipe '{}'", recipe.name);
                write!(self.output, "{}", render_recipe(recipe))?;
            }
            Err(Error::NotFound(msg)) => {
                warn!("Selected a recipe that is not loaded: {}", name);
                writeln!(self.output, "{msg}")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Write a prompt and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::config::AuthConfig;
    use crate::index::RecipeRecord;
    use std::io::Cursor;

    fn sample_index() -> RecipeIndex {
        RecipeIndex::load(vec![
            RecipeRecord::new("Omelette", "Egg,Milk", "Whisk and fry"),
            RecipeRecord::new("Toast", "Bread", "Toast it"),
        ])
        .unwrap()
    }

    fn run_search(script: &str) -> String {
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        session.search_loop(&sample_index()).unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_search_and_show_by_number() {
        let output = run_search("egg\n:show 1\n:quit\n");
        assert!(output.contains("  1. Omelette"));
        assert!(output.contains("Ingredients:\nEgg, Milk\n\nInstructions:\nWhisk and fry"));
    }

    #[test]
    fn test_blank_query_lists_everything_sorted() {
        let output = run_search("\n");
        assert!(output.contains("  1. Omelette\n  2. Toast\n"));
    }

    #[test]
    fn test_no_results_notice() {
        let output = run_search("egg, cheese\n");
        assert!(output.contains("No recipes found containing 'egg, cheese'"));
    }

    #[test]
    fn test_show_unknown_selection() {
        let output = run_search(":show 3\n:show Pancakes\n");
        assert!(output.contains("No result numbered 3"));
        assert!(output.contains("'Pancakes' is not in the current results"));
    }

    #[test]
    fn test_show_by_name_only_from_current_results() {
        let output = run_search("bread\n:show Omelette\n:show Toast\n");
        assert!(output.contains("'Omelette' is not in the current results"));
        assert!(!output.contains("Whisk and fry"));
        assert!(output.contains("Instructions:\nToast it"));

        let output = run_search("bread\n:clear\n:show Toast\n");
        assert!(output.contains("'Toast' is not in the current results"));
        assert!(!output.contains("Toast it"));
    }

    #[test]
    fn test_clear_forgets_results() {
        let output = run_search("bread\n:clear\n:show 1\n");
        assert!(output.contains("Results cleared."));
        assert!(output.contains("No result numbered 1"));
    }

    #[tokio::test]
    async fn test_signup_then_search() {
        let auth = AuthService::new(MemoryCredentialStore::new(), AuthConfig::default());
        let script = "s\nalice\nsecret1\nbread\n:quit\n";

        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        session.run(&auth, &sample_index()).await.unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();

        assert!(output.contains("Account created successfully."));
        assert!(output.contains("Welcome, alice."));
        assert!(output.contains("  1. Toast"));
    }

    #[tokio::test]
    async fn test_failed_login_reprompts() {
        let auth = AuthService::new(MemoryCredentialStore::new(), AuthConfig::default());
        auth.signup("alice", "secret1").await.unwrap();
        let script = "l\nalice\nwrong\nl\nalice\nsecret1\n";

        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        let user = session.authenticate(&auth).await.unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();

        assert_eq!(user.map(|u| u.username), Some("alice".to_string()));
        assert!(output.contains("Login failed: Invalid username or password"));
    }

    #[tokio::test]
    async fn test_end_of_input_during_auth() {
        let auth = AuthService::new(MemoryCredentialStore::new(), AuthConfig::default());

        let mut session = Session::new(Cursor::new(String::new()), Vec::new());
        assert!(session.authenticate(&auth).await.unwrap().is_none());
    }
}
