use crate::auth::{AuthService, CredentialStore};
use crate::cli::display::{no_results_notice, render_recipe, render_table};
use crate::index::{Query, RecipeIndex};
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Search and print matching recipes as a table or JSON
pub fn search(index: &RecipeIndex, input: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let query = Query::parse(input);
    let results = index.search(&query);
    let recipes = results.sorted_recipes();

    if json {
        serde_json::to_writer_pretty(&mut *out, &recipes)
            .map_err(|e| Error::Internal(format!("Failed to encode results: {e}")))?;
        writeln!(out)?;
        return Ok(());
    }

    if recipes.is_empty() {
        write!(out, "{}", no_results_notice(input))?;
        return Ok(());
    }

    writeln!(out, "\nFound {} recipes:\n", recipes.len())?;
    write!(out, "{}", render_table(&recipes))?;
    writeln!(out, "\nTo see a recipe: recipe-search show \"<name>\"")?;
    Ok(())
}

/// Print one recipe
pub fn show(index: &RecipeIndex, name: &str, out: &mut impl Write) -> Result<()> {
    let recipe = index.get(name)?;
    writeln!(out, "{}\n", recipe.name)?;
    write!(out, "{}", render_recipe(recipe))?;
    Ok(())
}

/// Print every recipe name
pub fn list(index: &RecipeIndex, out: &mut impl Write) -> Result<()> {
    for name in index.names() {
        writeln!(out, "{name}")?;
    }
    writeln!(out, "\n{} recipes", index.len())?;
    Ok(())
}

pub async fn signup<S: CredentialStore>(
    auth: &AuthService<S>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let credential = auth.signup(username, password).await?;
    writeln!(
        out,
        "\u{2713} Account created for '{}'. You can now log in.",
        credential.username
    )?;
    Ok(())
}

pub async fn login<S: CredentialStore>(
    auth: &AuthService<S>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let credential = auth.login(username, password).await?;
    writeln!(out, "\u{2713} Logged in as '{}'", credential.username)?;
    Ok(())
}

/// Use the given password, or read one line from `input`
pub fn resolve_password(
    password: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    write!(out, "Password: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Validation("No password given".to_string()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
