// Text rendering shared by the one-shot commands and the interactive session
use crate::index::{Recipe, SearchResults};
use crate::utils::truncate;
use std::fmt::Write;

/// Numbered, name-sorted result list, or the no-results notice
pub fn render_results(results: &SearchResults<'_>, input: &str) -> String {
    if results.is_empty() {
        return no_results_notice(input);
    }

    let mut out = String::new();
    for (i, name) in results.sorted_names().into_iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, name);
    }
    out
}

pub fn no_results_notice(input: &str) -> String {
    format!("No recipes found containing '{input}'. Please try a different ingredient.\n")
}

/// Ingredients and instructions of one recipe
pub fn render_recipe(recipe: &Recipe) -> String {
    format!(
        "Ingredients:\n{}\n\nInstructions:\n{}\n",
        recipe.ingredient_list(),
        recipe.instructions
    )
}

/// Two-column table of recipe names and ingredients
pub fn render_table(recipes: &[&Recipe]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<40} {:<40}", "Recipe", "Ingredients");
    let _ = writeln!(out, "{}", "-".repeat(81));

    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:<40} {:<40}",
            truncate(&recipe.name, 38),
            truncate(&recipe.ingredient_list(), 40)
        );
    }
    out
}
