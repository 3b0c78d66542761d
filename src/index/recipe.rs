use crate::index::query::{normalize_ingredient, Query};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(skip)]
    normalized: HashSet<String>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: Vec<String>,
        instructions: impl Into<String>,
    ) -> Self {
        let normalized = ingredients.iter().map(|i| normalize_ingredient(i)).collect();

        Self {
            name: name.into(),
            ingredients,
            instructions: instructions.into(),
            normalized,
        }
    }

    /// Check whether every ingredient in the query appears in this recipe
    pub fn matches(&self, query: &Query) -> bool {
        query.iter().all(|ingredient| self.normalized.contains(ingredient))
    }

    /// Ingredients joined for display
    pub fn ingredient_list(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Split a comma-separated ingredient field into trimmed, non-empty names
pub fn split_ingredients(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
