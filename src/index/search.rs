use crate::error::{Error, Result};
use crate::index::query::Query;
use crate::index::recipe::{split_ingredients, Recipe};
use crate::index::source::{RecipeRecord, RecordSource};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// In-memory recipe table keyed by recipe name
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: HashMap<String, Recipe>,
}

/// Recipes matching a query, keyed by name.
///
/// The mapping is unordered; use [`SearchResults::sorted_names`] for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults<'a> {
    matches: HashMap<&'a str, &'a Recipe>,
}

impl RecipeIndex {
    /// Build an index from raw records.
    ///
    /// A record missing any of its three fields is a load error. When two
    /// records share a name the later one replaces the earlier one.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RecipeRecord>,
    {
        let mut recipes = HashMap::new();

        for (i, record) in records.into_iter().enumerate() {
            let recipe = recipe_from_record(i + 1, record)?;

            if let Some(previous) = recipes.insert(recipe.name.clone(), recipe) {
                warn!(
                    "Duplicate recipe name '{}' at record {}, keeping the later entry",
                    previous.name,
                    i + 1
                );
            }
        }

        debug!("Loaded {} recipes", recipes.len());
        Ok(Self { recipes })
    }

    /// Build an index from a record source
    pub fn from_source(source: &dyn RecordSource) -> Result<Self> {
        let records = source.records()?;
        let index = Self::load(records)?;
        info!("Loaded {} recipes from {}", index.len(), source.describe());
        Ok(index)
    }

    /// Every recipe whose ingredients contain all of the query's ingredients.
    ///
    /// The empty query matches every recipe.
    pub fn search(&self, query: &Query) -> SearchResults<'_> {
        let matches: HashMap<&str, &Recipe> = self
            .recipes
            .iter()
            .filter(|(_, recipe)| recipe.matches(query))
            .map(|(name, recipe)| (name.as_str(), recipe))
            .collect();

        debug!(
            "Query with {} ingredients matched {} of {} recipes",
            query.len(),
            matches.len(),
            self.recipes.len()
        );

        SearchResults { matches }
    }

    /// Get recipe by name
    pub fn get(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Recipe '{name}' not found")))
    }

    /// All recipe names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn recipe_from_record(position: usize, record: RecipeRecord) -> Result<Recipe> {
    let missing = |field: &str| Error::Load(format!("Record {position} is missing '{field}'"));

    let name = record.name.ok_or_else(|| missing("Recipe"))?;
    let ingredients = record.ingredients.ok_or_else(|| missing("Ingredients"))?;
    let instructions = record.instructions.ok_or_else(|| missing("Instructions"))?;

    Ok(Recipe::new(
        name,
        split_ingredients(&ingredients),
        instructions,
    ))
}

impl<'a> SearchResults<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matches.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&'a Recipe> {
        self.matches.get(name).copied()
    }

    /// Matched names in lexicographic order
    pub fn sorted_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.matches.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Matched recipes ordered by name
    pub fn sorted_recipes(&self) -> Vec<&'a Recipe> {
        self.sorted_names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect()
    }
}
