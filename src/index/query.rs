use std::collections::BTreeSet;

/// Normalize ingredient name (lowercase, trim)
pub fn normalize_ingredient(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A set of normalized ingredient names a recipe must contain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    ingredients: BTreeSet<String>,
}

impl Query {
    /// Parse raw user input such as `"Egg, milk"`.
    ///
    /// Tokens are split on `,`, trimmed and lower-cased. Empty tokens are
    /// dropped, so blank input yields the empty query.
    pub fn parse(input: &str) -> Self {
        Self::from_ingredients(input.split(','))
    }

    /// Build a query from an already split list of ingredient names
    pub fn from_ingredients<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ingredients = ingredients
            .into_iter()
            .map(|s| normalize_ingredient(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();

        Self { ingredients }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(String::as_str)
    }
}
