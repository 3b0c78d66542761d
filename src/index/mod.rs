// Recipe loading and ingredient search
// The index is built once from a record source and is read-only afterwards

pub mod query;
pub mod recipe;
pub mod search;
pub mod source;

// Re-exports
pub use query::{normalize_ingredient, Query};
pub use recipe::Recipe;
pub use search::{RecipeIndex, SearchResults};
pub use source::{open_source, CsvSource, RecipeRecord, RecordSource, YamlSource};
