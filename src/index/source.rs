use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One raw row from a record source.
///
/// A field is `None` only when its column or key is absent, so that case can
/// be reported as a load error naming the record. An empty cell or value is
/// `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "Recipe", default, deserialize_with = "present_field")]
    pub name: Option<String>,
    #[serde(rename = "Ingredients", default, deserialize_with = "present_field")]
    pub ingredients: Option<String>,
    #[serde(rename = "Instructions", default, deserialize_with = "present_field")]
    pub instructions: Option<String>,
}

/// A field that is present but empty (CSV reads empty cells as none, YAML a
/// bare key as null) deserializes to an empty string
fn present_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}

impl RecipeRecord {
    pub fn new(name: &str, ingredients: &str, instructions: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ingredients: Some(ingredients.to_string()),
            instructions: Some(instructions.to_string()),
        }
    }
}

/// Anything that can yield recipe records
pub trait RecordSource {
    fn records(&self) -> Result<Vec<RecipeRecord>>;

    /// Human readable origin, used in log lines
    fn describe(&self) -> String;
}

/// CSV file with a `Recipe,Ingredients,Instructions` header row
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse CSV text directly
    pub fn parse_str(content: &str) -> Result<Vec<RecipeRecord>> {
        parse_csv(content.as_bytes())
    }
}

impl RecordSource for CsvSource {
    fn records(&self) -> Result<Vec<RecipeRecord>> {
        let content = fs::read(&self.path).map_err(|e| {
            Error::Load(format!(
                "Failed to read recipes from {}: {}",
                self.path.display(),
                e
            ))
        })?;
        parse_csv(content.as_slice())
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

fn parse_csv(reader: impl std::io::Read) -> Result<Vec<RecipeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RecipeRecord>().enumerate() {
        let record =
            row.map_err(|e| Error::Load(format!("Malformed record {}: {}", i + 1, e)))?;
        records.push(record);
    }

    debug!("Read {} CSV records", records.len());
    Ok(records)
}

/// YAML file holding a sequence of records with the same keys as the CSV header
#[derive(Debug, Clone)]
pub struct YamlSource {
    path: PathBuf,
}

impl YamlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse YAML text directly
    pub fn parse_str(content: &str) -> Result<Vec<RecipeRecord>> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::Load(format!("Failed to parse YAML records: {e}")))
    }
}

impl RecordSource for YamlSource {
    fn records(&self) -> Result<Vec<RecipeRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::Load(format!(
                "Failed to read recipes from {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Self::parse_str(&content)
    }

    fn describe(&self) -> String {
        format!("yaml:{}", self.path.display())
    }
}

/// Pick a record source by file extension
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn RecordSource>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("yaml") | Some("yml") => Ok(Box::new(YamlSource::new(path))),
        _ => Err(Error::Load(format!(
            "Unsupported recipe source {}: expected .csv, .yaml or .yml",
            path.display()
        ))),
    }
}
