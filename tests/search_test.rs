use recipe_search::index::{CsvSource, Query, RecipeIndex, RecordSource, YamlSource};
use recipe_search::Error;
use std::collections::BTreeSet;

const FIXTURE_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/recipes.csv");
const FIXTURE_YAML: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/recipes.yaml");

fn fixture_index() -> RecipeIndex {
    RecipeIndex::from_source(&CsvSource::new(FIXTURE_CSV)).expect("Failed to load fixture")
}

/// Recipes containing every query ingredient, computed independently of the index
fn expected_matches(index: &RecipeIndex, query: &Query) -> BTreeSet<String> {
    index
        .names()
        .into_iter()
        .filter(|name| {
            let ingredients: BTreeSet<String> = index
                .get(name)
                .unwrap()
                .ingredients
                .iter()
                .map(|i| i.trim().to_lowercase())
                .collect();
            query.iter().all(|q| ingredients.contains(q))
        })
        .map(str::to_string)
        .collect()
}

#[test]
fn test_search_matches_superset_definition() {
    let index = fixture_index();
    assert_eq!(index.len(), 6);

    let queries = [
        "",
        "egg",
        "bread",
        "egg, milk",
        "bread, butter",
        "butter",
        "egg, milk, flour",
        "salt, egg",
        "cheese",
        "egg, cheese",
    ];

    for input in queries {
        let query = Query::parse(input);
        let actual: BTreeSet<String> = index
            .search(&query)
            .sorted_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        assert_eq!(
            actual,
            expected_matches(&index, &query),
            "query {input:?} returned the wrong recipes"
        );
    }
}

#[test]
fn test_empty_query_returns_all_recipes() {
    let index = fixture_index();
    let results = index.search(&Query::default());

    assert_eq!(results.len(), index.len());
    assert_eq!(results.sorted_names(), index.names());
}

#[test]
fn test_query_normalization() {
    let index = fixture_index();

    let upper = index.search(&Query::from_ingredients(["Egg"])).sorted_names();
    let padded = index.search(&Query::from_ingredients([" egg "])).sorted_names();
    assert_eq!(upper, padded);

    // Recipe-side case is ignored too ("EGG, butter, Salt")
    assert!(index
        .search(&Query::parse("egg, butter, salt"))
        .contains("Scrambled Eggs"));
}

#[test]
fn test_search_is_idempotent() {
    let index = fixture_index();
    let query = Query::parse("bread");

    let first = index.search(&query);
    let second = index.search(&query);
    assert_eq!(first.sorted_names(), second.sorted_names());
    assert_eq!(index.len(), 6);
}

#[test]
fn test_omelette_example() {
    let index = RecipeIndex::from_source(&YamlSource::new(FIXTURE_YAML)).unwrap();

    let results = index.search(&Query::parse("egg"));
    assert_eq!(results.sorted_names(), vec!["Omelette"]);
    assert_eq!(results.get("Omelette").unwrap().instructions, "Whisk and fry");

    let results = index.search(&Query::parse("egg, cheese"));
    assert!(results.is_empty());
}

#[test]
fn test_csv_and_yaml_sources_agree() {
    let csv = CsvSource::parse_str(
        "Recipe,Ingredients,Instructions\nOmelette,\"Egg, Milk\",Whisk and fry\nToast,Bread,Toast it\n",
    )
    .unwrap();
    let yaml = YamlSource::new(FIXTURE_YAML).records().unwrap();

    assert_eq!(csv, yaml);
}

#[test]
fn test_missing_column_is_load_error() {
    let records = CsvSource::parse_str("Recipe,Ingredients\nToast,Bread\n").unwrap();
    let result = RecipeIndex::load(records);

    assert!(matches!(result, Err(Error::Load(_))));
}

#[test]
fn test_empty_instructions_cell_loads() {
    let records = CsvSource::parse_str(
        "Recipe,Ingredients,Instructions\nWater,Water,\nToast,Bread,Toast it\n",
    )
    .unwrap();
    let index = RecipeIndex::load(records).expect("Empty cell should not fail the load");

    assert_eq!(index.len(), 2);
    assert_eq!(index.search(&Query::parse("water")).sorted_names(), vec!["Water"]);
    assert_eq!(index.get("Water").unwrap().instructions, "");
}

#[test]
fn test_get_unknown_recipe() {
    let index = fixture_index();
    let err = index.get("Lasagne").unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("Lasagne"));
}
