use atlas_catalog::{Catalog, CatalogError, fields, init};
use atlas_kernel::domain::config::CatalogConfig;
use std::fs;

const DATA: &str = "\u{feff}Destination, Region, Country, Latitude, Longitude, Currency, Language
Vienna,Vienna,Austria,48.2082,16.3738,Euro,German
Salzburg,Salzburg,Austria,47.8095,13.0550,Euro,German
Kraków,Lesser Poland,Poland,50.0647,19.9450,Polish Zloty,Polish
";

fn config_for(dir: &tempfile::TempDir) -> CatalogConfig {
    let path = dir.path().join("destinations.csv");
    fs::write(&path, DATA).expect("write data file");
    CatalogConfig { data_file: path, ..CatalogConfig::default() }
}

#[test]
fn loads_catalog_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog = Catalog::load(&config_for(&dir)).expect("catalog loads");

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.schema().fields()[0], fields::DESTINATION);
    assert_eq!(catalog.schema().fields()[1], fields::REGION);
    assert_eq!(catalog.get(2).ok().and_then(|d| d.field("destination")), Some("Kraków"));
}

#[test]
fn every_field_resolves_in_any_casing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog = Catalog::load(&config_for(&dir)).expect("catalog loads");

    for name in catalog.schema().fields() {
        let expected = catalog.resolve_field(name).expect("exact name resolves");
        assert_eq!(catalog.resolve_field(&name.to_uppercase()).ok(), Some(expected));
        assert_eq!(catalog.resolve_field(&name.to_lowercase()).ok(), Some(expected));
    }
}

#[test]
fn records_serialize_with_trimmed_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog = Catalog::load(&config_for(&dir)).expect("catalog loads");

    let value = serde_json::to_value(catalog.get(0).expect("record")).expect("serialize");
    assert_eq!(value["Destination"], "Vienna");
    assert_eq!(value["Currency"], "Euro");
    assert!(value.get(" Region").is_none());
}

#[test]
fn init_registers_the_slice() {
    let dir = tempfile::tempdir().expect("temp dir");
    let slice = init(&config_for(&dir)).expect("slice");

    let catalog = slice.downcast_ref::<Catalog>().expect("catalog slice");
    assert_eq!(catalog.countries(), ["Austria", "Poland"]);
}

#[test]
fn init_fails_without_data_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = CatalogConfig { data_file: dir.path().join("missing.csv"), ..CatalogConfig::default() };

    assert!(matches!(init(&config), Err(CatalogError::Io { .. })));
}
