use atlas::domain::config::ApiConfig;
use atlas::features::catalog::Catalog;
use atlas::features::lists::ListRegistry;
use atlas::kernel::domain::config::CatalogConfig;

#[test]
fn init_builds_every_slice_from_an_injected_catalog() {
    let catalog = Catalog::from_reader(
        "Destination,Country\nGhent,Belgium\n".as_bytes(),
        &CatalogConfig::default(),
    )
    .expect("catalog");

    let slices = atlas::init(&ApiConfig::default(), Some(catalog)).expect("slices");

    assert_eq!(slices.len(), 2);
    assert!(slices.iter().any(|slice| slice.downcast_ref::<Catalog>().is_some()));
    assert!(slices.iter().any(|slice| slice.downcast_ref::<ListRegistry>().is_some()));
}

#[test]
fn init_fails_when_the_data_file_is_missing() {
    let mut config = ApiConfig::default();
    config.catalog.data_file = "no/such/destinations.csv".into();

    assert!(atlas::init(&config, None).is_err());
}

#[test]
fn features_are_listed() {
    assert!(atlas::features::is_enabled("catalog"));
    assert!(atlas::features::is_enabled("lists"));
    assert!(!atlas::features::is_enabled("billing"));
}
