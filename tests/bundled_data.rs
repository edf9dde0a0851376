use loc8abite::data;

const ITEMS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/foods.json");
const BOUNDARIES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/countries.geo.json");
const RULES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/rules.toml");

#[tokio::test]
async fn every_bundled_dish_has_a_locatable_country() {
    let items = data::load_items(ITEMS).await.unwrap();
    let atlas = data::load_atlas(BOUNDARIES).await.unwrap();
    assert!(!items.is_empty());
    for item in &items {
        assert!(atlas.centroid(&item.country).is_some(), "{} has no outline", item.country);
    }
}

#[test]
fn bundled_rules_load() {
    let config = loc8abite::config::GameConfig::load(std::path::Path::new(RULES)).unwrap();
    assert_eq!(config.rounds, 5);
    assert_eq!(config.round_seconds, 45);
    assert_eq!(config.max_attempts, 5);
}
