//! Loading of playable items and country boundaries
use std::path::PathBuf;

use tracing::info;

use crate::error::DataError;
use crate::geo::BoundaryAtlas;
use crate::quiz::PlayableItem;

pub const DEFAULT_ITEMS_SOURCE: &str = "data/foods.json";
pub const DEFAULT_BOUNDARIES_SOURCE: &str = "data/countries.geo.json";

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads `source` whole, over HTTP for URLs and from disk otherwise
pub async fn fetch_text(source: &str) -> Result<String, DataError> {
    if is_url(source) {
        let fetch_err = |e| DataError::Fetch {
            source_ref: source.to_string(),
            source: e,
        };
        let response = reqwest::get(source).await.map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                source_ref: source.to_string(),
                status,
            });
        }
        response.text().await.map_err(fetch_err)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| DataError::Read {
                path: PathBuf::from(source),
                source: e,
            })
    }
}

pub fn parse_items(source: &str, text: &str) -> Result<Vec<PlayableItem>, DataError> {
    let items: Vec<PlayableItem> =
        serde_json::from_str(text).map_err(|e| DataError::Malformed {
            source_ref: source.to_string(),
            source: e,
        })?;
    if items.is_empty() {
        return Err(DataError::Empty {
            source_ref: source.to_string(),
        });
    }
    Ok(items)
}

pub async fn load_items(source: &str) -> Result<Vec<PlayableItem>, DataError> {
    let text = fetch_text(source).await?;
    let items = parse_items(source, &text)?;
    info!(source, count = items.len(), "loaded items");
    Ok(items)
}

pub async fn load_atlas(source: &str) -> Result<BoundaryAtlas, DataError> {
    let text = fetch_text(source).await?;
    let atlas = BoundaryAtlas::from_geojson(&text).map_err(|e| DataError::Malformed {
        source_ref: source.to_string(),
        source: e,
    })?;
    info!(source, countries = atlas.len(), "loaded boundaries");
    Ok(atlas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_told_apart_from_paths() {
        assert!(!is_url(DEFAULT_ITEMS_SOURCE));
        assert!(is_url("http://localhost:4000/api/wikidata/food"));
        assert!(is_url("https://example.org/food.json"));
        assert!(!is_url(DEFAULT_BOUNDARIES_SOURCE));
    }

    #[test]
    fn empty_item_list_is_unplayable() {
        assert!(matches!(parse_items("x", "[]"), Err(DataError::Empty { .. })));
        assert!(matches!(parse_items("x", "{}"), Err(DataError::Malformed { .. })));
    }

    #[tokio::test]
    async fn default_sources_load_offline() {
        let items = load_items(DEFAULT_ITEMS_SOURCE).await.unwrap();
        let atlas = load_atlas(DEFAULT_BOUNDARIES_SOURCE).await.unwrap();
        assert!(!items.is_empty());
        assert!(!atlas.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = load_atlas("definitely/not/here.geo.json").await.unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
    }
}
