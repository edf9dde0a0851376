//! Round and session rules for the food guessing game
pub mod deck;
pub mod round;
pub mod session;

pub use deck::ItemDeck;
pub use round::{correct_guess_score, GuessResult, Outcome, Round, TickResult};
pub use session::{Advance, HistoryEntry, Phase, Session, Summary};

use serde::Deserialize;

/// Something to guess, as served by the item endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayableItem {
    /// Image URL
    pub image: String,
    /// Country the dish comes from
    pub country: String,
    /// Display name of the dish
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: String,
}

impl PlayableItem {
    pub fn is_from(&self, country: &str) -> bool {
        normalize_country(&self.country) == normalize_country(country)
    }
}

/// Key used whenever two country names are compared
pub fn normalize_country(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_reads_the_wire_shape() {
        let item: PlayableItem = serde_json::from_str(
            r#"{"image":"https://img/pizza.jpg","country":"Italy","name":"Pizza","type":"food"}"#,
        )
        .unwrap();
        assert_eq!(item.category, "food");
        assert!(item.is_from("  ITALY "));
        assert!(!item.is_from("Italia"));
    }
}
