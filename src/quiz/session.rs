use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::{GuessResult, ItemDeck, Outcome, PlayableItem, Round, TickResult};
use crate::config::GameConfig;
use crate::error::DataError;
use crate::geo::BoundaryAtlas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

/// One finished round, kept for the end-of-game summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub round: u32,
    pub item: PlayableItem,
    /// Last country selected, if any
    pub guess: Option<String>,
    pub correct_country: String,
    pub correct: bool,
    /// `None` when no guess was submitted at all
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Nothing to advance: no session in progress
    Ignored,
    NextRound(u32),
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub total_score: u32,
    /// Displayed target, not a cap
    pub nominal_max: u32,
    pub correct_rounds: usize,
    pub entries: &'a [HistoryEntry],
}

/// Cross-round state: which round we are in, the running score and what
/// happened so far.
#[derive(Debug)]
pub struct Session {
    items: Vec<PlayableItem>,
    atlas: BoundaryAtlas,
    config: GameConfig,
    deck: ItemDeck,
    phase: Phase,
    round_number: u32,
    total_score: u32,
    history: Vec<HistoryEntry>,
    round: Option<Round>,
    serial: u64,
}

impl Session {
    /// Fails when there is nothing to play with
    pub fn new(
        items: Vec<PlayableItem>,
        atlas: BoundaryAtlas,
        config: GameConfig,
        seed: Option<u64>,
    ) -> Result<Self, DataError> {
        if items.is_empty() {
            return Err(DataError::Empty {
                source_ref: "item list".into(),
            });
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let deck = ItemDeck::new(items.len(), rng);

        Ok(Self {
            items,
            atlas,
            config,
            deck,
            phase: Phase::NotStarted,
            round_number: 0,
            total_score: 0,
            history: Vec::new(),
            round: None,
            serial: 0,
        })
    }

    /// Starts over from round 1, discarding any game in progress
    pub fn start_session(&mut self) {
        self.deck.reset();
        self.phase = Phase::Playing;
        self.round_number = 1;
        self.total_score = 0;
        self.history.clear();
        self.begin_round();
        info!(items = self.items.len(), rounds = self.config.rounds, "session started");
    }

    /// Records the current round and moves on. Works in any round state,
    /// so an unfinished round can be skipped.
    pub fn advance_round(&mut self) -> Advance {
        if self.phase != Phase::Playing {
            return Advance::Ignored;
        }
        let Some(round) = self.round.take() else {
            return Advance::Ignored;
        };

        let item = self.items[round.item()].clone();
        let score = round.score();
        let entry = HistoryEntry {
            round: self.round_number,
            guess: round.selected().map(str::to_owned),
            correct_country: item.country.clone(),
            correct: round.outcome() == Outcome::Correct,
            score,
            item,
        };
        self.total_score += score.unwrap_or(0);
        info!(
            round = entry.round,
            correct = entry.correct,
            score = score.unwrap_or(0),
            total = self.total_score,
            "round recorded"
        );
        self.history.push(entry);

        if self.round_number >= self.config.rounds {
            self.phase = Phase::GameOver;
            info!(total = self.total_score, "game over");
            return Advance::GameOver;
        }

        self.round_number += 1;
        self.begin_round();
        Advance::NextRound(self.round_number)
    }

    pub fn select_country(&mut self, name: impl Into<String>) {
        if let Some(round) = self.playing_round_mut() {
            round.select_country(name);
        }
    }

    pub fn submit_guess(&mut self) -> GuessResult {
        if self.phase != Phase::Playing {
            return GuessResult::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return GuessResult::Ignored;
        };
        let item = &self.items[round.item()];
        round.submit_guess(item, &self.atlas)
    }

    pub fn reveal(&mut self) -> bool {
        self.playing_round_mut().is_some_and(Round::reveal)
    }

    pub fn tick(&mut self) -> TickResult {
        match self.playing_round_mut() {
            Some(round) => round.tick(),
            None => TickResult::Ignored,
        }
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary {
            total_score: self.total_score,
            nominal_max: self.config.nominal_max_score(),
            correct_rounds: self.history.iter().filter(|h| h.correct).count(),
            entries: &self.history,
        }
    }

    /// Share of rounds already completed, 0..=100
    pub fn progress_percent(&self) -> u32 {
        match self.phase {
            Phase::NotStarted => 0,
            Phase::GameOver => 100,
            Phase::Playing => {
                let done = u64::from(self.round_number.saturating_sub(1));
                let rounds = u64::from(self.config.rounds.max(1));
                (done * 100 / rounds).min(100) as u32
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn items(&self) -> &[PlayableItem] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.round.as_ref().map(|r| &self.items[r.item()])
    }

    /// Changes every time a new round begins
    pub fn round_serial(&self) -> u64 {
        self.serial
    }

    pub fn atlas(&self) -> &BoundaryAtlas {
        &self.atlas
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn playing_round_mut(&mut self) -> Option<&mut Round> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.round.as_mut()
    }

    fn begin_round(&mut self) {
        // `new` guarantees at least one item
        let index = self.deck.draw().unwrap_or(0);
        self.round = Some(Round::new(index, &self.config));
        self.serial += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(country: &str) -> PlayableItem {
        PlayableItem {
            image: format!("{country}.jpg"),
            country: country.into(),
            name: format!("{country} dish"),
            category: "dish".into(),
        }
    }

    fn session(rounds: u32) -> Session {
        let config = GameConfig {
            rounds,
            ..GameConfig::default()
        };
        Session::new(
            vec![item("Italy"), item("Japan")],
            BoundaryAtlas::default(),
            config,
            Some(42),
        )
        .unwrap()
    }

    fn answer(s: &Session) -> String {
        s.current_item().unwrap().country.clone()
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let err = Session::new(Vec::new(), BoundaryAtlas::default(), GameConfig::default(), None);
        assert!(matches!(err, Err(DataError::Empty { .. })));
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut s = session(10);
        s.select_country("Italy");
        assert_eq!(s.submit_guess(), GuessResult::Ignored);
        assert_eq!(s.tick(), TickResult::Ignored);
        assert_eq!(s.advance_round(), Advance::Ignored);
        assert!(s.current_item().is_none());
    }

    #[test]
    fn correct_first_guess_is_recorded() {
        let mut s = session(10);
        s.start_session();
        assert_eq!(s.round_number(), 1);
        for _ in 0..15 {
            s.tick();
        }
        let truth = answer(&s);
        s.select_country(truth.clone());
        assert_eq!(s.submit_guess(), GuessResult::Correct { score: 190 });
        assert_eq!(s.advance_round(), Advance::NextRound(2));

        let entry = &s.history()[0];
        assert_eq!(entry.round, 1);
        assert!(entry.correct);
        assert_eq!(entry.score, Some(190));
        assert_eq!(entry.guess.as_deref(), Some(truth.as_str()));
        assert_eq!(s.total_score(), 190);
    }

    #[test]
    fn skipped_round_records_no_score() {
        let mut s = session(10);
        s.start_session();
        let serial = s.round_serial();
        s.advance_round();
        assert_eq!(s.history()[0].score, None);
        assert!(!s.history()[0].correct);
        assert_eq!(s.total_score(), 0);
        assert_ne!(s.round_serial(), serial);
    }

    #[test]
    fn game_ends_after_the_last_round() {
        let mut s = session(3);
        s.start_session();
        assert_eq!(s.advance_round(), Advance::NextRound(2));
        assert_eq!(s.advance_round(), Advance::NextRound(3));
        assert_eq!(s.progress_percent(), 66);
        assert!(!s.is_game_over());
        assert_eq!(s.advance_round(), Advance::GameOver);
        assert!(s.is_game_over());
        assert_eq!(s.round_number(), 3);
        assert_eq!(s.history().len(), 3);
        assert_eq!(s.advance_round(), Advance::Ignored);
        assert_eq!(s.progress_percent(), 100);
    }

    #[test]
    fn items_alternate_within_a_pass() {
        let mut s = session(10);
        s.start_session();
        let first = answer(&s);
        s.advance_round();
        assert_ne!(answer(&s), first);
    }

    #[test]
    fn restart_clears_the_previous_game() {
        let mut s = session(2);
        s.start_session();
        let truth = answer(&s);
        s.select_country(truth);
        s.submit_guess();
        s.advance_round();
        s.advance_round();
        assert!(s.is_game_over());

        s.start_session();
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.round_number(), 1);
        assert_eq!(s.total_score(), 0);
        assert!(s.history().is_empty());
    }

    #[test]
    fn answer_can_still_be_guessed_after_reveal() {
        let mut s = session(10);
        s.start_session();
        s.select_country("Atlantis");
        s.submit_guess();
        assert!(s.reveal());

        let truth = answer(&s);
        s.select_country(truth);
        // second attempt, full clock: 100 + 120 - 15
        assert_eq!(s.submit_guess(), GuessResult::Correct { score: 205 });
        s.advance_round();
        assert!(s.history()[0].correct);
        assert_eq!(s.total_score(), 205);
    }

    #[test]
    fn summary_counts_correct_rounds() {
        let mut s = session(2);
        s.start_session();
        let truth = answer(&s);
        s.select_country(truth);
        s.submit_guess();
        s.advance_round();
        s.select_country("Atlantis");
        s.submit_guess();
        s.advance_round();

        let summary = s.summary();
        assert_eq!(summary.correct_rounds, 1);
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.entries[1].score, Some(0));
        assert_eq!(summary.nominal_max, 200);
        assert_eq!(summary.total_score, 220);
    }
}
