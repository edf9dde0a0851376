use tracing::debug;

use super::{normalize_country, PlayableItem};
use crate::config::GameConfig;
use crate::geo::{compass_direction, BoundaryAtlas, Compass};

pub const BASE_POINTS: u32 = 100;
pub const TIME_BONUS_PER_SECOND: u32 = 2;
pub const ATTEMPT_PENALTY: u32 = 15;
pub const MIN_CORRECT_SCORE: u32 = 10;

/// Points for a correct guess.
///
/// `attempts_before` counts the guesses made before this one, so a first
/// try pays no penalty.
pub fn correct_guess_score(remaining_secs: u32, attempts_before: u32) -> u32 {
    BASE_POINTS
        .saturating_add(TIME_BONUS_PER_SECOND.saturating_mul(remaining_secs))
        .saturating_sub(ATTEMPT_PENALTY.saturating_mul(attempts_before))
        .max(MIN_CORRECT_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No guess submitted yet
    Unresolved,
    /// Last guess was wrong, more attempts left
    IncorrectOngoing,
    Correct,
    /// Every attempt used without a correct guess
    Exhausted,
    TimedOut,
}

impl Outcome {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Outcome::Unresolved | Outcome::IncorrectOngoing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    /// Nothing selected, or the round is already over
    Ignored,
    Correct { score: u32 },
    Incorrect {
        guess: String,
        hint: Option<Compass>,
        exhausted: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Ignored,
    Running { remaining: u32 },
    TimedOut,
}

/// State of one round, from the first second to resolution
#[derive(Debug, Clone)]
pub struct Round {
    item: usize,
    max_attempts: u32,
    hint_from_attempt: u32,
    selected: Option<String>,
    attempts: u32,
    remaining_secs: u32,
    outcome: Outcome,
    score: Option<u32>,
    hint: Option<Compass>,
    wrong_guesses: Vec<String>,
    revealed: bool,
}

impl Round {
    pub fn new(item: usize, config: &GameConfig) -> Self {
        Self {
            item,
            max_attempts: config.max_attempts,
            hint_from_attempt: config.hint_from_attempt,
            selected: None,
            attempts: 0,
            remaining_secs: config.round_seconds,
            outcome: Outcome::Unresolved,
            score: None,
            hint: None,
            wrong_guesses: Vec::new(),
            revealed: false,
        }
    }

    /// Replaces the current selection. Ignored once the round is over.
    pub fn select_country(&mut self, name: impl Into<String>) {
        if self.outcome.is_resolved() {
            return;
        }
        self.selected = Some(name.into());
    }

    /// Checks the selection against `item`, which must be the item this
    /// round was created for.
    pub fn submit_guess(&mut self, item: &PlayableItem, atlas: &BoundaryAtlas) -> GuessResult {
        if self.outcome.is_resolved() {
            return GuessResult::Ignored;
        }
        let Some(guess) = self.selected.clone() else {
            return GuessResult::Ignored;
        };

        let attempts_before = self.attempts;
        self.attempts += 1;

        if item.is_from(&guess) {
            let score = correct_guess_score(self.remaining_secs, attempts_before);
            self.score = Some(score);
            self.outcome = Outcome::Correct;
            self.revealed = true;
            self.hint = None;
            debug!(attempt = self.attempts, score, "correct guess");
            return GuessResult::Correct { score };
        }

        let key = normalize_country(&guess);
        if !self.wrong_guesses.iter().any(|g| normalize_country(g) == key) {
            self.wrong_guesses.push(guess.clone());
        }
        self.score = Some(0);

        if self.attempts >= self.hint_from_attempt {
            self.hint = match (atlas.centroid(&guess), atlas.centroid(&item.country)) {
                (Some(from), Some(to)) => Some(compass_direction(from, to)),
                _ => {
                    debug!(guess = %guess, truth = %item.country, "no centroid, hint withheld");
                    None
                }
            };
        }

        let exhausted = self.attempts >= self.max_attempts;
        if exhausted {
            self.outcome = Outcome::Exhausted;
            self.revealed = true;
        } else {
            self.outcome = Outcome::IncorrectOngoing;
        }
        debug!(attempt = self.attempts, guess = %guess, exhausted, "wrong guess");

        GuessResult::Incorrect {
            guess,
            hint: self.hint,
            exhausted,
        }
    }

    /// One second of countdown
    pub fn tick(&mut self) -> TickResult {
        if self.outcome.is_resolved() {
            return TickResult::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.outcome = Outcome::TimedOut;
            self.revealed = true;
            debug!(attempts = self.attempts, "round timed out");
            return TickResult::TimedOut;
        }
        TickResult::Running {
            remaining: self.remaining_secs,
        }
    }

    /// Shows the answer after a wrong guess. The round stays open and the
    /// clock keeps running. Returns whether the reveal was accepted.
    pub fn reveal(&mut self) -> bool {
        if self.outcome != Outcome::IncorrectOngoing || self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn item(&self) -> usize {
        self.item
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_resolved()
    }

    /// `None` until a guess is submitted; 0 while no guess was right
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn hint(&self) -> Option<Compass> {
        self.hint
    }

    pub fn wrong_guesses(&self) -> &[String] {
        &self.wrong_guesses
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}
