use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::core::game::{Context, Game};
use crate::core::timer::TimerTick;
use crate::geo::Compass;
use crate::quiz::{normalize_country, Advance, GuessResult, Phase, Session, TickResult};

/// What the last action did, shown under the country list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    NoSelection,
    Correct { score: u32 },
    Incorrect { guess: String, hint: Option<Compass> },
    Exhausted { answer: String },
    TimedOut { answer: String },
    Revealed { answer: String },
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::NoSelection => "Pick a country first (↑/↓ then Enter)".to_string(),
            Feedback::Correct { score } => format!("🎉 Correct! You guessed the country. +{score} points"),
            Feedback::Incorrect { guess, hint: Some(dir) } => {
                format!("❌ Wrong, it's not {guess}! Try {dir}")
            }
            Feedback::Incorrect { guess, hint: None } => format!("❌ Wrong, it's not {guess}!"),
            Feedback::Exhausted { answer } => format!("Out of attempts. The correct country is {answer}"),
            Feedback::TimedOut { answer } => format!("⏰ Time's up! The correct country is {answer}"),
            Feedback::Revealed { answer } => format!("The correct country is {answer}"),
        }
    }
}

/// Terminal front end for a food guessing session
pub struct FoodGuessGame {
    session: Session,
    countries: Vec<String>,
    filter: String,
    cursor: usize,
    feedback: Option<Feedback>,
}

impl FoodGuessGame {
    pub fn new(session: Session) -> Self {
        let countries = pick_list(&session);
        Self {
            session,
            countries,
            filter: String::new(),
            cursor: 0,
            feedback: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Countries matching the filter, in list order
    pub fn visible_countries(&self) -> Vec<&str> {
        let needle = normalize_country(&self.filter);
        self.countries
            .iter()
            .map(String::as_str)
            .filter(|c| c.to_lowercase().contains(&needle))
            .collect()
    }

    fn highlighted(&self) -> Option<String> {
        self.visible_countries().get(self.cursor).map(|c| c.to_string())
    }

    fn start(&mut self, ctx: &Context) {
        self.session.start_session();
        self.reset_round_view();
        ctx.start_timer(self.session.round_serial());
    }

    fn reset_round_view(&mut self) {
        self.filter.clear();
        self.cursor = 0;
        self.feedback = None;
    }

    fn answer(&self) -> String {
        self.session
            .current_item()
            .map(|item| item.country.clone())
            .unwrap_or_default()
    }

    fn submit(&mut self, ctx: &Context) {
        if let Some(country) = self.highlighted() {
            self.session.select_country(country);
        }
        match self.session.submit_guess() {
            GuessResult::Ignored => {
                let resolved = self.session.round().is_some_and(|r| r.is_resolved());
                if !resolved {
                    self.feedback = Some(Feedback::NoSelection);
                }
            }
            GuessResult::Correct { score } => {
                ctx.stop_timer();
                self.feedback = Some(Feedback::Correct { score });
            }
            GuessResult::Incorrect { exhausted: true, .. } => {
                ctx.stop_timer();
                self.feedback = Some(Feedback::Exhausted { answer: self.answer() });
            }
            GuessResult::Incorrect { guess, hint, .. } => {
                self.feedback = Some(Feedback::Incorrect { guess, hint });
            }
        }
    }

    fn reveal(&mut self) {
        if self.session.reveal() {
            self.feedback = Some(Feedback::Revealed { answer: self.answer() });
        }
    }

    fn advance(&mut self, ctx: &Context) {
        ctx.stop_timer();
        match self.session.advance_round() {
            Advance::NextRound(round) => {
                debug!(round, "next round");
                self.reset_round_view();
                ctx.start_timer(self.session.round_serial());
            }
            Advance::GameOver => {
                info!(total = self.session.total_score(), "final score");
                self.feedback = None;
            }
            Advance::Ignored => {}
        }
    }

    fn handle_play_key(&mut self, event: KeyEvent, ctx: &Context) {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('r') if ctrl => self.reveal(),
            KeyCode::Char('n') if ctrl => self.advance(ctx),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.cursor = 0;
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.cursor = 0;
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                let last = self.visible_countries().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Tab => {
                if let Some(country) = self.highlighted() {
                    self.session.select_country(country);
                }
            }
            KeyCode::Enter => self.submit(ctx),
            _ => {}
        }
    }
}

impl Game for FoodGuessGame {
    fn on_tick(&mut self, tick: TimerTick, ctx: &Context) {
        if tick.round != self.session.round_serial() {
            return;
        }
        match self.session.tick() {
            TickResult::Running { .. } => {}
            TickResult::TimedOut => {
                ctx.stop_timer();
                self.feedback = Some(Feedback::TimedOut { answer: self.answer() });
            }
            TickResult::Ignored => ctx.stop_timer(),
        }
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context) {
        match self.session.phase() {
            Phase::NotStarted | Phase::GameOver => {
                if event.code == KeyCode::Enter {
                    self.start(ctx);
                }
            }
            Phase::Playing => self.handle_play_key(event, ctx),
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        super::renderer::FoodGuessRenderer::render(frame, self);
    }
}

/// Boundary countries plus any item country the boundaries lack, sorted
fn pick_list(session: &Session) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut countries: Vec<String> = session
        .atlas()
        .country_names()
        .map(str::to_owned)
        .chain(session.items().iter().map(|i| i.country.clone()))
        .filter(|c| seen.insert(normalize_country(c)))
        .collect();
    countries.sort_by_key(|c| c.to_lowercase());
    countries
}
