use super::game::{Feedback, FoodGuessGame};
use crate::quiz::{normalize_country, Phase, Round};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

/// Turns the first two letters of a country name into a flag.
///
/// This only lines up with ISO codes by luck ("Italy" → IT, "Japan" → JA is
/// not a flag), so callers should treat it as decoration.
pub fn flag_emoji(country: &str) -> String {
    let code: Vec<char> = country
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .take(2)
        .collect();
    if code.len() != 2 {
        return String::new();
    }
    code.iter()
        .filter_map(|&c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

#[derive(Debug)]
pub struct FoodGuessRenderer;

impl FoodGuessRenderer {
    pub fn render(frame: &mut Frame, game: &FoodGuessGame) {
        match game.session().phase() {
            Phase::NotStarted => Self::render_welcome(frame, game),
            Phase::Playing => Self::render_round(frame, game),
            Phase::GameOver => Self::render_summary(frame, game),
        }
    }

    fn render_welcome(frame: &mut Frame, game: &FoodGuessGame) {
        let config = game.session().config();
        let text = format!(
            "▶️  Food Guess\n\n\
             Try to guess which country each dish is from!\n\n\
             {} rounds, {} attempts and {} seconds per round.\n\
             From the second wrong guess you get a compass hint.\n\n\
             Press Enter to start, Esc to quit",
            config.rounds, config.max_attempts, config.round_seconds
        );
        let welcome = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" LOC8ABITE "))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(welcome, frame.area());
    }

    fn render_round(frame: &mut Frame, game: &FoodGuessGame) {
        let session = game.session();
        let (Some(round), Some(item)) = (session.round(), session.current_item()) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress
                Constraint::Length(5), // Dish
                Constraint::Length(3), // Status
                Constraint::Min(5),    // Countries
                Constraint::Length(3), // Feedback
                Constraint::Length(1), // Keys
            ])
            .split(frame.area());

        let progress = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                " Round {}/{} ",
                session.round_number(),
                session.config().rounds
            )))
            .gauge_style(Style::default().fg(Color::LightBlue))
            .percent(session.progress_percent().min(100) as u16);
        frame.render_widget(progress, chunks[0]);

        let dish = Paragraph::new(vec![
            Line::from(Span::styled(
                item.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Category: {}", item.category)),
            Line::from(Span::styled(item.image.clone(), Style::default().fg(Color::DarkGray))),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Where is this from? "))
        .wrap(Wrap { trim: true });
        frame.render_widget(dish, chunks[1]);

        frame.render_widget(Self::status_line(round, session.total_score()), chunks[2]);
        Self::render_countries(frame, chunks[3], game, round, &item.country);

        let feedback = game.feedback().map(Feedback::message).unwrap_or_default();
        let feedback_style = match game.feedback() {
            Some(Feedback::Correct { .. }) => Style::default().fg(Color::Green),
            Some(Feedback::Incorrect { .. }) => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::Yellow),
        };
        let feedback = Paragraph::new(feedback)
            .block(Block::default().borders(Borders::ALL))
            .style(feedback_style);
        frame.render_widget(feedback, chunks[4]);

        let next = if session.round_number() < session.config().rounds {
            "next round"
        } else {
            "finish"
        };
        let keys = format!(
            "type to filter · ↑↓ move · Tab select · Enter guess · Ctrl-R reveal · Ctrl-N {next} · Esc quit"
        );
        frame.render_widget(
            Paragraph::new(keys).style(Style::default().fg(Color::Gray)),
            chunks[5],
        );
    }

    fn status_line(round: &Round, total: u32) -> Paragraph<'static> {
        let timer_style = if round.remaining_secs() <= 10 {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(format!("⏰ {}s", round.remaining_secs()), timer_style),
            Span::raw("   "),
            Span::styled(format!("🏆 {total} pts"), Style::default().fg(Color::LightBlue)),
            Span::raw("   "),
            Span::raw(format!("{}/{} attempts", round.attempts(), round.max_attempts())),
        ];
        if let Some(selected) = round.selected() {
            spans.push(Span::raw(format!("   selected: {selected}")));
        }
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL))
    }

    fn render_countries(
        frame: &mut Frame,
        area: Rect,
        game: &FoodGuessGame,
        round: &Round,
        answer: &str,
    ) {
        let wrong: Vec<String> = round.wrong_guesses().iter().map(|w| normalize_country(w)).collect();
        let answer = normalize_country(answer);
        let selected = round.selected().map(normalize_country);

        let items: Vec<ListItem> = game
            .visible_countries()
            .into_iter()
            .map(|country| {
                let key = normalize_country(country);
                let style = if round.is_revealed() && key == answer {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else if wrong.contains(&key) {
                    Style::default().fg(Color::Red)
                } else if selected.as_deref() == Some(key.as_str()) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(country.to_string()).style(style)
            })
            .collect();

        let title = if game.filter().is_empty() {
            " Countries ".to_string()
        } else {
            format!(" Countries matching '{}' ", game.filter())
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("▶ ");
        let mut state = ListState::default().with_selected(Some(game.cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_summary(frame: &mut Frame, game: &FoodGuessGame) {
        let summary = game.session().summary();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Total
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Keys
            ])
            .split(frame.area());

        let header = Paragraph::new(format!(
            "🎉 Game over! Total score: {}/{}  ({} of {} correct)",
            summary.total_score,
            summary.nominal_max,
            summary.correct_rounds,
            summary.entries.len()
        ))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let rows = summary.entries.iter().map(|entry| {
            let guess_style = if entry.correct {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            let guess = match &entry.guess {
                Some(g) => format!("{} {}", flag_emoji(g), g),
                None => "None".to_string(),
            };
            Row::new(vec![
                Cell::from(entry.round.to_string()),
                Cell::from(entry.item.name.clone()),
                Cell::from(guess).style(guess_style),
                Cell::from(format!(
                    "{} {}",
                    flag_emoji(&entry.correct_country),
                    entry.correct_country
                ))
                .style(Style::default().fg(Color::Green)),
                Cell::from(entry.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into())),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(30),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["Round", "Dish", "Your answer", "Correct answer", "Points"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
        frame.render_widget(table, chunks[1]);

        frame.render_widget(
            Paragraph::new("Enter to play again · Esc to quit")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            chunks[2],
        );
    }
}
