use crate::core::game::{Context, EngineCommand, Game};
use crate::core::timer::{RoundTimer, TimerTick};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

const FRAME: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
    timer: Option<RoundTimer>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game, timer: None }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // commands from the game, ticks from the round timer
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<EngineCommand>();
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<TimerTick>();
        let ctx = Context { tx: cmd_tx };

        self.game.on_start(&ctx);

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // 1. INPUT (non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Esc {
                            break;
                        }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }

            tokio::select! {
                // 2. COMMANDS: timer start/stop or quit, sent through ctx
                Some(cmd) = cmd_rx.recv() => {
                    if !self.apply(cmd, &tick_tx) {
                        break;
                    }
                }

                // 3. TICK: one second of the round clock
                Some(tick) = tick_rx.recv() => {
                    if self.accepts(tick) {
                        self.game.on_tick(tick, &ctx);
                    } else {
                        debug!(round = tick.round, "dropping stale tick");
                    }
                }

                _ = tokio::time::sleep(FRAME) => {}
            }
        }

        self.timer = None;
        Ok(())
    }

    /// Returns false when the engine should stop
    fn apply(&mut self, cmd: EngineCommand, tick_tx: &UnboundedSender<TimerTick>) -> bool {
        match cmd {
            EngineCommand::StartTimer { serial } => {
                let period = self.game.tick_period();
                // replacing the old timer aborts it
                self.timer = Some(RoundTimer::start(serial, period, tick_tx.clone()));
                debug!(serial, "timer started");
            }
            EngineCommand::StopTimer => {
                if self.timer.take().is_some() {
                    debug!("timer stopped");
                }
            }
            EngineCommand::Quit => return false,
        }
        true
    }

    fn accepts(&self, tick: TimerTick) -> bool {
        self.timer.as_ref().is_some_and(|t| t.round() == tick.round)
    }
}
