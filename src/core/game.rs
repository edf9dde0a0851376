//! Core screen interface driven by the engine loop
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::timer::TimerTick;

/// Requests a game makes to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Start (or replace) the countdown for round `serial`
    StartTimer { serial: u64 },
    StopTimer,
    Quit,
}

/// Handle passed to every game callback
#[derive(Debug, Clone)]
pub struct Context {
    pub tx: UnboundedSender<EngineCommand>,
}

impl Context {
    pub fn start_timer(&self, serial: u64) {
        let _ = self.tx.send(EngineCommand::StartTimer { serial });
    }

    pub fn stop_timer(&self) {
        let _ = self.tx.send(EngineCommand::StopTimer);
    }

    pub fn quit(&self) {
        let _ = self.tx.send(EngineCommand::Quit);
    }
}

/// Main trait the engine runs
pub trait Game {
    /// Spacing between timer ticks
    fn tick_period(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn on_start(&mut self, _ctx: &Context) {}

    /// Only called for ticks of the timer that is currently running
    fn on_tick(&mut self, tick: TimerTick, ctx: &Context);

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context);

    fn render(&self, frame: &mut ratatui::Frame);
}
