use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// One countdown step for the round identified by `round`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub round: u64,
}

/// Repeating tick task for a single round.
///
/// The task is aborted when the timer is dropped, so replacing or clearing
/// the engine's timer is enough to cancel it.
#[derive(Debug)]
pub struct RoundTimer {
    round: u64,
    handle: JoinHandle<()>,
}

impl RoundTimer {
    pub fn start(round: u64, period: Duration, tx: UnboundedSender<TimerTick>) -> Self {
        let handle = tokio::spawn(async move {
            // first tick one full period after start
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(TimerTick { round }).is_err() {
                    break;
                }
            }
        });
        Self { round, handle }
    }

    pub fn round(&self) -> u64 {
        self.round
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = RoundTimer::start(7, Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        assert_eq!(ticks, vec![TimerTick { round: 7 }; 3]);
        assert_eq!(timer.round(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = RoundTimer::start(1, Duration::from_secs(1), tx);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.try_recv().is_ok());

        drop(timer);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
