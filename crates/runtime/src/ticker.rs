//! Tokio-backed gravity timer.
//!
//! Each `install` spawns an interval task tagged with a fresh generation.
//! Ticks already queued by a replaced or cancelled task still arrive on the
//! channel, so the loop must drop any tick for which `is_current` is false.

use log::trace;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

use tetris_lite_core::TickScheduler;

use crate::events::HostEvent;

#[derive(Debug)]
pub struct TokioTicker {
    tx: UnboundedSender<HostEvent>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl TokioTicker {
    pub fn new(tx: UnboundedSender<HostEvent>) -> Self {
        Self {
            tx,
            task: None,
            generation: 0,
        }
    }

    /// Whether a tick tagged `generation` comes from the running timer.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }
}

impl TickScheduler for TokioTicker {
    /// Must be called from within a tokio runtime.
    fn install(&mut self, interval_ms: u32) {
        self.stop();

        let generation = self.generation;
        let period = Duration::from_millis(interval_ms.max(1) as u64);
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            // First tick one full period after install.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!("tick generation {}", generation);
                if tx.send(HostEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        self.stop();
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
