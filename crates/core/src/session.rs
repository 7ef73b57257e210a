//! Session module - drives a [`GameState`] from a recurring tick
//!
//! The engine never owns a timer. A [`TickScheduler`] is the port the host
//! implements (a tokio interval in the terminal binary, a recorder in tests);
//! the [`Session`] decides when that timer is installed, reinstalled at a new
//! interval, or cancelled:
//!
//! - `start_game` cancels any pending timer and installs one at the fresh
//!   interval
//! - a lock that changes the interval reinstalls it
//! - game over cancels it until the next `start_game`

use log::{debug, info};

use crate::game_state::{GameState, TickOutcome};
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

/// Cancellable repeating tick, implemented by the host
pub trait TickScheduler {
    /// Start delivering ticks every `interval_ms`, replacing any previous timer
    fn install(&mut self, interval_ms: u32);

    /// Stop delivering ticks
    fn cancel(&mut self);
}

impl<S: TickScheduler + ?Sized> TickScheduler for &mut S {
    fn install(&mut self, interval_ms: u32) {
        (**self).install(interval_ms)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// A game plus the timer that drives it
#[derive(Debug)]
pub struct Session<S: TickScheduler> {
    game: GameState,
    scheduler: S,
    /// Interval currently installed, `None` when no timer runs.
    installed_ms: Option<u32>,
}

impl<S: TickScheduler> Session<S> {
    pub fn new(game: GameState, scheduler: S) -> Self {
        Self {
            game,
            scheduler,
            installed_ms: None,
        }
    }

    /// Start (or restart) a game and install a fresh timer
    pub fn start_game(&mut self) -> GameSnapshot {
        self.cancel_timer();
        let snapshot = self.game.start_game();
        self.install_timer(snapshot.tick_interval_ms);
        snapshot
    }

    /// Handle one timer tick
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.game.tick();
        match outcome {
            TickOutcome::GameOver { final_score } => {
                info!("session stopped, final score {}", final_score);
                self.cancel_timer();
            }
            TickOutcome::Locked(_) => {
                let interval = self.game.tick_interval_ms();
                if self.installed_ms != Some(interval) {
                    self.install_timer(interval);
                }
            }
            TickOutcome::Fell | TickOutcome::Ignored => {}
        }
        outcome
    }

    /// Apply an input action; ignored unless a piece is falling
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        self.game.apply_action(action)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Interval of the running timer, `None` when stopped
    pub fn installed_interval_ms(&self) -> Option<u32> {
        self.installed_ms
    }

    fn install_timer(&mut self, interval_ms: u32) {
        debug!("tick timer installed at {}ms", interval_ms);
        self.scheduler.install(interval_ms);
        self.installed_ms = Some(interval_ms);
    }

    fn cancel_timer(&mut self) {
        if self.installed_ms.take().is_some() {
            debug!("tick timer cancelled");
        }
        self.scheduler.cancel();
    }
}
