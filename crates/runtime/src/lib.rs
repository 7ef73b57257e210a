//! Host runtime for the terminal game.
//!
//! Everything here is async or threaded plumbing around the pure engine:
//! environment configuration, a tokio-backed [`TickScheduler`] and the
//! blocking terminal input reader. All of it reports into one
//! [`HostEvent`] channel consumed by the binary's main loop.
//!
//! [`TickScheduler`]: tetris_lite_core::TickScheduler

pub mod config;
pub mod events;
pub mod ticker;

pub use config::GameConfig;
pub use events::{spawn_input_reader, HostEvent};
pub use ticker::TokioTicker;
