//! Host events and the terminal input reader.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

/// How long the reader blocks before re-checking whether the loop is gone.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Gravity tick from a [`TokioTicker`](crate::TokioTicker) generation.
    Tick { generation: u64 },
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// Read terminal events on a dedicated thread and forward them to `tx`.
///
/// Crossterm's reader is blocking, so it lives on a plain OS thread rather
/// than the tokio pool; the thread exits once the receiver is dropped.
pub fn spawn_input_reader(tx: UnboundedSender<HostEvent>) -> Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("tetris-input".into())
        .spawn(move || {
            while !tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(err) => {
                        warn!("input poll failed: {}", err);
                        break;
                    }
                }

                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => HostEvent::Key(key),
                    Ok(Event::Resize(width, height)) => HostEvent::Resize { width, height },
                    Ok(_) => continue,
                    Err(err) => {
                        warn!("input read failed: {}", err);
                        break;
                    }
                };

                if tx.send(forwarded).is_err() {
                    break;
                }
            }
            debug!("input reader stopped");
        })?;
    Ok(handle)
}
