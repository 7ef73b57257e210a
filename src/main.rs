//! Terminal runner (default binary).
//!
//! One task owns the game. Gravity ticks from the tokio timer and key events
//! from the input thread arrive on the same channel, so every state change is
//! applied in order and the frame is redrawn after each event.
//!
//! Logs go to stderr; run with `RUST_LOG=info 2>game.log` to keep them off the
//! game screen.

use anyhow::Result;
use log::info;
use tokio::sync::mpsc;

use tetris_lite::core::{GameEvent, GameSnapshot, GameState, Session};
use tetris_lite::input::{handle_key_event, is_key_down, should_quit, should_restart};
use tetris_lite::runtime::{spawn_input_reader, GameConfig, HostEvent, TokioTicker};
use tetris_lite::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = GameConfig::from_env();
    info!(
        "seed={} rotation={} speed_curve={}",
        config.seed,
        config.rules.rotation.as_str(),
        config.rules.speed_curve.as_str()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config).await;

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

async fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _input = spawn_input_reader(tx.clone())?;

    let game = GameState::with_rules(config.seed, config.rules);
    let mut session = Session::new(game, TokioTicker::new(tx));
    session.start_game();

    let view = GameView::new(config.cell_width, 1);
    let (mut width, mut height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(width, height);
    let mut snap = GameSnapshot::default();

    loop {
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(width, height), &mut fb);
        term.present(&mut fb)?;

        let Some(event) = rx.recv().await else {
            return Ok(());
        };

        match event {
            HostEvent::Tick { generation } => {
                if !session.scheduler().is_current(generation) {
                    continue;
                }
                if let Some(GameEvent::GameOver { final_score }) = session.on_tick().game_over() {
                    info!("game over, final score {}", final_score);
                }
            }
            HostEvent::Key(key) => {
                if !is_key_down(&key) {
                    continue;
                }
                if should_quit(key) {
                    return Ok(());
                }
                if should_restart(key) {
                    session.start_game();
                } else if let Some(action) = handle_key_event(key) {
                    session.apply_action(action);
                }
            }
            HostEvent::Resize {
                width: w,
                height: h,
            } => {
                width = w;
                height = h;
                term.invalidate();
            }
        }
    }
}
