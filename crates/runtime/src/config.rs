//! Game configuration read from `TETRIS_*` environment variables.
//!
//! | Variable             | Values                  | Default     |
//! |----------------------|-------------------------|-------------|
//! | `TETRIS_SEED`        | `u32`                   | random      |
//! | `TETRIS_ROTATION`    | `checked`, `unchecked`  | `checked`   |
//! | `TETRIS_SPEED_CURVE` | `tiered`, `legacy`      | `tiered`    |
//! | `TETRIS_CELL_WIDTH`  | `1..=4`                 | `2`         |
//!
//! A value that does not parse is logged and replaced by its default.

use log::warn;

use tetris_lite_core::{RotationMode, Rules, SpeedCurve};

pub const DEFAULT_CELL_WIDTH: u16 = 2;
const MAX_CELL_WIDTH: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub seed: u32,
    pub rules: Rules,
    /// Terminal columns per board cell.
    pub cell_width: u16,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match var("TETRIS_SEED") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("TETRIS_SEED={:?} is not a u32, using a random seed", raw);
                rand::random()
            }),
            None => rand::random(),
        };

        let rotation = var("TETRIS_ROTATION")
            .map(|raw| {
                raw.parse::<RotationMode>().unwrap_or_else(|err| {
                    warn!("TETRIS_ROTATION: {}, using checked", err);
                    RotationMode::default()
                })
            })
            .unwrap_or_default();

        let speed_curve = var("TETRIS_SPEED_CURVE")
            .map(|raw| {
                raw.parse::<SpeedCurve>().unwrap_or_else(|err| {
                    warn!("TETRIS_SPEED_CURVE: {}, using tiered", err);
                    SpeedCurve::default()
                })
            })
            .unwrap_or_default();

        let cell_width = match var("TETRIS_CELL_WIDTH") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(w) if (1..=MAX_CELL_WIDTH).contains(&w) => w,
                _ => {
                    warn!(
                        "TETRIS_CELL_WIDTH={:?} out of range 1..={}, using {}",
                        raw, MAX_CELL_WIDTH, DEFAULT_CELL_WIDTH
                    );
                    DEFAULT_CELL_WIDTH
                }
            },
            None => DEFAULT_CELL_WIDTH,
        };

        Self {
            seed,
            rules: Rules {
                rotation,
                speed_curve,
            },
            cell_width,
        }
    }
}
