//! Scoring module - score, level and fall speed
//!
//! Each cleared line is worth a flat [`POINTS_PER_LINE`]; there are no
//! multi-line bonuses. The level is derived from the score alone and the
//! tick interval from the level.
//!
//! Compatibility note:
//! An earlier rule set compared the *level* against the score thresholds
//! (100/300) when picking the interval, so the interval never left 500ms.
//! That behavior is kept as [`legacy_tick_interval_ms`] and selectable via
//! [`SpeedCurve::Legacy`].

use std::str::FromStr;

use crate::game_state::ParseRuleError;
use crate::types::{
    LEVEL_1_TICK_MS, LEVEL_2_SCORE, LEVEL_2_TICK_MS, LEVEL_3_SCORE, LEVEL_3_TICK_MS,
    POINTS_PER_LINE,
};

/// Points for clearing `lines` rows at once
pub fn line_clear_points(lines: u32) -> u32 {
    lines.saturating_mul(POINTS_PER_LINE)
}

/// Level for a score: 3 from 300, 2 from 100, otherwise 1
pub fn compute_level(score: u32) -> u32 {
    if score >= LEVEL_3_SCORE {
        3
    } else if score >= LEVEL_2_SCORE {
        2
    } else {
        1
    }
}

/// Tick interval for a level: 100ms at 3+, 250ms at 2, otherwise 500ms
pub fn compute_tick_interval_ms(level: u32) -> u32 {
    if level >= 3 {
        LEVEL_3_TICK_MS
    } else if level == 2 {
        LEVEL_2_TICK_MS
    } else {
        LEVEL_1_TICK_MS
    }
}

/// Tick interval with the score thresholds applied to the level value
///
/// Only reaches the faster tiers for raw values of 100 and above, so every
/// reachable level (1..=3) gets 500ms.
pub fn legacy_tick_interval_ms(level: u32) -> u32 {
    if level >= LEVEL_3_SCORE {
        LEVEL_3_TICK_MS
    } else if level >= LEVEL_2_SCORE {
        LEVEL_2_TICK_MS
    } else {
        LEVEL_1_TICK_MS
    }
}

/// How the tick interval follows the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedCurve {
    /// 500 / 250 / 100 ms for levels 1 / 2 / 3
    #[default]
    Tiered,
    /// Constant 500ms for every reachable level
    Legacy,
}

impl SpeedCurve {
    pub fn interval_ms(&self, level: u32) -> u32 {
        match self {
            SpeedCurve::Tiered => compute_tick_interval_ms(level),
            SpeedCurve::Legacy => legacy_tick_interval_ms(level),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedCurve::Tiered => "tiered",
            SpeedCurve::Legacy => "legacy",
        }
    }
}

/// Parses "tiered" / "legacy", case-insensitive
impl FromStr for SpeedCurve {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiered" => Ok(SpeedCurve::Tiered),
            "legacy" => Ok(SpeedCurve::Legacy),
            _ => Err(ParseRuleError::new("speed curve", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_level_thresholds() {
        assert_eq!(compute_level(0), 1);
        assert_eq!(compute_level(99), 1);
        assert_eq!(compute_level(100), 2);
        assert_eq!(compute_level(299), 2);
        assert_eq!(compute_level(300), 3);
        assert_eq!(compute_level(10_000), 3);
    }

    #[test]
    fn test_level_is_monotonic_in_score() {
        let mut prev = compute_level(0);
        for score in (0..1000).step_by(100) {
            let level = compute_level(score);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn test_tiered_intervals() {
        assert_eq!(compute_tick_interval_ms(1), 500);
        assert_eq!(compute_tick_interval_ms(2), 250);
        assert_eq!(compute_tick_interval_ms(3), 100);
    }

    #[test]
    fn test_legacy_intervals_never_speed_up_for_real_levels() {
        // Reachable levels all stay at 500ms under the legacy rule.
        for level in 1..=3 {
            assert_eq!(legacy_tick_interval_ms(level), 500);
        }
        // Only raw values at the score thresholds reach the faster tiers.
        assert_eq!(legacy_tick_interval_ms(100), 250);
        assert_eq!(legacy_tick_interval_ms(300), 100);
    }

    #[test]
    fn test_speed_curve_dispatch() {
        assert_eq!(SpeedCurve::Tiered.interval_ms(3), 100);
        assert_eq!(SpeedCurve::Legacy.interval_ms(3), 500);
        assert_eq!(SpeedCurve::default(), SpeedCurve::Tiered);
    }

    #[test]
    fn test_speed_curve_parse() {
        assert_eq!("Legacy".parse::<SpeedCurve>(), Ok(SpeedCurve::Legacy));
        assert_eq!(" tiered ".parse::<SpeedCurve>(), Ok(SpeedCurve::Tiered));
        let err = "fast".parse::<SpeedCurve>().unwrap_err();
        assert_eq!(err.to_string(), "unknown speed curve \"fast\"");
    }

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(4), 400);
    }
}
