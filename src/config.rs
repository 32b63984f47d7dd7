use std::time::Duration;

use tracing::warn;

use crate::engine::types::{Color, Difficulty};

/// Runtime configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tier used when a game mode does not name one.
    pub default_difficulty: Difficulty,
    /// Pause before the computer answers a human move, in milliseconds.
    pub reply_delay_ms: u64,
    /// Side the computer plays in a human-vs-computer game.
    pub computer_side: Color,
    /// Fixed RNG seed for reproducible games; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Ply limit for the self-play driver.
    pub max_plies: u32,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Unparsable values fall back to the
    /// default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        AppConfig {
            default_difficulty: parse_var(
                &lookup,
                "CHESS_AI_DEFAULT_DIFFICULTY",
                Difficulty::from_str_loose,
            )
            .unwrap_or(defaults.default_difficulty),
            reply_delay_ms: parse_var(&lookup, "CHESS_REPLY_DELAY_MS", |v| v.trim().parse().ok())
                .unwrap_or(defaults.reply_delay_ms),
            computer_side: parse_var(&lookup, "CHESS_COMPUTER_SIDE", Color::from_str_loose)
                .unwrap_or(defaults.computer_side),
            seed: parse_var(&lookup, "CHESS_AI_SEED", |v| v.trim().parse().ok()),
            max_plies: parse_var(&lookup, "CHESS_MAX_PLIES", |v| v.trim().parse().ok())
                .unwrap_or(defaults.max_plies),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_difficulty: Difficulty::Medium,
            reply_delay_ms: 500,
            computer_side: Color::Black,
            seed: None,
            max_plies: 200,
        }
    }
}

fn parse_var<T, L, P>(lookup: &L, key: &str, parse: P) -> Option<T>
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let raw = lookup(key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warn!(key, value = %raw, "ignoring unparsable config value");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_difficulty, Difficulty::Medium);
        assert_eq!(config.reply_delay_ms, 500);
        assert_eq!(config.computer_side, Color::Black);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_plies, 200);
        assert_eq!(config.reply_delay(), Duration::from_millis(500));
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn values_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CHESS_AI_DEFAULT_DIFFICULTY", " Hard "),
            ("CHESS_REPLY_DELAY_MS", "0"),
            ("CHESS_COMPUTER_SIDE", "WHITE"),
            ("CHESS_AI_SEED", "1234"),
            ("CHESS_MAX_PLIES", "40"),
        ]));
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.reply_delay_ms, 0);
        assert_eq!(config.computer_side, Color::White);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.max_plies, 40);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CHESS_AI_DEFAULT_DIFFICULTY", "grandmaster"),
            ("CHESS_REPLY_DELAY_MS", "-5"),
            ("CHESS_COMPUTER_SIDE", "green"),
            ("CHESS_AI_SEED", "abc"),
        ]));
        assert_eq!(config.default_difficulty, Difficulty::Medium);
        assert_eq!(config.reply_delay_ms, 500);
        assert_eq!(config.computer_side, Color::Black);
        assert_eq!(config.seed, None);
    }
}
