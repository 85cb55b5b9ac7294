//! Client configuration structures and loaders.
use std::env;

/// Settings for the headless match driver.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Print events as JSON lines instead of prose.
    pub json_events: bool,
    /// Also write logs to a file under the platform cache directory.
    pub log_file: bool,
    /// Hand-offs after which an undecided match is abandoned.
    pub max_turns: u32,
}

impl ClientConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 200;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_JSON_EVENTS` - Print events as JSON lines (default: false)
    /// - `DUEL_LOG_FILE` - Write a log file as well as stderr (default: false)
    /// - `DUEL_MAX_TURNS` - Turn limit for one match (default: 200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enable) = read_flag("DUEL_JSON_EVENTS") {
            config.json_events = enable;
        }
        if let Some(enable) = read_flag("DUEL_LOG_FILE") {
            config.log_file = enable;
        }
        if let Some(turns) = read_env::<u32>("DUEL_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            json_events: false,
            log_file: false,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Accepts `true`/`false` as well as `1`/`0`; a bare variable counts as set.
fn read_flag(key: &str) -> Option<bool> {
    let raw = env::var(key).ok()?;
    match raw.trim() {
        "1" => Some(true),
        "0" => Some(false),
        "" => Some(true),
        other => other.parse().ok(),
    }
}
