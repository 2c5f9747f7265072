//! Runtime configuration: environment first, then command-line overrides.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::types::{FEEDBACK_MS, POLL_INTERVAL_MS, SETUP_RETRY_MS};

/// Which front end drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Squares are typed directly.
    #[default]
    Console,
    /// Squares toggle a simulated sensor matrix.
    Sim,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Console => "console",
            Mode::Sim => "sim",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub poll_interval: Duration,
    pub feedback: Duration,
    pub setup_retry: Duration,
    /// Give up waiting for the next square after this long.
    pub turn_timeout: Option<Duration>,
    /// `None` picks the mode default.
    pub mirror: Option<bool>,
    pub journal_path: Option<PathBuf>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Console,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            feedback: Duration::from_millis(FEEDBACK_MS),
            setup_retry: Duration::from_millis(SETUP_RETRY_MS),
            turn_timeout: None,
            mirror: None,
            journal_path: None,
            color: true,
        }
    }
}

impl Config {
    /// Read `CHESSY_*` variables; anything unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let journal_path = lookup("CHESSY_JOURNAL_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            mode: defaults.mode,
            poll_interval: millis("CHESSY_POLL_MS").unwrap_or(defaults.poll_interval),
            feedback: millis("CHESSY_FEEDBACK_MS").unwrap_or(defaults.feedback),
            setup_retry: millis("CHESSY_SETUP_RETRY_MS").unwrap_or(defaults.setup_retry),
            turn_timeout: millis("CHESSY_TURN_TIMEOUT_MS"),
            mirror: lookup("CHESSY_MIRROR").and_then(|s| parse_flag(&s)),
            journal_path,
            color: lookup("CHESSY_COLOR")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.color),
        }
    }

    /// Print columns mirrored. The sensor grid is wired mirrored, so the
    /// simulator defaults to it; the console does not.
    pub fn mirrored(&self) -> bool {
        self.mirror.unwrap_or(self.mode == Mode::Sim)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply `chessy [console|sim] [--mirror] [--journal PATH] [--timeout-ms N]`
/// on top of `base`.
pub fn parse_run_args(args: &[String], base: Config) -> Result<Config> {
    let mut config = base;
    let mut i = 0usize;

    if let Some(first) = args.first() {
        match first.as_str() {
            "console" => {
                config.mode = Mode::Console;
                i = 1;
            }
            "sim" => {
                config.mode = Mode::Sim;
                i = 1;
            }
            _ => {}
        }
    }

    while i < args.len() {
        match args[i].as_str() {
            "--mirror" => {
                config.mirror = Some(true);
            }
            "--no-color" => {
                config.color = false;
            }
            "--journal" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("chessy: missing value for --journal"))?;
                config.journal_path = Some(PathBuf::from(v));
            }
            "--timeout-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("chessy: missing value for --timeout-ms"))?;
                let ms = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("chessy: invalid --timeout-ms value: {}", v))?;
                config.turn_timeout = Some(Duration::from_millis(ms));
            }
            other => {
                return Err(anyhow!("chessy: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.feedback, Duration::from_millis(500));
        assert_eq!(config.turn_timeout, None);
        assert!(!config.mirrored());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(|key| match key {
            "CHESSY_POLL_MS" => Some("25".to_string()),
            "CHESSY_TURN_TIMEOUT_MS" => Some("3000".to_string()),
            "CHESSY_MIRROR" => Some("true".to_string()),
            "CHESSY_COLOR" => Some("0".to_string()),
            "CHESSY_JOURNAL_PATH" => Some("  ".to_string()),
            "CHESSY_FEEDBACK_MS" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(config.poll_interval, Duration::from_millis(25));
        assert_eq!(config.turn_timeout, Some(Duration::from_millis(3000)));
        assert_eq!(config.mirror, Some(true));
        assert!(!config.color);
        assert_eq!(config.journal_path, None);
        assert_eq!(config.feedback, Duration::from_millis(500));
    }

    #[test]
    fn test_sim_mirrors_by_default() {
        let config = parse_run_args(&args(&["sim"]), Config::default()).unwrap();
        assert_eq!(config.mode, Mode::Sim);
        assert!(config.mirrored());

        let mut base = Config::default();
        base.mirror = Some(false);
        let config = parse_run_args(&args(&["sim"]), base).unwrap();
        assert!(!config.mirrored());
    }

    #[test]
    fn test_parse_run_args() {
        let config = parse_run_args(
            &args(&["console", "--mirror", "--journal", "moves.jsonl", "--timeout-ms", "750"]),
            Config::default(),
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Console);
        assert!(config.mirrored());
        assert_eq!(config.journal_path, Some(PathBuf::from("moves.jsonl")));
        assert_eq!(config.turn_timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn test_parse_run_args_errors() {
        assert!(parse_run_args(&args(&["--journal"]), Config::default()).is_err());
        assert!(parse_run_args(&args(&["--timeout-ms", "soon"]), Config::default()).is_err());
        assert!(parse_run_args(&args(&["observe"]), Config::default()).is_err());
    }
}
