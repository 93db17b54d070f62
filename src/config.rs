use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{aggregator::OutputShape, parser::ParseOptions, workout_id::IdPosition};

pub const DEFAULT_LOGIN_URL: &str = "https://app.truecoach.co/login";
pub const DEFAULT_OUTPUT_PATH: &str = "workouts.json";

/// Contents of the TOML file passed on the command line.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub urls_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_login_url")]
    pub login_url: Url,
    #[serde(default)]
    pub shape: OutputShape,
    #[serde(default)]
    pub id_position: IdPosition,
    #[serde(default)]
    pub include_notes: bool,
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: NonZeroUsize,
    #[serde(default = "default_tabs")]
    pub tabs: NonZeroUsize,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default)]
    pub remote_debugging_port: Option<u16>,
    /// JSON file with `email` and `password`; the environment is used when absent.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub network_idle: NetworkIdleConfig,
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            include_notes: self.include_notes,
        }
    }
}

fn default_output_path() -> PathBuf {
    DEFAULT_OUTPUT_PATH.into()
}
fn default_login_url() -> Url {
    Url::parse(DEFAULT_LOGIN_URL).unwrap()
}
fn default_checkpoint_interval() -> NonZeroUsize {
    NonZeroUsize::new(10).unwrap()
}
fn default_tabs() -> NonZeroUsize {
    NonZeroUsize::MIN
}
fn default_headless() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkIdleConfig {
    /// How long the page must stay quiet.
    pub idle_millis: u64,
    pub poll_millis: u64,
    /// Upper bound for a single wait.
    pub timeout_secs: u64,
}

impl Default for NetworkIdleConfig {
    fn default() -> Self {
        Self {
            idle_millis: 500,
            poll_millis: 100,
            timeout_secs: 30,
        }
    }
}

impl NetworkIdleConfig {
    pub fn idle(&self) -> Duration {
        Duration::from_millis(self.idle_millis)
    }
    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_millis)
    }
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;
    use crate::{aggregator::OutputShape, workout_id::IdPosition};

    #[test]
    fn defaults() {
        let config: Config = toml::from_str(r#"urls_path = "urls.txt""#).unwrap();
        assert_eq!(config.output_path.to_str(), Some("workouts.json"));
        assert_eq!(config.login_url.as_str(), "https://app.truecoach.co/login");
        assert_eq!(config.shape, OutputShape::Map);
        assert_eq!(config.id_position, IdPosition::BeforeLast);
        assert!(!config.include_notes);
        assert_eq!(config.checkpoint_interval.get(), 10);
        assert_eq!(config.tabs.get(), 1);
        assert!(config.headless);
        assert_eq!(config.network_idle.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let config: Config = toml::from_str(
            r#"
            urls_path = "urls.json"
            shape = "list"
            id_position = "last"
            include_notes = true
            tabs = 3
            [network_idle]
            idle_millis = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.shape, OutputShape::List);
        assert_eq!(config.id_position, IdPosition::Last);
        assert!(config.parse_options().include_notes);
        assert_eq!(config.tabs.get(), 3);
        assert_eq!(config.network_idle.idle(), Duration::from_secs(1));
        assert_eq!(config.network_idle.poll(), Duration::from_millis(100));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let res = toml::from_str::<Config>(
            r#"
            urls_path = "urls.txt"
            checkpoint_interval = 0
            "#,
        );
        assert!(res.is_err());
    }
}
