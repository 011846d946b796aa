use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::{MAX_LINE_BYTES, SERVER_NAME};

/// Smallest line budget that can still fit a prefix, a status code and a target.
pub const MIN_LINE_BYTES: usize = 64;

#[derive(Parser)]
#[clap(version = clap::crate_version!(), author = clap::crate_authors!())]
pub struct Args {
    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Path to a TOML config file, defaults are used if not given
    #[clap(short, long)]
    pub config: Option<Config>,
    /// Nick of the user the reply is rendered for
    #[clap(short, long)]
    pub nick: String,
    /// Room the names list is rendered for
    #[clap(short, long, default_value = "#lobby")]
    pub room: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Name the server identifies itself as in the prefix of numeric replies.
    #[serde(default = "Config::default_server_name")]
    pub server_name: String,
    #[serde(default = "Config::default_server_version")]
    pub server_version: String,
    /// Ceiling for a rendered line, not counting the trailing CRLF.
    #[serde(default = "Config::default_max_line_bytes")]
    pub max_line_bytes: usize,
}

impl Config {
    fn default_server_name() -> String {
        SERVER_NAME.to_string()
    }

    fn default_server_version() -> String {
        clap::crate_version!().to_string()
    }

    #[must_use]
    const fn default_max_line_bytes() -> usize {
        MAX_LINE_BYTES
    }

    pub fn validate(self) -> Result<Self, Error> {
        if self.server_name.is_empty() || self.server_name.contains(char::is_whitespace) {
            return Err(Error::InvalidServerName(self.server_name));
        }

        if !(MIN_LINE_BYTES..=MAX_LINE_BYTES).contains(&self.max_line_bytes) {
            return Err(Error::MaxLineBytesOutOfRange(self.max_line_bytes));
        }

        Ok(self)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        toml::from_str::<Self>(contents)?.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: Self::default_server_name(),
            server_version: Self::default_server_version(),
            max_line_bytes: Self::default_max_line_bytes(),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = PathBuf::from(path);
        let contents =
            std::fs::read_to_string(&path).map_err(|source| Error::Read { path, source })?;
        Self::from_toml(&contents)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid server name {0:?}")]
    InvalidServerName(String),
    #[error("max-line-bytes must be between {MIN_LINE_BYTES} and {MAX_LINE_BYTES}, got {0}")]
    MaxLineBytesOutOfRange(usize),
}

#[cfg(test)]
mod test {
    use crate::{
        config::{Config, Error},
        MAX_LINE_BYTES, SERVER_NAME,
    };

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_name, SERVER_NAME);
        assert_eq!(config.max_line_bytes, MAX_LINE_BYTES);
    }

    #[test]
    fn kebab_case_keys() {
        let config = Config::from_toml(
            r#"
            server-name = "irc.example.org"
            server-version = "1.2.3"
            max-line-bytes = 400
            "#,
        )
        .unwrap();

        assert_eq!(config.server_name, "irc.example.org");
        assert_eq!(config.server_version, "1.2.3");
        assert_eq!(config.max_line_bytes, 400);
    }

    #[test]
    fn line_budget_above_frame_rejected() {
        let res = Config::from_toml("max-line-bytes = 511");
        assert!(
            matches!(res, Err(Error::MaxLineBytesOutOfRange(511))),
            "{res:?}"
        );
    }

    #[test]
    fn tiny_line_budget_rejected() {
        let res = Config::from_toml("max-line-bytes = 10");
        assert!(matches!(res, Err(Error::MaxLineBytesOutOfRange(10))), "{res:?}");
    }

    #[test]
    fn server_name_with_space_rejected() {
        let res = Config::from_toml(r#"server-name = "my server""#);
        assert!(matches!(res, Err(Error::InvalidServerName(_))), "{res:?}");
    }

    #[test]
    fn missing_file() {
        let res = "/definitely/not/a/real/config.toml".parse::<Config>();
        assert!(matches!(res, Err(Error::Read { .. })), "{res:?}");
    }
}
