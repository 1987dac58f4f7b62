#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::schedule::ScheduleSettings;
use crate::{PortCallError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = ".portcall/config.toml";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/api/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub gateway_url: String,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    pub vessel_lookup_timeout_ms: u64,
    pub vessel_lookup_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        let schedule = ScheduleSettings::default();
        Self {
            database_url: None,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            api_token: None,
            request_timeout_ms: 10_000,
            vessel_lookup_timeout_ms: u64::try_from(schedule.vessel_lookup_timeout.as_millis())
                .unwrap_or(5_000),
            vessel_lookup_concurrency: schedule.vessel_lookup_concurrency,
        }
    }
}

impl Config {
    #[must_use]
    pub const fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            vessel_lookup_timeout: Duration::from_millis(self.vessel_lookup_timeout_ms),
            vessel_lookup_concurrency: self.vessel_lookup_concurrency,
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Apply `PORTCALL_*` (and `DATABASE_URL`) environment overrides.
    ///
    /// # Errors
    /// Returns [`PortCallError::ConfigError`] when a numeric override does not parse.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::with_env_overrides`] with an explicit variable source.
    ///
    /// # Errors
    /// Returns [`PortCallError::ConfigError`] when a numeric override does not parse.
    pub fn with_overrides_from<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = lookup("PORTCALL_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .or(self.database_url);
        let gateway_url = lookup("PORTCALL_GATEWAY_URL").unwrap_or(self.gateway_url);
        let api_token = lookup("PORTCALL_TOKEN").or(self.api_token);
        let request_timeout_ms = lookup("PORTCALL_REQUEST_TIMEOUT_MS")
            .map(|value| parse_number("PORTCALL_REQUEST_TIMEOUT_MS", &value))
            .transpose()?
            .unwrap_or(self.request_timeout_ms);
        let vessel_lookup_timeout_ms = lookup("PORTCALL_VESSEL_LOOKUP_TIMEOUT_MS")
            .map(|value| parse_number("PORTCALL_VESSEL_LOOKUP_TIMEOUT_MS", &value))
            .transpose()?
            .unwrap_or(self.vessel_lookup_timeout_ms);
        let vessel_lookup_concurrency = lookup("PORTCALL_VESSEL_LOOKUP_CONCURRENCY")
            .map(|value| parse_number("PORTCALL_VESSEL_LOOKUP_CONCURRENCY", &value))
            .transpose()?
            .unwrap_or(self.vessel_lookup_concurrency);

        Self {
            database_url,
            gateway_url,
            api_token,
            request_timeout_ms,
            vessel_lookup_timeout_ms,
            vessel_lookup_concurrency,
        }
        .validated()
    }

    fn validated(self) -> Result<Self> {
        if self.vessel_lookup_concurrency == 0 {
            return Err(PortCallError::ConfigError(
                "vessel_lookup_concurrency must be at least 1".to_string(),
            ));
        }
        if self.vessel_lookup_timeout_ms == 0 || self.request_timeout_ms == 0 {
            return Err(PortCallError::ConfigError(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Load the config file, then apply environment overrides.
///
/// A missing default file yields the defaults; an explicitly named file must exist.
///
/// # Errors
/// Returns [`PortCallError::ConfigError`] for unreadable files and bad values.
pub async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let base = if config_path.exists() {
        read_config_file(&config_path).await?
    } else if explicit {
        return Err(PortCallError::ConfigError(format!(
            "Config file {} does not exist",
            config_path.display()
        )));
    } else {
        Config::default()
    };

    base.with_env_overrides()
}

async fn read_config_file(path: &Path) -> Result<Config> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PortCallError::ConfigError(format!("Failed to read config: {e}")))?;
    parse_config_content(&content)
}

/// # Errors
/// Returns [`PortCallError::ConfigError`] when a numeric key does not parse.
pub fn parse_config_content(content: &str) -> Result<Config> {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "database_url") {
            config.database_url = Some(expand_env_vars(value)).filter(|url| !url.is_empty());
        }
        if let Some(value) = parse_key_value(line, "gateway_url") {
            config.gateway_url = expand_env_vars(value);
        }
        if let Some(value) = parse_key_value(line, "api_token") {
            config.api_token = Some(expand_env_vars(value)).filter(|token| !token.is_empty());
        }
        if let Some(value) = parse_key_value(line, "request_timeout_ms") {
            config.request_timeout_ms = parse_number("request_timeout_ms", value)?;
        }
        if let Some(value) = parse_key_value(line, "vessel_lookup_timeout_ms") {
            config.vessel_lookup_timeout_ms = parse_number("vessel_lookup_timeout_ms", value)?;
        }
        if let Some(value) = parse_key_value(line, "vessel_lookup_concurrency") {
            config.vessel_lookup_concurrency = parse_number("vessel_lookup_concurrency", value)?;
        }
    }

    config.validated()
}

pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PortCallError::ConfigError(format!("{key} must be a number, got '{value}'")))
}

fn expand_env_vars(input: &str) -> String {
    expand_env_vars_from(input, |name| std::env::var(name).ok())
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars_from<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_part = &rest[start + 2..start + end];
        let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
        result.push_str(&rest[..start]);
        result.push_str(&lookup(var_name).unwrap_or_else(|| default.to_string()));
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}
