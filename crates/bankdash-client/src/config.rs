use std::path::PathBuf;
use std::time::Duration;

use crate::{ClientError, ClientResult};

pub const API_URL_VAR: &str = "BANKDASH_API_URL";
pub const SNAPSHOT_VAR: &str = "BANKDASH_SNAPSHOT";
pub const TOKEN_VAR: &str = "BANKDASH_TOKEN";
pub const PAGE_SIZE_VAR: &str = "BANKDASH_PAGE_SIZE";
pub const TIMEOUT_VAR: &str = "BANKDASH_TIMEOUT_SECS";

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSetting {
    Api { base_url: String },
    Snapshot { path: PathBuf },
    Unset,
}

/// Flag values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_url: Option<String>,
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: SourceSetting,
    pub token: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env(overrides: &SettingsOverrides) -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), overrides)
    }

    pub fn from_lookup<F>(lookup: F, overrides: &SettingsOverrides) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let source = resolve_source(
            overrides,
            read(API_URL_VAR),
            read(SNAPSHOT_VAR).map(PathBuf::from),
        )?;

        let page_size = match read(PAGE_SIZE_VAR) {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = match read(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| {
                    ClientError::config_invalid(TIMEOUT_VAR, &raw, "expected a positive integer")
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            source,
            token: read(TOKEN_VAR),
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn resolve_source(
    overrides: &SettingsOverrides,
    env_api_url: Option<String>,
    env_snapshot: Option<PathBuf>,
) -> ClientResult<SourceSetting> {
    let flag_api_url = overrides
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match (flag_api_url, overrides.snapshot.as_ref()) {
        (Some(_), Some(_)) => {
            return Err(ClientError::invalid_argument(
                "Pass either `--api-url` or `--snapshot`, not both.",
            ));
        }
        (Some(url), None) => return api_source(url, "--api-url"),
        (None, Some(path)) => return Ok(SourceSetting::Snapshot { path: path.clone() }),
        (None, None) => {}
    }

    match (env_api_url, env_snapshot) {
        (Some(_), Some(path)) => {
            tracing::warn!(
                snapshot = %path.display(),
                "both {API_URL_VAR} and {SNAPSHOT_VAR} are set; using the snapshot"
            );
            Ok(SourceSetting::Snapshot { path })
        }
        (None, Some(path)) => Ok(SourceSetting::Snapshot { path }),
        (Some(url), None) => api_source(&url, API_URL_VAR),
        (None, None) => Ok(SourceSetting::Unset),
    }
}

fn api_source(url: &str, origin: &str) -> ClientResult<SourceSetting> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ClientError::config_invalid(
            origin,
            url,
            "expected an http:// or https:// URL",
        ));
    }
    Ok(SourceSetting::Api {
        base_url: url.trim_end_matches('/').to_string(),
    })
}

fn parse_page_size(raw: &str) -> ClientResult<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|value| (1..=MAX_PAGE_SIZE).contains(value))
        .ok_or_else(|| {
            ClientError::config_invalid(
                PAGE_SIZE_VAR,
                raw,
                &format!("expected an integer between 1 and {MAX_PAGE_SIZE}"),
            )
        })
}
