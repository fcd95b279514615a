//! Process configuration, read once from the environment at startup.
//!
//! [`Config`] is immutable after construction and is passed by reference to
//! whatever needs it; nothing re-reads the environment later.

use std::path::PathBuf;
use std::time::Duration;

use domain::{ConfigurationError, RepositoryId};

pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 300_000;

/// Optional DeepL settings; present iff `DEEPL_API_KEY` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationConfig {
    pub api_key: String,
    pub target_lang: String,
}

/// Connection details for the Misskey destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisskeyConfig {
    pub instance_url: String,
    pub token: String,
    pub channel_id: String,
}

/// Whether the plain-text destination is usable.
///
/// The three Misskey variables are all-or-nothing: a partial set disables the
/// destination entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MisskeySetting {
    Disabled,
    Partial { missing: Vec<&'static str> },
    Enabled(MisskeyConfig),
}

impl MisskeySetting {
    pub fn enabled(&self) -> Option<&MisskeyConfig> {
        match self {
            Self::Enabled(config) => Some(config),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub discord_webhook_url: String,
    /// Non-empty, in configured order, without duplicates.
    pub repositories: Vec<RepositoryId>,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub check_interval: Duration,
    pub translation: Option<TranslationConfig>,
    pub misskey: MisskeySetting,
    pub state_file: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let discord_webhook_url = get("DISCORD_WEBHOOK_URL").ok_or(ConfigurationError::Missing {
            name: "DISCORD_WEBHOOK_URL",
        })?;

        let repositories = parse_repositories(&get("GITHUB_REPOS").unwrap_or_default())?;

        let check_interval = match get("CHECK_INTERVAL") {
            None => Duration::from_millis(DEFAULT_CHECK_INTERVAL_MS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigurationError::Invalid {
                        name: "CHECK_INTERVAL",
                        message: format!("expected a positive number of milliseconds, got {raw:?}"),
                    })
                }
            },
        };

        let translation = get("DEEPL_API_KEY").map(|api_key| TranslationConfig {
            api_key,
            target_lang: get("TRANSLATE_TARGET_LANG")
                .unwrap_or_else(|| translator::DEFAULT_TARGET_LANG.to_owned()),
        });

        let misskey = {
            let url = get("MISSKEY_URL");
            let token = get("MISSKEY_TOKEN");
            let channel = get("MISSKEY_CHANNEL_ID");
            match (url, token, channel) {
                (None, None, None) => MisskeySetting::Disabled,
                (Some(instance_url), Some(token), Some(channel_id)) => {
                    MisskeySetting::Enabled(MisskeyConfig {
                        instance_url,
                        token,
                        channel_id,
                    })
                }
                (url, token, channel) => {
                    let missing = [
                        ("MISSKEY_URL", url.is_none()),
                        ("MISSKEY_TOKEN", token.is_none()),
                        ("MISSKEY_CHANNEL_ID", channel.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    MisskeySetting::Partial { missing }
                }
            }
        };

        Ok(Self {
            discord_webhook_url,
            repositories,
            github_token: get("GITHUB_TOKEN"),
            github_api_url: get("GITHUB_API_URL")
                .unwrap_or_else(|| github::DEFAULT_API_BASE.to_owned()),
            check_interval,
            translation,
            misskey,
            state_file: get("STATE_FILE")
                .unwrap_or_else(|| state::DEFAULT_STATE_FILE.to_owned())
                .into(),
        })
    }
}

/// Splits the comma-separated repository list, trimming entries and dropping
/// empty ones and repeats.
fn parse_repositories(raw: &str) -> Result<Vec<RepositoryId>, ConfigurationError> {
    let mut repositories: Vec<RepositoryId> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some(repo) = RepositoryId::new(entry) else {
            continue;
        };
        if repo.owner_and_name().is_none() {
            return Err(ConfigurationError::Invalid {
                name: "GITHUB_REPOS",
                message: format!("{entry:?} is not of the form owner/name"),
            });
        }
        if !repositories.contains(&repo) {
            repositories.push(repo);
        }
    }
    if repositories.is_empty() {
        return Err(ConfigurationError::Missing {
            name: "GITHUB_REPOS",
        });
    }
    Ok(repositories)
}
