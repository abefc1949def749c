//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::election::model::{ElectionRules, DEFAULT_DESCRIPTION, DEFAULT_PHOTO};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub election: ElectionConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    /// Shortest accepted phone number, in characters.
    #[serde(default = "default_min_phone_len")]
    pub min_phone_len: usize,
    #[serde(default = "default_photo")]
    pub default_photo: String,
    #[serde(default = "default_description")]
    pub default_description: String,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            min_phone_len: default_min_phone_len(),
            default_photo: default_photo(),
            default_description: default_description(),
        }
    }
}

impl ElectionConfig {
    pub fn rules(&self) -> ElectionRules {
        ElectionRules {
            min_phone_len: self.min_phone_len,
            default_photo: self.default_photo.clone(),
            default_description: self.default_description.clone(),
        }
    }
}

fn default_title() -> String {
    "Petrovsky Presidential Election".into()
}

fn default_subtitle() -> String {
    "Digital voting platform".into()
}

fn default_min_phone_len() -> usize {
    10
}

fn default_photo() -> String {
    DEFAULT_PHOTO.into()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.into()
}

/// Admin sign-in settings. Without a hash the admin view cannot be opened;
/// set one with `ballotbox --set-admin-password`, which reads the password
/// from stdin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Argon2 encoded hash of the admin password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted election keys.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ballotbox")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the vote confirmation stays on screen.
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_secs: default_notice_secs(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_notice_secs() -> u64 {
    3
}

fn default_tick_ms() -> u64 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "~/.local/share/ballotbox/logs".into()
}

fn default_log_level() -> String {
    "info".into()
}
