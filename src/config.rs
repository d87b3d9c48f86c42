// Optional per-user configuration file.
//
// Lets an administrator pin the backend host and admin room so they don't
// have to be repeated on every run. The admin password is deliberately not
// part of this file; it comes from the flag, the environment, or a prompt.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "http://localhost:8080";
pub const DEFAULT_ADMIN_ROOM: &str = "admin";

const CONFIG_DIR: &str = "laundry-accounts";
const CONFIG_FILE: &str = "config.json";

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_room: Option<String>,
}

/// Default location, e.g. `~/.config/laundry-accounts/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load the config at `path`, or the default location when `None`.
    /// A missing file yields the empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Host to use when neither the flag nor the environment set one.
    pub fn host_or_default(&self, cli: Option<&str>) -> String {
        cli.or(self.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
            .to_string()
    }

    /// Admin room to use when neither the flag nor the environment set one.
    pub fn admin_room_or_default(&self, cli: Option<&str>) -> String {
        cli.or(self.admin_room.as_deref())
            .unwrap_or(DEFAULT_ADMIN_ROOM)
            .to_string()
    }
}
