//! Configuration constants and profile storage for calcline
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://127.0.0.1:8000
//! theme = dark
//! ```

use crate::calc::theme::ThemePreference;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};

/// Default profile file path for calcline
pub const DEFAULT_PROFILE_PATH: &str = "~/.calcline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CALCLINE_PROFILE_PATH";

pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Evaluation service used when neither the profile nor the command line names one
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

const SERVER_KEY: &str = "server";
const THEME_KEY: &str = "theme";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings of one profile section
#[derive(Debug, Clone, PartialEq)]
pub struct CalcProfile {
    server: String,
    theme: Option<ThemePreference>,
}

impl CalcProfile {
    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn theme(&self) -> Option<ThemePreference> {
        self.theme
    }
}

/// Profile used when the file or the section does not exist
pub fn get_blank_profile() -> CalcProfile {
    CalcProfile {
        server: DEFAULT_SERVER.to_string(),
        theme: None,
    }
}

/// INI-backed profile file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// `path` may start with `~`
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Ini>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file {}", self.path.display()))?;
        Ok(Some(ini))
    }

    /// Read profile `name`; `None` when the file or the section is missing
    pub fn get_profile(&self, name: &str) -> Result<Option<CalcProfile>> {
        let Some(ini) = self.load()? else {
            tracing::debug!("Profile file {} not found", self.path.display());
            return Ok(None);
        };
        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let server = section
            .get(SERVER_KEY)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVER)
            .to_string();

        let theme = section.get(THEME_KEY).and_then(|value| {
            let parsed = ThemePreference::parse(value);
            if parsed.is_none() {
                tracing::debug!("Ignoring unrecognized theme '{}'", value);
            }
            parsed
        });

        Ok(Some(CalcProfile { server, theme }))
    }

    /// Write the theme of profile `name`, keeping every other setting in the file
    pub fn save_theme(&self, name: &str, theme: ThemePreference) -> Result<()> {
        let mut ini = self.load()?.unwrap_or_else(Ini::new);
        ini.with_section(Some(name)).set(THEME_KEY, theme.as_str());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        ini.write_to_file(&self.path)
            .with_context(|| format!("Failed to write profile file {}", self.path.display()))?;

        tracing::debug!("Saved theme '{}' to {}", theme.as_str(), self.path.display());
        Ok(())
    }
}
