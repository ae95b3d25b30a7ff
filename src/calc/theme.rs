//! # Theme Preference
//!
//! Light/dark preference of the front end. It is persisted in the profile file
//! and never interacts with calculation state.

use crate::config::ProfileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    /// Parse a stored value; anything but `light`/`dark` is unrecognized
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    /// Value written to the profile file
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// Current preference plus where to persist it
pub struct ThemeState {
    preference: Option<ThemePreference>,
    store: Option<(ProfileStore, String)>,
}

impl ThemeState {
    /// In-memory only; changes are not persisted
    pub fn new(preference: Option<ThemePreference>) -> Self {
        Self {
            preference,
            store: None,
        }
    }

    /// Persist every change to `profile_name` in `store`
    pub fn with_store(
        preference: Option<ThemePreference>,
        store: ProfileStore,
        profile_name: &str,
    ) -> Self {
        Self {
            preference,
            store: Some((store, profile_name.to_string())),
        }
    }

    pub fn preference(&self) -> Option<ThemePreference> {
        self.preference
    }

    /// Label of the current preference; an unset preference reads as light
    pub fn label(&self) -> &'static str {
        self.preference.unwrap_or(ThemePreference::Light).label()
    }

    /// Flip the preference, treating unset as light
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.preference.unwrap_or(ThemePreference::Light).toggled();
        self.set(next);
        next
    }

    /// Change the preference and persist it. A persistence failure is logged
    /// and the in-memory preference still changes.
    pub fn set(&mut self, preference: ThemePreference) {
        self.preference = Some(preference);
        tracing::debug!("Theme set to {}", preference.as_str());

        if let Some((store, profile_name)) = &self.store {
            if let Err(e) = store.save_theme(profile_name, preference) {
                tracing::warn!("Failed to persist theme preference: {e:#}");
            }
        }
    }
}
