use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use super::{Persisted, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// UI preferences. Device-level, so they survive logout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub locale: Locale,
    pub sidebar_collapsed: bool,
}

#[derive(Debug)]
pub struct PreferencesStore {
    inner: Persisted<Preferences>,
}

impl PreferencesStore {
    pub fn in_memory() -> Self {
        Self {
            inner: Persisted::in_memory(),
        }
    }

    pub fn hydrate(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: Persisted::hydrate(path)?,
        })
    }

    pub fn get(&self) -> &Preferences {
        self.inner.get()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.inner.update(|prefs| prefs.theme = theme)
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<(), StoreError> {
        self.inner.update(|prefs| prefs.locale = locale)
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<(), StoreError> {
        self.inner.update(|prefs| prefs.sidebar_collapsed = collapsed)
    }

    /// Flip the sidebar and return the new state
    pub fn toggle_sidebar(&mut self) -> Result<bool, StoreError> {
        self.inner.update(|prefs| {
            prefs.sidebar_collapsed = !prefs.sidebar_collapsed;
            prefs.sidebar_collapsed
        })
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.inner.reset()
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{}' (expected light, dark or system)", other)),
        }
    }
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(format!("unknown locale '{}' (expected es or en)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::System);
        assert_eq!(prefs.locale, Locale::Es);
        assert!(!prefs.sidebar_collapsed);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut store = PreferencesStore::in_memory();
        store.set_theme(Theme::Dark).unwrap();
        assert!(store.toggle_sidebar().unwrap());
        assert!(!store.toggle_sidebar().unwrap());

        store.reset().unwrap();
        assert_eq!(store.get(), &Preferences::default());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("En".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
