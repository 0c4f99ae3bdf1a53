use std::env;

use crate::error::StoreError;
use crate::store::{PersistentStore, StoreKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Dark/light preference; falls back to the system preference until the user toggles
pub struct ThemeManager {
    store: PersistentStore,
    theme: Theme,
}

impl ThemeManager {
    pub fn load(store: PersistentStore, system_dark: bool) -> Self {
        let dark: bool = store.load(StoreKey::ThemePreference, || system_dark);
        Self {
            store,
            theme: Theme::from_dark(dark),
        }
    }

    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        self.theme = self.theme.toggled();
        tracing::debug!("Theme switched to {:?}", self.theme);
        self.store
            .save(StoreKey::ThemePreference, &self.theme.is_dark())?;
        Ok(self.theme)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }
}

/// System preference read from `VOCAB_THEME`, then the terminal's `COLORFGBG`
pub fn system_prefers_dark() -> bool {
    prefers_dark(
        env::var("VOCAB_THEME").ok().as_deref(),
        env::var("COLORFGBG").ok().as_deref(),
    )
}

pub fn prefers_dark(theme_var: Option<&str>, colorfgbg: Option<&str>) -> bool {
    match theme_var.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("dark") => return true,
        Some("light") => return false,
        _ => {}
    }

    // "15;0" or "15;default;0": the last field is the background colour index
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_system_preference() {
        assert!(ThemeManager::load(PersistentStore::in_memory(), true).is_dark());
        assert!(!ThemeManager::load(PersistentStore::in_memory(), false).is_dark());
    }

    #[test]
    fn stored_preference_beats_system() {
        let store = PersistentStore::new(Arc::new(MemoryStore::with_entries([(
            "theme-preference",
            "false",
        )])));

        assert_eq!(ThemeManager::load(store, true).theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let store = PersistentStore::in_memory();
        let mut theme = ThemeManager::load(store.clone(), false);

        assert_eq!(theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(
            store.raw(StoreKey::ThemePreference).unwrap().as_deref(),
            Some("true")
        );
        assert!(ThemeManager::load(store, false).is_dark());
    }

    #[test]
    fn corrupted_preference_resets_to_system() {
        let store = PersistentStore::new(Arc::new(MemoryStore::with_entries([(
            "theme-preference",
            "maybe",
        )])));

        let theme = ThemeManager::load(store.clone(), true);

        assert!(theme.is_dark());
        assert_eq!(
            store.raw(StoreKey::ThemePreference).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn system_preference_sources() {
        assert!(prefers_dark(Some("Dark"), None));
        assert!(!prefers_dark(Some("light"), Some("15;0")));
        assert!(prefers_dark(None, Some("15;0")));
        assert!(prefers_dark(None, Some("15;default;8")));
        assert!(!prefers_dark(None, Some("0;15")));
        assert!(!prefers_dark(None, Some("garbage")));
        assert!(!prefers_dark(Some("auto"), None));
        assert!(!prefers_dark(None, None));
    }
}
