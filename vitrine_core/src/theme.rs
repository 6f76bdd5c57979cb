// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light/dark theme state with a persisted explicit preference.
//!
//! The page is always in one of two [`ThemeMode`]s. An explicit choice (the
//! toggle) is written to a [`PreferenceStore`] under [`THEME_STORAGE_KEY`]
//! and wins over the system color-scheme preference from then on, across
//! sessions. While nothing valid is stored, the page follows the system
//! preference, including live changes.
//!
//! The palettes are applied by a static stylesheet keyed on the root
//! `data-theme` attribute; [`theme_stylesheet`] renders it.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString as _};
use core::fmt::{self, Write as _};
use core::str::FromStr;

use crate::Error;
use crate::config::ThemeConfig;

/// Storage key holding the explicit preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Root attribute consumed by the palette stylesheet.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Media query for the system preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// The two page palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    /// Light palette.
    Light,
    /// Dark palette.
    Dark,
}

impl ThemeMode {
    /// Maps the system `prefers-color-scheme: dark` signal to a mode.
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value written to storage and to the root attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Glyph shown on the toggle control.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Light => "\u{2600}",
            Self::Dark => "\u{263e}",
        }
    }

    /// Palette for this mode.
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &Palette::LIGHT,
            Self::Dark => &Palette::DARK,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::UnknownThemeMode(other.to_string())),
        }
    }
}

/// CSS custom properties for one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// `--bg`
    pub bg: &'static str,
    /// `--surface`
    pub surface: &'static str,
    /// `--text`
    pub text: &'static str,
    /// `--muted`
    pub muted: &'static str,
    /// `--accent`
    pub accent: &'static str,
    /// `--accent-2`
    pub accent_2: &'static str,
    /// `--card`
    pub card: &'static str,
    /// `--glow`, a box-shadow value.
    pub glow: &'static str,
}

impl Palette {
    /// Light palette.
    pub const LIGHT: Self = Self {
        bg: "#f7f9fc",
        surface: "#ffffff",
        text: "#0e1320",
        muted: "#4e5d78",
        accent: "#1f6bff",
        accent_2: "#00c2d7",
        card: "#ffffff",
        glow: "0 0 28px rgba(31, 107, 255, 0.25)",
    };

    /// Dark palette.
    pub const DARK: Self = Self {
        bg: "#0b0f17",
        surface: "#0f1420",
        text: "#e6eefc",
        muted: "#93a1bd",
        accent: "#6aa2ff",
        accent_2: "#7ef0ff",
        card: "#101724",
        glow: "0 0 40px rgba(106, 162, 255, 0.25)",
    };

    fn write_rule(&self, out: &mut String, mode: ThemeMode) -> fmt::Result {
        writeln!(
            out,
            ":root[{THEME_ATTRIBUTE}=\"{mode}\"] {{ --bg: {}; --surface: {}; --text: {}; \
             --muted: {}; --accent: {}; --accent-2: {}; --card: {}; --glow: {}; }}",
            self.bg,
            self.surface,
            self.text,
            self.muted,
            self.accent,
            self.accent_2,
            self.card,
            self.glow,
        )
    }
}

/// Renders the stylesheet mapping the root attribute to both palettes.
#[must_use]
pub fn theme_stylesheet() -> String {
    let mut out = String::new();
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        // Writing into a `String` cannot fail.
        let _ = mode.palette().write_rule(&mut out, mode);
    }
    out
}

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    /// Reads `key`, or `None` if absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// A [`PreferenceStore`] kept in memory for the lifetime of the page.
///
/// Used when durable storage is unavailable, and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Why the mode changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeCause {
    /// Restored from a persisted explicit preference at startup.
    Restored,
    /// Taken from the system preference (startup or live change).
    System,
    /// The user flipped the toggle.
    Toggle,
}

/// One theme transition for the presenter to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    /// New mode.
    pub mode: ThemeMode,
    /// What triggered it.
    pub cause: ThemeCause,
    /// Whether the mode was written to the store.
    pub persisted: bool,
    /// Store failure, if the write was attempted and rejected.
    pub persist_error: Option<Error>,
}

impl ThemeChange {
    /// Value for the root [`THEME_ATTRIBUTE`].
    #[must_use]
    pub const fn attribute_value(&self) -> &'static str {
        self.mode.as_str()
    }

    /// Text for the toggle control.
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        self.mode.indicator()
    }
}

/// Theme state machine over a [`PreferenceStore`].
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    mode: ThemeMode,
    config: ThemeConfig,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolves the initial mode and returns it as the first change.
    ///
    /// A valid stored preference wins; otherwise `system_prefers_dark`
    /// decides.
    pub fn new(store: S, system_prefers_dark: bool, config: ThemeConfig) -> (Self, ThemeChange) {
        let (mode, cause) = match stored_mode(&store) {
            Some(mode) => (mode, ThemeCause::Restored),
            None => (
                ThemeMode::from_prefers_dark(system_prefers_dark),
                ThemeCause::System,
            ),
        };
        let mut controller = Self {
            store,
            mode,
            config,
        };
        let change = controller.transition(mode, cause);
        (controller, change)
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Returns `true` if a valid explicit preference is stored.
    #[must_use]
    pub fn has_explicit_preference(&self) -> bool {
        stored_mode(&self.store).is_some()
    }

    /// Flips the mode and persists it as an explicit preference.
    pub fn toggle(&mut self) -> ThemeChange {
        self.transition(self.mode.toggled(), ThemeCause::Toggle)
    }

    /// Applies a system preference change.
    ///
    /// Returns `None` while an explicit preference is stored.
    pub fn system_changed(&mut self, prefers_dark: bool) -> Option<ThemeChange> {
        if self.has_explicit_preference() {
            return None;
        }
        Some(self.transition(
            ThemeMode::from_prefers_dark(prefers_dark),
            ThemeCause::System,
        ))
    }

    /// Borrows the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every transition writes the store except system-derived ones, which
    /// write only under [`ThemeConfig::persist_system_mode`].
    fn transition(&mut self, mode: ThemeMode, cause: ThemeCause) -> ThemeChange {
        self.mode = mode;
        let persist = match cause {
            ThemeCause::Restored | ThemeCause::Toggle => true,
            ThemeCause::System => self.config.persist_system_mode,
        };
        let persist_error = if persist {
            self.store.save(THEME_STORAGE_KEY, mode.as_str()).err()
        } else {
            None
        };
        ThemeChange {
            mode,
            cause,
            persisted: persist && persist_error.is_none(),
            persist_error,
        }
    }
}

fn stored_mode(store: &impl PreferenceStore) -> Option<ThemeMode> {
    store.load(THEME_STORAGE_KEY)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    /// Store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl PreferenceStore for ReadOnlyStore {
        fn load(&self, key: &str) -> Option<String> {
            self.0.load(key)
        }

        fn save(&mut self, key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::StorageWrite {
                key: key.to_string(),
            })
        }
    }

    #[test]
    fn system_dark_without_stored_preference_starts_dark() {
        let (controller, change) =
            ThemeController::new(MemoryStore::new(), true, ThemeConfig::portfolio());
        assert_eq!(controller.mode(), ThemeMode::Dark);
        assert_eq!(change.cause, ThemeCause::System);
        assert!(!change.persisted, "system mode is not an explicit choice");
        assert_eq!(controller.store().load(THEME_STORAGE_KEY), None);
    }

    #[test]
    fn stored_preference_beats_system() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "light");
        let (controller, change) = ThemeController::new(store, true, ThemeConfig::portfolio());
        assert_eq!(controller.mode(), ThemeMode::Light);
        assert_eq!(change.cause, ThemeCause::Restored);
    }

    #[test]
    fn invalid_stored_value_falls_back_to_system() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "sepia");
        let (mut controller, change) = ThemeController::new(store, true, ThemeConfig::portfolio());
        assert_eq!(change.mode, ThemeMode::Dark);
        assert!(!controller.has_explicit_preference());
        assert!(
            controller.system_changed(false).is_some(),
            "still follows the system"
        );
    }

    #[test]
    fn toggling_twice_returns_and_repersists() {
        let (mut controller, initial) =
            ThemeController::new(MemoryStore::new(), false, ThemeConfig::portfolio());
        assert_eq!(initial.mode, ThemeMode::Light);

        let first = controller.toggle();
        assert_eq!(first.mode, ThemeMode::Dark);
        assert_eq!(first.indicator(), "\u{263e}");
        assert_eq!(
            controller.store().load(THEME_STORAGE_KEY).as_deref(),
            Some("dark")
        );

        let second = controller.toggle();
        assert_eq!(second.mode, ThemeMode::Light);
        assert!(second.persisted, "explicit choice is persisted");
        assert_eq!(
            controller.store().load(THEME_STORAGE_KEY).as_deref(),
            Some("light")
        );
    }

    #[test]
    fn system_change_ignored_after_explicit_choice() {
        let (mut controller, _) =
            ThemeController::new(MemoryStore::new(), false, ThemeConfig::portfolio());
        let change = controller.system_changed(true).unwrap();
        assert_eq!(change.mode, ThemeMode::Dark);

        let _ = controller.toggle();
        assert_eq!(controller.system_changed(true), None);
        assert_eq!(controller.mode(), ThemeMode::Light);
    }

    #[test]
    fn persisting_system_mode_makes_it_sticky() {
        let config = ThemeConfig {
            persist_system_mode: true,
        };
        let (mut controller, change) = ThemeController::new(MemoryStore::new(), true, config);
        assert!(change.persisted, "configured to persist");
        assert_eq!(controller.system_changed(false), None);
    }

    #[test]
    fn every_transition_writes_when_system_modes_persist() {
        let config = ThemeConfig {
            persist_system_mode: true,
        };
        let (controller, change) = ThemeController::new(MemoryStore::new(), true, config);
        assert_eq!(change.cause, ThemeCause::System);
        assert_eq!(
            controller.store().load(THEME_STORAGE_KEY).as_deref(),
            Some("dark"),
            "initial system mode written like the stock script"
        );
    }

    #[test]
    fn failed_write_still_switches_mode() {
        let (mut controller, _) =
            ThemeController::new(ReadOnlyStore::default(), false, ThemeConfig::portfolio());
        let change = controller.toggle();
        assert_eq!(change.mode, ThemeMode::Dark);
        assert!(!change.persisted);
        assert_eq!(
            change.persist_error,
            Some(Error::StorageWrite {
                key: THEME_STORAGE_KEY.to_string()
            })
        );
        assert_eq!(controller.mode(), ThemeMode::Dark);
    }

    #[test]
    fn parse_round_trip_and_error() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(
            "Dark".parse::<ThemeMode>(),
            Err(Error::UnknownThemeMode("Dark".to_string()))
        );
    }

    #[test]
    fn stylesheet_covers_both_palettes() {
        let css = theme_stylesheet();
        assert!(css.contains(":root[data-theme=\"light\"]"), "got: {css}");
        assert!(css.contains(":root[data-theme=\"dark\"]"), "got: {css}");
        assert!(css.contains("--accent-2: #7ef0ff;"), "got: {css}");
        assert!(
            css.contains("--glow: 0 0 28px rgba(31, 107, 255, 0.25);"),
            "got: {css}"
        );
        assert_eq!(css.lines().count(), 2);
    }
}
