//! Locale type: a tag that is guaranteed to be in the registry.
//!
//! A `Locale` can only be obtained through the registry, so any value of this
//! type names a supported locale. Arbitrary strings from URLs or headers must
//! go through `Locale::from_code` or the resolver first.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated, supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const JAPANESE: Locale = Locale { code: "ja" };

    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Create a Locale from a tag string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the tag is registered (exact, case-sensitive match)
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale::from_config(config)),
            None => bail!("Unsupported locale: '{}'", code),
        }
    }

    /// The configured default locale.
    pub fn default_locale() -> Locale {
        Locale::from_config(LocaleRegistry::get().default_locale())
    }

    /// Every supported locale, in priority order.
    ///
    /// This is the set of locale-prefixed pages the site serves.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(Locale::from_config)
            .collect()
    }

    pub(crate) fn from_config(config: &LocaleConfig) -> Locale {
        Locale { code: config.code }
    }

    /// The locale tag (e.g., "ja").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry entry for this locale.
    ///
    /// # Panics
    /// Never in practice: every `Locale` is built from a registry entry.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_japanese_constant() {
        let japanese = Locale::JAPANESE;
        assert_eq!(japanese.code(), "ja");
        assert_eq!(japanese.name(), "Japanese");
        assert!(japanese.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Locale::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Locale::from_code("ja").unwrap(), Locale::JAPANESE);
        assert_eq!(Locale::from_code("en").unwrap(), Locale::ENGLISH);
    }

    #[test]
    fn test_from_code_unsupported() {
        let result = Locale::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Locale::from_code("JA").is_err());
        assert!(Locale::from_code("").is_err());
    }

    // ==================== Set Tests ====================

    #[test]
    fn test_default_locale_is_japanese() {
        assert_eq!(Locale::default_locale(), Locale::JAPANESE);
    }

    #[test]
    fn test_all_in_priority_order() {
        assert_eq!(Locale::all(), vec![Locale::JAPANESE, Locale::ENGLISH]);
    }

    #[test]
    fn test_display_writes_code() {
        assert_eq!(Locale::ENGLISH.to_string(), "en");
        assert_eq!(format!("/{}", Locale::JAPANESE), "/ja");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Locale::JAPANESE.native_name(), "日本語");
        assert_eq!(Locale::ENGLISH.native_name(), "English");
    }
}
