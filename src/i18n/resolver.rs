//! Locale resolution for incoming requests.
//!
//! Header matching is plain case-insensitive substring containment over the
//! registry's priority order. Quality values are not parsed, so a header
//! such as `"yayen"` matches `en`.

use crate::i18n::{Locale, LocaleRegistry};

/// Outcome of routing a single request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The path already carries a locale segment.
    PassThrough(Locale),
    /// The path has no locale segment; send the client to `location`.
    Redirect { location: String, locale: Locale },
}

impl RouteDecision {
    /// The locale this request resolved to, whatever the outcome.
    pub fn locale(&self) -> Locale {
        match self {
            RouteDecision::PassThrough(locale) => *locale,
            RouteDecision::Redirect { locale, .. } => *locale,
        }
    }
}

/// Pick a locale from an `Accept-Language` header value.
///
/// Returns the first registered locale whose tag occurs anywhere in the
/// lowercased header, or the default locale when none does.
pub fn resolve_locale(accept_language: &str) -> Locale {
    let header = accept_language.to_lowercase();

    LocaleRegistry::get()
        .list()
        .iter()
        .find(|config| header.contains(config.code))
        .map(Locale::from_config)
        .unwrap_or_else(Locale::default_locale)
}

/// Locale named by the first path segment, if it is a supported tag.
///
/// Only `/<tag>` and `/<tag>/...` match; `/english` does not match `en`.
pub fn locale_from_path(path: &str) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    let segment = rest.split('/').next().unwrap_or(rest);

    LocaleRegistry::get()
        .get_by_code(segment)
        .map(Locale::from_config)
}

/// Prefix `path` with `/<locale>`. The bare root maps to `/<locale>`.
pub fn localized_path(locale: Locale, path: &str) -> String {
    if path == "/" || path.is_empty() {
        format!("/{}", locale.code())
    } else if path.starts_with('/') {
        format!("/{}{}", locale.code(), path)
    } else {
        format!("/{}/{}", locale.code(), path)
    }
}

/// Decide how to route a request with the given path and language header.
pub fn route(path: &str, accept_language: &str) -> RouteDecision {
    if let Some(locale) = locale_from_path(path) {
        return RouteDecision::PassThrough(locale);
    }

    let locale = resolve_locale(accept_language);
    RouteDecision::Redirect {
        location: localized_path(locale, path),
        locale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== resolve_locale Tests ====================

    #[test]
    fn test_resolve_english_browser_header() {
        assert_eq!(resolve_locale("en-US,en;q=0.9"), Locale::ENGLISH);
    }

    #[test]
    fn test_resolve_unrecognized_falls_back_to_default() {
        assert_eq!(resolve_locale("fr-FR"), Locale::JAPANESE);
    }

    #[test]
    fn test_resolve_empty_header_is_default() {
        assert_eq!(resolve_locale(""), Locale::JAPANESE);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_locale("EN-GB"), Locale::ENGLISH);
        assert_eq!(resolve_locale("JA-JP"), Locale::JAPANESE);
    }

    #[test]
    fn test_resolve_uses_priority_order_not_quality() {
        // English is preferred by the client but Japanese comes first in the registry.
        assert_eq!(resolve_locale("en;q=1.0,ja;q=0.1"), Locale::JAPANESE);
    }

    #[test]
    fn test_resolve_substring_collision_is_kept() {
        assert_eq!(resolve_locale("yayen"), Locale::ENGLISH);
    }

    // ==================== locale_from_path Tests ====================

    #[test]
    fn test_locale_from_exact_segment() {
        assert_eq!(locale_from_path("/en"), Some(Locale::ENGLISH));
        assert_eq!(locale_from_path("/ja/"), Some(Locale::JAPANESE));
        assert_eq!(locale_from_path("/ja/about/team"), Some(Locale::JAPANESE));
    }

    #[test]
    fn test_locale_from_path_requires_whole_segment() {
        assert_eq!(locale_from_path("/english"), None);
        assert_eq!(locale_from_path("/jam/en"), None);
        assert_eq!(locale_from_path("/EN"), None);
    }

    #[test]
    fn test_locale_from_path_without_locale() {
        assert_eq!(locale_from_path("/"), None);
        assert_eq!(locale_from_path(""), None);
        assert_eq!(locale_from_path("/about"), None);
    }

    // ==================== localized_path Tests ====================

    #[test]
    fn test_localized_root() {
        assert_eq!(localized_path(Locale::JAPANESE, "/"), "/ja");
    }

    #[test]
    fn test_localized_nested_path() {
        assert_eq!(localized_path(Locale::ENGLISH, "/about/team"), "/en/about/team");
        assert_eq!(localized_path(Locale::ENGLISH, "/about/"), "/en/about/");
    }

    // ==================== route Tests ====================

    #[test]
    fn test_route_root_without_header_redirects_to_default() {
        assert_eq!(
            route("/", ""),
            RouteDecision::Redirect {
                location: "/ja".to_string(),
                locale: Locale::JAPANESE,
            }
        );
    }

    #[test]
    fn test_route_prefixed_path_passes_through() {
        // The header is ignored once the path names a locale.
        let decision = route("/en/docs", "ja-JP");
        assert_eq!(decision, RouteDecision::PassThrough(Locale::ENGLISH));
        assert_eq!(decision.locale(), Locale::ENGLISH);
    }

    #[test]
    fn test_route_unsupported_prefix_is_redirected() {
        assert_eq!(
            route("/fr/page", "en-US"),
            RouteDecision::Redirect {
                location: "/en/fr/page".to_string(),
                locale: Locale::ENGLISH,
            }
        );
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_resolved_locale_is_always_supported(header in ".*") {
            let locale = resolve_locale(&header);
            prop_assert!(LocaleRegistry::get().is_supported(locale.code()));
        }

        #[test]
        fn prop_prefixed_paths_pass_through(
            index in 0usize..2,
            rest in "(/[a-z0-9_-]{0,8}){0,4}",
            header in ".*",
        ) {
            let locale = Locale::all()[index];
            let path = format!("/{}{}", locale.code(), rest);
            prop_assert_eq!(route(&path, &header), RouteDecision::PassThrough(locale));
        }

        #[test]
        fn prop_at_most_one_redirect_hop(
            path in "/[a-z0-9/_-]{0,24}",
            header in ".*",
        ) {
            if let RouteDecision::Redirect { location, locale } = route(&path, &header) {
                prop_assert_eq!(route(&location, &header), RouteDecision::PassThrough(locale));
            }
        }
    }
}
