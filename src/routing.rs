//! Locale routing middleware.
//!
//! Runs in front of every route. Requests whose path already starts with a
//! locale segment pass through; anything else is redirected to the
//! locale-prefixed path. Both outcomes carry an `x-locale` response header.
//! API, build-asset, image and favicon paths are not touched.

use crate::i18n::{route, Locale, RouteDecision};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{header::ACCEPT_LANGUAGE, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Response header naming the resolved locale.
pub const LOCALE_HEADER: &str = "x-locale";

/// Path prefix patterns that bypass locale routing.
///
/// These are regex fragments, so the `.` in `favicon.ico` matches any
/// character, the same as the front-end framework's path matcher.
pub const EXCLUDED_PATTERNS: &[&str] = &["/api", "/_next/static", "/_next/image", "/favicon.ico"];

static DEFAULT_EXCLUDED: OnceLock<Regex> = OnceLock::new();

/// Decides which request paths are subject to locale routing.
///
/// A path is excluded when it starts with one of the prefixes. Matching is
/// by raw prefix, so `/apis` is excluded along with `/api/health`.
/// The default filter uses `EXCLUDED_PATTERNS`.
#[derive(Debug, Clone)]
pub struct PathFilter {
    excluded: Option<Regex>,
}

impl PathFilter {
    /// Filter excluding the given literal path prefixes.
    pub fn new(prefixes: &[&str]) -> Result<Self, regex::Error> {
        if prefixes.is_empty() {
            return Ok(Self { excluded: None });
        }
        let escaped: Vec<String> = prefixes.iter().map(|p| regex::escape(p)).collect();
        Ok(Self {
            excluded: Some(Regex::new(&exclusion_pattern(&escaped[..]))?),
        })
    }

    /// Whether `path` bypasses locale routing.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded
            .as_ref()
            .map(|regex| regex.is_match(path))
            .unwrap_or(false)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        let regex = DEFAULT_EXCLUDED
            .get_or_init(|| Regex::new(&exclusion_pattern(EXCLUDED_PATTERNS)).unwrap());
        Self {
            excluded: Some(regex.clone()),
        }
    }
}

fn exclusion_pattern<S: AsRef<str>>(fragments: &[S]) -> String {
    let alternatives: Vec<&str> = fragments.iter().map(|f| f.as_ref()).collect();
    format!("^(?:{})", alternatives.join("|"))
}

/// Axum middleware applying locale routing to a request.
pub async fn locale_routing(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.filter.is_excluded(request.uri().path()) {
        state.metrics.record_skipped();
        return next.run(request).await;
    }

    // Lossy decoding keeps ASCII tags matchable next to non-ASCII bytes.
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    let decision = route(request.uri().path(), &accept_language);

    match decision {
        RouteDecision::PassThrough(locale) => {
            state.metrics.record_pass_through();
            request.extensions_mut().insert(locale);

            let mut response = next.run(request).await;
            set_locale_header(&mut response, locale);
            response
        }
        RouteDecision::Redirect { location, locale } => {
            state.metrics.record_redirect();

            let location = match request.uri().query() {
                Some(query) if state.config.redirect_preserve_query => {
                    format!("{}?{}", location, query)
                }
                _ => location,
            };
            debug!(
                "Redirecting {} -> {} (locale {})",
                request.uri().path(),
                location,
                locale
            );

            let mut response = Redirect::temporary(&location).into_response();
            set_locale_header(&mut response, locale);
            response
        }
    }
}

fn set_locale_header(response: &mut Response, locale: Locale) {
    response.headers_mut().insert(
        HeaderName::from_static(LOCALE_HEADER),
        HeaderValue::from_static(locale.code()),
    );
}
