//! Locale-prefixed routing and per-locale dictionaries for a small
//! internationalized front-end.
//!
//! Requests without a locale segment are redirected to `/<locale>/...`, with
//! the locale picked from `Accept-Language`. Pages then render strings from
//! the dictionary for that locale.

pub mod config;
pub mod error;
pub mod i18n;
pub mod routing;
pub mod server;
