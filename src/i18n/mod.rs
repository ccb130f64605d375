//! Internationalization (i18n): supported locales, request locale
//! resolution, and per-locale dictionaries.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and the default
//! - `locale`: `Locale`, a tag guaranteed to be in the registry
//! - `resolver`: `Accept-Language` matching and locale-prefixed path routing
//! - `dictionary`: Embedded per-locale dictionaries with default fallback
//! - `validator`: Key consistency checks between dictionaries
//! - `metrics`: Routing and dictionary counters
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_gateway::i18n::{resolve_locale, Locale};
//!
//! assert_eq!(resolve_locale("en-US,en;q=0.9"), Locale::ENGLISH);
//! ```

mod dictionary;
mod locale;
mod metrics;
mod registry;
mod resolver;
mod validator;

pub use dictionary::{Dictionary, DictionaryError, DictionaryLoader};
pub use locale::Locale;
pub use metrics::{MetricsReport, RoutingMetrics};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{locale_from_path, localized_path, resolve_locale, route, RouteDecision};
pub use validator::{DictionaryValidator, ValidationReport};
