//! Per-locale dictionaries.
//!
//! Each supported locale has one JSON resource embedded at compile time. A
//! resource is a nested object whose leaves are strings; it is flattened into
//! dotted keys (`{"page": {"greeting": "..."}}` becomes `page.greeting`).
//! Parsed dictionaries are cached for the lifetime of the loader.

use crate::i18n::{Locale, RoutingMetrics};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Embedded dictionary resources, one per locale.
static RESOURCES: &[(Locale, &str)] = &[
    (Locale::JAPANESE, include_str!("../../dictionaries/ja.json")),
    (Locale::ENGLISH, include_str!("../../dictionaries/en.json")),
];

/// Dictionary configuration errors.
///
/// None of these are expected at request time: they mean a resource was
/// packaged incorrectly.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("no dictionary registered for default locale '{locale}'")]
    MissingDefault { locale: String },

    #[error("dictionary for '{locale}' is not valid JSON: {source}")]
    InvalidJson {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary for '{locale}' must be a JSON object at the top level")]
    NotAnObject { locale: String },

    #[error("dictionary for '{locale}' has a non-string value at '{key}'")]
    InvalidValue { locale: String, key: String },
}

/// Immutable key -> display string mapping for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    locale: Locale,
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// Parse a JSON resource into a flattened dictionary.
    pub fn parse(locale: Locale, source: &str) -> Result<Self, DictionaryError> {
        let value: Value =
            serde_json::from_str(source).map_err(|source| DictionaryError::InvalidJson {
                locale: locale.code().to_string(),
                source,
            })?;

        let Value::Object(root) = value else {
            return Err(DictionaryError::NotAnObject {
                locale: locale.code().to_string(),
            });
        };

        let mut entries = BTreeMap::new();
        for (key, value) in &root {
            flatten(locale, key.clone(), value, &mut entries)?;
        }

        Ok(Self { locale, entries })
    }

    /// Locale whose resource this dictionary was parsed from.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a dotted key such as `page.greeting`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(
    locale: Locale,
    key: String,
    value: &Value,
    out: &mut BTreeMap<String, String>,
) -> Result<(), DictionaryError> {
    match value {
        Value::String(text) => {
            out.insert(key, text.clone());
            Ok(())
        }
        Value::Object(children) => {
            for (child, value) in children {
                flatten(locale, format!("{}.{}", key, child), value, out)?;
            }
            Ok(())
        }
        _ => Err(DictionaryError::InvalidValue {
            locale: locale.code().to_string(),
            key,
        }),
    }
}

struct Resource {
    source: &'static str,
    parsed: OnceCell<Arc<Dictionary>>,
}

/// Loads dictionaries by locale tag, falling back to the default locale.
pub struct DictionaryLoader {
    resources: HashMap<Locale, Resource>,
    default: Locale,
    metrics: Arc<RoutingMetrics>,
}

impl DictionaryLoader {
    /// Loader over the embedded resources.
    pub fn new(metrics: Arc<RoutingMetrics>) -> Result<Self, DictionaryError> {
        Self::with_resources(RESOURCES, metrics)
    }

    /// Loader over an explicit resource table.
    ///
    /// Fails if the table has no resource for the default locale.
    pub fn with_resources(
        resources: &[(Locale, &'static str)],
        metrics: Arc<RoutingMetrics>,
    ) -> Result<Self, DictionaryError> {
        let default = Locale::default_locale();
        let resources: HashMap<_, _> = resources
            .iter()
            .map(|(locale, source)| {
                (
                    *locale,
                    Resource {
                        source: *source,
                        parsed: OnceCell::new(),
                    },
                )
            })
            .collect();

        if !resources.contains_key(&default) {
            return Err(DictionaryError::MissingDefault {
                locale: default.code().to_string(),
            });
        }

        Ok(Self {
            resources,
            default,
            metrics,
        })
    }

    /// Locales that have a resource, in priority order.
    pub fn registered(&self) -> Vec<Locale> {
        Locale::all()
            .into_iter()
            .filter(|locale| self.resources.contains_key(locale))
            .collect()
    }

    /// Load the dictionary for `tag`.
    ///
    /// Tags without a resource (including unsupported tags) get the default
    /// locale's dictionary. The first load of each resource parses it; later
    /// loads return the cached `Arc`.
    pub async fn load(&self, tag: &str) -> Result<Arc<Dictionary>, DictionaryError> {
        let found = Locale::from_code(tag)
            .ok()
            .and_then(|locale| self.resources.get(&locale).map(|res| (locale, res)));

        let (locale, resource) = match found {
            Some(found) => found,
            None => {
                debug!(
                    "No dictionary for '{}', falling back to '{}'",
                    tag, self.default
                );
                self.metrics.record_dictionary_fallback();
                let resource = self.resources.get(&self.default).ok_or_else(|| {
                    DictionaryError::MissingDefault {
                        locale: self.default.code().to_string(),
                    }
                })?;
                (self.default, resource)
            }
        };

        if let Some(dictionary) = resource.parsed.get() {
            self.metrics.record_dictionary_hit();
            return Ok(Arc::clone(dictionary));
        }

        let metrics = &self.metrics;
        let dictionary = resource
            .parsed
            .get_or_try_init(move || async move {
                metrics.record_dictionary_miss();
                let dictionary = Dictionary::parse(locale, resource.source)?;
                info!(
                    "Loaded '{}' dictionary ({} keys)",
                    locale,
                    dictionary.len()
                );
                Ok::<_, DictionaryError>(Arc::new(dictionary))
            })
            .await?;

        Ok(Arc::clone(dictionary))
    }

    /// Load every registered dictionary, in priority order.
    pub async fn load_all(&self) -> Result<Vec<Arc<Dictionary>>, DictionaryError> {
        let mut dictionaries = Vec::new();
        for locale in self.registered() {
            dictionaries.push(self.load(locale.code()).await?);
        }
        Ok(dictionaries)
    }

    /// The locale used when a tag has no resource.
    pub fn default_locale(&self) -> Locale {
        self.default
    }
}
