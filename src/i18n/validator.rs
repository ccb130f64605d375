//! Dictionary consistency validation.
//!
//! Every locale's dictionary should expose the same keys as the default
//! locale's. A key missing from a translation is an error (the page would
//! render nothing for it); an extra key or an empty string is a warning.

use crate::i18n::Dictionary;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys present in the reference but missing from the candidate
    pub errors: Vec<String>,

    /// Extra keys and empty values
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator comparing a translated dictionary against a reference one.
pub struct DictionaryValidator;

impl DictionaryValidator {
    /// Compare `candidate` against `reference` (normally the default locale).
    pub fn validate(reference: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        for key in reference.keys() {
            if !candidate.contains_key(key) {
                report.errors.push(format!(
                    "'{}' is missing key '{}' (present in '{}')",
                    candidate.locale(),
                    key,
                    reference.locale()
                ));
            }
        }

        for (key, value) in candidate.iter() {
            if !reference.contains_key(key) {
                report.warnings.push(format!(
                    "'{}' has key '{}' not present in '{}'",
                    candidate.locale(),
                    key,
                    reference.locale()
                ));
            }
            if value.trim().is_empty() {
                report
                    .warnings
                    .push(format!("'{}' has an empty value at '{}'", candidate.locale(), key));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;

    fn dictionary(locale: Locale, json: &str) -> Dictionary {
        Dictionary::parse(locale, json).expect("Test dictionary should parse")
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_new_is_clean() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_identical_keys_are_clean() {
        let ja = dictionary(Locale::JAPANESE, r#"{"page": {"greeting": "やあ"}}"#);
        let en = dictionary(Locale::ENGLISH, r#"{"page": {"greeting": "Hi"}}"#);

        assert!(DictionaryValidator::validate(&ja, &en).is_clean());
    }

    #[test]
    fn test_missing_key_is_error() {
        let ja = dictionary(
            Locale::JAPANESE,
            r#"{"page": {"greeting": "やあ", "title": "ホーム"}}"#,
        );
        let en = dictionary(Locale::ENGLISH, r#"{"page": {"greeting": "Hi"}}"#);

        let report = DictionaryValidator::validate(&ja, &en);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("page.title"));
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_extra_key_is_warning() {
        let ja = dictionary(Locale::JAPANESE, r#"{"page": {"greeting": "やあ"}}"#);
        let en = dictionary(
            Locale::ENGLISH,
            r#"{"page": {"greeting": "Hi", "farewell": "Bye"}}"#,
        );

        let report = DictionaryValidator::validate(&ja, &en);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("page.farewell"));
    }

    #[test]
    fn test_empty_value_is_warning() {
        let ja = dictionary(Locale::JAPANESE, r#"{"page": {"greeting": "やあ"}}"#);
        let en = dictionary(Locale::ENGLISH, r#"{"page": {"greeting": "  "}}"#);

        let report = DictionaryValidator::validate(&ja, &en);
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("empty value"));
    }
}
