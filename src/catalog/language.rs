//! Language type: a code that is known to be in the catalog.

use crate::catalog::{LanguageCatalog, LanguageEntry};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Returned when a code does not name any catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown language code: '{0}'")]
pub struct UnknownLanguage(pub String);

/// A validated language.
///
/// Only codes present in the [`LanguageCatalog`] can be turned into a
/// `Language`, so holding one is proof that the code is selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
    name: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language {
        code: "en",
        name: "English",
    };

    pub const FRENCH: Language = Language {
        code: "fr",
        name: "French",
    };

    /// Create a Language from a code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the catalog
    /// * `Err(UnknownLanguage)` otherwise
    ///
    /// # Example
    /// ```
    /// use translatr::catalog::Language;
    ///
    /// let spanish = Language::from_code("es").unwrap();
    /// assert_eq!(spanish.code(), "es");
    /// assert!(Language::from_code("klingon").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Language, UnknownLanguage> {
        LanguageCatalog::get()
            .get_by_code(code)
            .map(Language::from)
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }

    /// Source language selected when the form mounts.
    pub fn default_source() -> Language {
        Language::ENGLISH
    }

    /// Target language selected when the form mounts.
    pub fn default_target() -> Language {
        Language::FRENCH
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Serialized as its bare code, e.g. `"fr"`.
impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl From<&LanguageEntry> for Language {
    fn from(entry: &LanguageEntry) -> Self {
        Language {
            code: entry.code,
            name: entry.name,
        }
    }
}
