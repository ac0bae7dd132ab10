//! Language catalog registry: the ordered list of selectable languages.
//!
//! Uses a singleton with `OnceLock` so the list is built once and shared
//! read-only afterwards.

use serde::Serialize;
use std::sync::OnceLock;

/// One selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    /// Short language code sent to the translation service (e.g., "en", "fr")
    pub code: &'static str,

    /// Human-readable label shown in the selectors (e.g., "English", "French")
    pub name: &'static str,
}

/// Global language catalog.
///
/// Entries keep their declaration order, which is also the display order of
/// both selectors.
pub struct LanguageCatalog {
    languages: Vec<LanguageEntry>,
}

static CATALOG: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Get the global catalog instance, building it on first access.
    pub fn get() -> &'static LanguageCatalog {
        CATALOG.get_or_init(|| LanguageCatalog {
            languages: default_languages(),
        })
    }

    /// Look up an entry by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageEntry)` if the code is in the catalog
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All entries in display order.
    pub fn list(&self) -> Vec<&LanguageEntry> {
        self.languages.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// The languages offered by LibreTranslate, English first.
fn default_languages() -> Vec<LanguageEntry> {
    [
        ("en", "English"),
        ("ar", "Arabic"),
        ("az", "Azerbaijani"),
        ("zh", "Chinese"),
        ("cs", "Czech"),
        ("nl", "Dutch"),
        ("fi", "Finnish"),
        ("fr", "French"),
        ("de", "German"),
        ("el", "Greek"),
        ("hi", "Hindi"),
        ("hu", "Hungarian"),
        ("id", "Indonesian"),
        ("ga", "Irish"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("fa", "Persian"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("sk", "Slovak"),
        ("es", "Spanish"),
        ("sv", "Swedish"),
        ("tr", "Turkish"),
        ("uk", "Ukrainian"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageEntry { code, name })
    .collect()
}
