//! Language catalog for the translation form.
//!
//! The catalog is static configuration data: an ordered list of
//! `(code, name)` pairs that populates both language selectors. Nothing in
//! the form logic depends on the list beyond membership checks.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the selectable languages, in display order
//! - `language`: Validated `Language` type that can only hold catalog codes
//!
//! # Example
//!
//! ```rust
//! use translatr::catalog::{Language, LanguageCatalog};
//!
//! let spanish = Language::from_code("es").unwrap();
//! assert_eq!(spanish.name(), "Spanish");
//!
//! let first = LanguageCatalog::get().list()[0];
//! assert_eq!(first.code, "en");
//! ```

mod language;
mod registry;

pub use language::{Language, UnknownLanguage};
pub use registry::{LanguageCatalog, LanguageEntry};
