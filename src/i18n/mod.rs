//! Internationalization (i18n) support for kabar
//!
//! This module provides multi-language support for UI labels, errors, and
//! chart legends. Supported languages: Indonesian (id), English (en). The
//! product's primary audience reads Indonesian; English is the fallback.
//!
//! # Environment Variables
//!
//! - `KABAR_LANG`: Set the preferred language (id, en). Defaults to Indonesian.

use std::sync::RwLock;

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

static CURRENT_LOCALE: RwLock<Option<String>> = RwLock::new(None);

/// Set the current locale for translations
///
/// # Arguments
///
/// * `locale` - Language code (id, en)
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(&normalized);
    if let Ok(mut current) = CURRENT_LOCALE.write() {
        *current = Some(normalized);
    }
}

/// Get the current locale
///
/// Returns the currently active locale or the default fallback.
pub fn current_locale() -> String {
    CURRENT_LOCALE
        .read()
        .ok()
        .and_then(|current| current.clone())
        .unwrap_or_else(|| "en".to_string())
}

/// Initialize i18n from environment variables
///
/// Reads `KABAR_LANG` to set the locale, falling back to Indonesian.
pub fn init_from_env() {
    let locale = std::env::var("KABAR_LANG").unwrap_or_else(|_| "id".to_string());
    set_locale(&locale);
}

/// Normalize locale code to supported format
///
/// Converts various locale formats to our standard format:
/// - id-ID, id_ID, indonesian -> id
/// - en-US, en_US, english -> en
fn normalize_locale(locale: &str) -> String {
    let lower = locale.to_lowercase();

    if lower.starts_with("id") || lower == "indonesian" {
        "id".to_string()
    } else {
        "en".to_string()
    }
}

/// Translate a key with optional parameters
///
/// This is a re-export of rust_i18n::t! for convenience.
#[doc(inline)]
pub use rust_i18n::t;
