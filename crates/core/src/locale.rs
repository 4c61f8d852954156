//! Supported display locales and input normalization.
//!
//! Notification text is always materialized in every supported locale, so
//! the set is small, fixed, and ordered. Arbitrary caller input (HTTP
//! headers, stored preferences) is normalized onto this set via
//! [`Locale::parse`]; anything unrecognized resolves to
//! [`DEFAULT_LOCALE`] at lookup time rather than erroring.

use serde::{Deserialize, Serialize};

/// A supported display locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default and final fallback).
    En,
    /// German.
    De,
    /// French.
    Fr,
}

/// Ordered list of every supported locale.
///
/// The order is stable and is the order translation sets are produced in.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::De, Locale::Fr];

/// The locale used when input is unrecognized or a translation is missing.
pub const DEFAULT_LOCALE: Locale = Locale::En;

impl Locale {
    /// Canonical lowercase code for this locale.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Parse a locale from arbitrary input.
    ///
    /// Tolerates casing, `-`/`_` separators, and region suffixes: `"EN-us"`,
    /// `"en_US"`, and `"en"` all map to [`Locale::En`]. Returns `None` for
    /// empty or unrecognized input; callers that need a locale no matter
    /// what should use [`Locale::parse_or_default`].
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Parse a locale, substituting [`DEFAULT_LOCALE`] for anything that
    /// does not normalize onto the supported set.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or(DEFAULT_LOCALE)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
