//! Template rendering.
//!
//! [`Renderer`] resolves a message key + locale against the catalog and
//! substitutes `{param}` placeholders. Rendering never fails: an unknown
//! key degrades to the raw key string, a missing locale falls back to the
//! default locale, and unmatched placeholders pass through verbatim so a
//! gap is visible in the output instead of erroring the caller.

use std::sync::Arc;

use depot_core::params::ALL_PARAM_KEYS;
use depot_core::{Locale, MessageParams, ParamKey, DEFAULT_LOCALE, SUPPORTED_LOCALES};
use regex::{NoExpand, Regex};

use crate::catalog::MessageCatalog;

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// One locale's rendered title + message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedMessage {
    pub locale: Locale,
    pub title: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Catalog-backed template renderer. Cheap to clone; the catalog and the
/// compiled placeholder patterns are shared.
#[derive(Debug, Clone)]
pub struct Renderer {
    catalog: Arc<MessageCatalog>,
    /// One compiled case-insensitive `\{param\}` pattern per [`ParamKey`].
    patterns: Arc<Vec<(ParamKey, Regex)>>,
}

impl Renderer {
    pub fn new(catalog: Arc<MessageCatalog>) -> Self {
        let patterns = ALL_PARAM_KEYS
            .iter()
            .map(|key| {
                let pattern = format!(r"(?i)\{{{}\}}", regex::escape(key.as_str()));
                // Infallible: param names are fixed identifiers.
                let re = Regex::new(&pattern).expect("placeholder pattern must compile");
                (*key, re)
            })
            .collect();
        Self {
            catalog,
            patterns: Arc::new(patterns),
        }
    }

    /// Render `key` in `locale`.
    ///
    /// Lookup order: exact locale, then [`DEFAULT_LOCALE`], then the raw
    /// key string itself. Every case-insensitive occurrence of a supplied
    /// param's `{placeholder}` is replaced; placeholders without a param
    /// and params without a placeholder are both silently tolerated.
    pub fn render(&self, key: &str, locale: Locale, params: &MessageParams) -> String {
        let template = self
            .catalog
            .lookup(key, locale)
            .or_else(|| self.catalog.lookup(key, DEFAULT_LOCALE));

        match template {
            Some(text) => self.substitute(text, params),
            None => key.to_string(),
        }
    }

    /// [`Renderer::render`] for a raw locale tag (`"de-CH"`, `"EN_us"`,
    /// ...); unparseable tags render in the default locale.
    pub fn render_tag(&self, key: &str, locale_tag: &str, params: &MessageParams) -> String {
        self.render(key, Locale::parse_or_default(locale_tag), params)
    }

    /// Render a title/message pair in every supported locale.
    ///
    /// Always returns exactly one entry per locale in
    /// [`SUPPORTED_LOCALES`] order, catalog gaps included (those entries
    /// carry the fallback or raw-key text).
    pub fn render_all(
        &self,
        title_key: &str,
        message_key: &str,
        params: &MessageParams,
    ) -> Vec<LocalizedMessage> {
        SUPPORTED_LOCALES
            .iter()
            .map(|locale| LocalizedMessage {
                locale: *locale,
                title: self.render(title_key, *locale, params),
                message: self.render(message_key, *locale, params),
            })
            .collect()
    }

    fn substitute(&self, template: &str, params: &MessageParams) -> String {
        let mut text = template.to_string();
        for (key, re) in self.patterns.iter() {
            if let Some(value) = params.get(*key) {
                // NoExpand keeps `$` in values literal.
                text = re.replace_all(&text, NoExpand(value)).into_owned();
            }
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
