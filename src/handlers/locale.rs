// src/handlers/locale.rs
use log::debug;
use serde::Deserialize;

use crate::config::Settings;
use crate::models::Locale;

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// `?lang=` wins over `Accept-Language`, which wins over the configured default.
pub fn resolve_locale(query: &LangQuery, accept_language: Option<&str>, settings: &Settings) -> Locale {
    if let Some(locale) = query.lang.as_deref().and_then(|lang| lang.parse().ok()) {
        return locale;
    }
    if let Some(locale) = accept_language.and_then(Locale::from_accept_language) {
        return locale;
    }
    debug!("No supported locale requested, using {}", settings.default_locale.code());
    settings.default_locale
}
