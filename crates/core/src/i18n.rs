//! Locale handling and the translation dictionary.
//!
//! The dictionary is a flattened key→string table per locale. Lookup is
//! fail-open: a miss falls back to the English table and finally to the key
//! itself, so a missing translation degrades to a readable label instead of
//! breaking rendering.
//!
//! Locale preference is resolved through an explicit [`StoragePort`] rather
//! than ambient global state, so the persistence mechanism (browser storage,
//! a config file, an in-memory map in tests) is swappable.

use serde::{Deserialize, Serialize};

/// Storage key under which the explicit locale choice is persisted.
pub const LOCALE_STORAGE_KEY: &str = "atelier.locale";

/// Supported site locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// French (default site locale, unprefixed in URLs).
    Fr,
    /// English.
    En,
    /// Russian.
    Ru,
}

/// Ordered list of supported locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::Fr, Locale::En, Locale::Ru];

/// Fallback when neither a stored choice nor a browser language matches.
pub const DEFAULT_LOCALE: Locale = Locale::En;

impl Locale {
    /// Canonical locale tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// Parse a locale value, tolerant of case and region tags (`ru-RU` → Ru).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "fr" => Some(Self::Fr),
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    /// URL prefix for locale-scoped routes. French is the unprefixed default.
    pub fn path_prefix(self) -> &'static str {
        match self {
            Self::Fr => "",
            Self::En => "/en",
            Self::Ru => "/ru",
        }
    }

    /// Resolve the locale addressed by the first path segment.
    ///
    /// An unrecognized or empty segment addresses the default (French) site.
    pub fn from_path_segment(segment: &str) -> Self {
        match segment {
            "en" => Self::En,
            "ru" => Self::Ru,
            _ => Self::Fr,
        }
    }
}

/// Look up a translation for `key` in the given locale.
///
/// Never panics: a miss falls back to the English table, then to the key
/// itself.
pub fn translate(locale: Locale, key: &str) -> &str {
    if let Some(value) = lookup(table_for(locale), key) {
        return value;
    }
    if let Some(value) = lookup(EN, key) {
        return value;
    }
    // Fail-open: surface the key as a visible label.
    key
}

fn table_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::Fr => FR,
        Locale::En => EN,
        Locale::Ru => RU,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, value)| *value)
}

/// Persistence port for the explicit locale choice.
///
/// Implementations are free to use interior mutability; the trait takes
/// `&self` so a shared handle can both read and write.
pub trait StoragePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory [`StoragePort`] used by tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

/// Locale preference resolution.
///
/// Ordering: explicit stored choice > first supported match in the
/// browser-reported language list > [`DEFAULT_LOCALE`].
pub struct LocalePreference;

impl LocalePreference {
    /// Resolve the effective locale for a visitor.
    pub fn resolve(storage: &dyn StoragePort, browser_languages: &[&str]) -> Locale {
        if let Some(saved) = storage.get(LOCALE_STORAGE_KEY) {
            if let Some(locale) = Locale::parse(&saved) {
                return locale;
            }
        }
        browser_languages
            .iter()
            .find_map(|lang| Locale::parse(lang))
            .unwrap_or(DEFAULT_LOCALE)
    }

    /// Persist an explicit locale choice through the port.
    pub fn remember(storage: &dyn StoragePort, locale: Locale) {
        storage.set(LOCALE_STORAGE_KEY, locale.as_str());
    }
}

// ---------------------------------------------------------------------------
// String tables
// ---------------------------------------------------------------------------

const FR: &[(&str, &str)] = &[
    ("nav.home", "Accueil"),
    ("nav.services", "Services"),
    ("nav.portfolio", "Réalisations"),
    ("nav.contact", "Contact"),
    ("contact.title", "Parlons de votre projet"),
    ("contact.form.name", "Nom"),
    ("contact.form.email", "Adresse e-mail"),
    ("contact.form.message", "Votre message"),
    ("contact.form.send", "Envoyer"),
    ("contact.success", "Merci ! Nous revenons vers vous sous 24 h."),
    ("contact.error", "Une erreur est survenue. Merci de réessayer."),
    ("admin.messages.title", "Messages reçus"),
    ("admin.messages.active", "Boîte de réception"),
    ("admin.messages.trash", "Corbeille"),
    ("admin.messages.restore", "Restaurer"),
    ("admin.messages.delete_forever", "Supprimer définitivement"),
    ("admin.messages.empty", "Aucun message dans cette vue."),
];

const EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.services", "Services"),
    ("nav.portfolio", "Portfolio"),
    ("nav.contact", "Contact"),
    ("contact.title", "Let's talk about your project"),
    ("contact.form.name", "Name"),
    ("contact.form.email", "Email address"),
    ("contact.form.message", "Your message"),
    ("contact.form.send", "Send"),
    ("contact.success", "Thank you! We'll get back to you within 24 hours."),
    ("contact.error", "Something went wrong. Please try again."),
    ("admin.messages.title", "Inbox"),
    ("admin.messages.active", "Inbox"),
    ("admin.messages.trash", "Trash"),
    ("admin.messages.restore", "Restore"),
    ("admin.messages.delete_forever", "Delete permanently"),
    ("admin.messages.empty", "No messages in this view."),
];

const RU: &[(&str, &str)] = &[
    ("nav.home", "Главная"),
    ("nav.services", "Услуги"),
    ("nav.portfolio", "Портфолио"),
    ("nav.contact", "Контакты"),
    ("contact.title", "Обсудим ваш проект"),
    ("contact.form.name", "Имя"),
    ("contact.form.email", "Электронная почта"),
    ("contact.form.message", "Ваше сообщение"),
    ("contact.form.send", "Отправить"),
    ("contact.success", "Спасибо! Мы ответим в течение 24 часов."),
    ("contact.error", "Произошла ошибка. Попробуйте ещё раз."),
    ("admin.messages.title", "Входящие"),
    ("admin.messages.active", "Входящие"),
    ("admin.messages.trash", "Корзина"),
    ("admin.messages.restore", "Восстановить"),
    ("admin.messages.delete_forever", "Удалить навсегда"),
    ("admin.messages.empty", "В этом разделе нет сообщений."),
];
