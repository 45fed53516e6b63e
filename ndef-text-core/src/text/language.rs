//! Language tags carried by text records
//!
//! The tag length lives in the low six bits of the status byte, so a tag can
//! be at most 63 bytes. Tags are normally short IANA codes such as `en` or
//! `pt-BR`; callers that have no explicit preference use the language of the
//! process locale, read from the usual POSIX environment variables.

use crate::error::EncodeError;

/// Largest language tag the status byte can describe
pub const MAX_LANGUAGE_TAG_LEN: usize = 0x3F;

/// Language used when the locale gives nothing usable
pub const DEFAULT_LANGUAGE: &str = "en";

const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A language tag that is known to fit in a text record status byte
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, EncodeError> {
        let tag = tag.into();
        if tag.len() > MAX_LANGUAGE_TAG_LEN {
            return Err(EncodeError::LanguageTagTooLong(tag.len()));
        }
        Ok(Self(tag))
    }

    /// Extract the language subtag from a locale name.
    ///
    /// `en_US.UTF-8` and `en-US` both give `en`. The `C` and `POSIX` locales
    /// carry no language and map to [`DEFAULT_LANGUAGE`].
    pub fn from_locale(locale: &str) -> Self {
        let language = locale
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim();

        if language.is_empty()
            || language.eq_ignore_ascii_case("C")
            || language.eq_ignore_ascii_case("POSIX")
            || language.len() > MAX_LANGUAGE_TAG_LEN
        {
            return Self::default();
        }

        Self(language.to_ascii_lowercase())
    }

    /// Language of the process locale
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the locale through `lookup`, honouring the POSIX precedence
    /// `LC_ALL`, `LC_MESSAGES`, `LANG`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in LOCALE_VARIABLES {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                tracing::trace!(variable = name, locale = %value, "resolved locale");
                return Self::from_locale(&value);
            }
        }
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for LanguageTag {
    type Error = EncodeError;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Self::new(tag)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
