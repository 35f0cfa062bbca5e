use std::fmt;

use super::error::MetadataError;

/// A language code passed to the metadata tool, e.g. `en`, `de`, `zh_cn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lang(String);

impl Lang {
    const MAX_LEN: usize = 10;

    pub fn parse(raw: &str) -> Result<Self, MetadataError> {
        let valid = raw.len() <= Self::MAX_LEN
            && raw.starts_with(|c: char| c.is_ascii_alphabetic())
            && raw
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '_');

        if !valid {
            return Err(MetadataError::InvalidLanguage(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Lang {
    fn default() -> Self {
        Self("en".into())
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
