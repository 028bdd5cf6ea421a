use std::fmt;

use crate::error::ConfigError;

/// The bare name of a short or long option (`o`, `output`), without dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionName(String);

impl OptionName {
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let name = raw.into();
        let reason = if name.is_empty() {
            Some("name must not be empty")
        } else if name.starts_with('-') {
            Some("name must not start with '-'")
        } else if name.contains('=') {
            Some("name must not contain '='")
        } else if name.chars().any(char::is_whitespace) {
            Some("name must not contain whitespace")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OptionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
