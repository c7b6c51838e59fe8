#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// A package name as written in a manifest: either the project name of
/// a registry entry or the `#egg=` install name of an editable entry.
///
/// Instances can only be created through validation, so holding a
/// `Name` is proof the string is a well-formed package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Name(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("A package name cannot be empty")]
    Empty,
    #[error("A package name must start with a letter or digit, not '{0}'")]
    InvalidStart(char),
    #[error("A package name must end with a letter or digit, not '{0}'")]
    InvalidEnd(char),
    #[error("The package name contains invalid characters: '{0}'")]
    InvalidCharacters(String),
}

impl Name {
    pub(crate) fn validate(s: &str) -> Result<(), NameError> {
        match s.chars().next() {
            None => return Err(NameError::Empty),
            Some(c) if !c.is_ascii_alphanumeric() => return Err(NameError::InvalidStart(c)),
            Some(_) => (),
        }

        if let Some(c) = s.chars().next_back() {
            if !c.is_ascii_alphanumeric() {
                return Err(NameError::InvalidEnd(c));
            }
        }

        let invalid: String = s.chars().filter(|&c| !Name::is_valid_char(c)).collect();

        if !invalid.is_empty() {
            return Err(NameError::InvalidCharacters(invalid));
        }

        Ok(())
    }

    pub(crate) fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
    }

    /// The canonical form used to decide whether two declarations name
    /// the same package: lowercased, with every run of `-`, `_` and
    /// `.` collapsed into a single `-`.
    pub fn normalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut in_run = false;
        for c in self.0.chars() {
            if matches!(c, '-' | '_' | '.') {
                in_run = true;
            } else {
                if in_run {
                    out.push('-');
                    in_run = false;
                }
                out.push(c.to_ascii_lowercase());
            }
        }
        out
    }
}

impl Deref for Name {
    type Target = String;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::validate(s)?;
        Ok(Name(s.to_string()))
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Name::validate(&s)?;
        Ok(Name(s))
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Name::from_str(s)
    }
}
