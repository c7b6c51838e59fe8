//! # Dependency Declarations
//!
//! A single manifest line describes either a registry package with an
//! optional constraint expression, or an editable install pinned to a
//! VCS revision:
//!
//! ```text
//! hacking<0.11,>=0.10.0
//! -e git+https://github.com/noironetworks/apicapi.git@master#egg=apicapi
//! ```
#[cfg(test)]
mod tests;

use crate::name::{Name, NameError};
use crate::specifier::{SpecifierError, SpecifierSet};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// One dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// A package resolved from the package index.
    Registry(Registry),
    /// A source-controlled checkout installed in place.
    Editable(Editable),
}

/// A registry entry: `<name><constraint-expression>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub name: Name,
    pub specifiers: SpecifierSet,
}

/// An editable VCS entry:
/// `-e <vcs>+<url>[@<rev>]#egg=<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editable {
    pub vcs: VcsKind,
    pub url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub egg: Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Hg,
    Bzr,
    Svn,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequirementError {
    #[error("A declaration cannot be empty")]
    Empty,
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Specifier(#[from] SpecifierError),
    #[error("Unknown VCS prefix in '{0}': expected git+, hg+, bzr+ or svn+")]
    UnknownVcs(String),
    #[error("An editable declaration requires an '#egg=' install name")]
    MissingEgg,
    #[error("The revision pin after '@' cannot be empty")]
    EmptyRev,
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("Unsupported installer option: '{0}'")]
    UnsupportedOption(String),
}

impl VcsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Hg => "hg",
            VcsKind::Bzr => "bzr",
            VcsKind::Svn => "svn",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VcsKind {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(VcsKind::Git),
            "hg" => Ok(VcsKind::Hg),
            "bzr" => Ok(VcsKind::Bzr),
            "svn" => Ok(VcsKind::Svn),
            _ => Err(RequirementError::UnknownVcs(s.to_string())),
        }
    }
}

impl Requirement {
    /// The name other entries in a manifest would refer to this
    /// declaration by: the project name of a registry entry or the
    /// egg name of an editable one.
    pub fn name(&self) -> &Name {
        match self {
            Requirement::Registry(r) => &r.name,
            Requirement::Editable(e) => &e.egg,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Requirement::Editable(_))
    }
}

fn registry(input: &str) -> Result<Requirement, RequirementError> {
    if let Some(c) = input.chars().next() {
        if !Name::is_valid_char(c) {
            return Err(NameError::InvalidStart(c).into());
        }
    }
    let split = input
        .find(|c: char| !Name::is_valid_char(c))
        .unwrap_or(input.len());
    let (name, constraints) = input.split_at(split);
    let name = Name::try_from(name)?;
    let specifiers = constraints.trim().parse::<SpecifierSet>()?;
    Ok(Requirement::Registry(Registry { name, specifiers }))
}

fn editable(input: &str) -> Result<Requirement, RequirementError> {
    let (kind, rest) = input
        .split_once('+')
        .ok_or_else(|| RequirementError::UnknownVcs(input.to_string()))?;
    let vcs: VcsKind = kind.parse()?;

    let (target, fragment) = rest.split_once('#').ok_or(RequirementError::MissingEgg)?;
    let egg = fragment
        .strip_prefix("egg=")
        .ok_or(RequirementError::MissingEgg)?;
    let egg = Name::try_from(egg)?;

    // The revision separator is the last `@` of the path portion; an
    // `@` in the userinfo comes before the last `/` and is left alone.
    let (target, rev) = match target.rfind('@') {
        Some(at) if at > target.rfind('/').unwrap_or(0) => {
            let rev = &target[at + 1..];
            if rev.is_empty() {
                return Err(RequirementError::EmptyRev);
            }
            (&target[..at], Some(rev.to_string()))
        }
        _ => (target, None),
    };

    let url = Url::parse(target)?;

    Ok(Requirement::Editable(Editable {
        vcs,
        url,
        rev,
        egg,
    }))
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RequirementError::Empty);
        }
        if let Some(rest) = s
            .strip_prefix("-e ")
            .or_else(|| s.strip_prefix("--editable "))
        {
            return editable(rest.trim_start());
        }
        if s.starts_with('-') {
            return Err(RequirementError::UnsupportedOption(s.to_string()));
        }
        registry(s)
    }
}

impl TryFrom<&str> for Requirement {
    type Error = RequirementError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Registry(Registry { name, specifiers }) => {
                write!(f, "{name}{specifiers}")
            }
            Requirement::Editable(Editable {
                vcs,
                url,
                rev,
                egg,
            }) => {
                write!(f, "-e {vcs}+{url}")?;
                if let Some(rev) = rev {
                    write!(f, "@{rev}")?;
                }
                write!(f, "#egg={egg}")
            }
        }
    }
}
