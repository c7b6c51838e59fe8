//! # Whole-File Manifest Model
//!
//! A manifest is a list of lines: blank lines, `#` comments, and
//! dependency declarations with an optional trailing comment. The
//! external installer processes declarations top to bottom and the
//! outcome of its resolution is order-sensitive, so declaration order
//! is part of the data and is always preserved; this crate never
//! reorders entries on its own.
use crate::core::{Requirement, RequirementError};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One line of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Blank,
    Comment(String),
    Declaration {
        requirement: Requirement,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
}

/// A parsed manifest. Lines keep the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Manifest {
    lines: Vec<Line>,
}

/// A declaration that failed to parse, with its 1-based line number.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: RequirementError,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    #[error("{}", render(.0))]
    Syntax(Vec<LineError>),
}

fn render(errors: &[LineError]) -> String {
    let mut out = format!("{} declaration(s) failed to parse", errors.len());
    for error in errors {
        out.push_str("\n  ");
        out.push_str(&error.to_string());
    }
    out
}

impl Manifest {
    /// Parses a whole manifest. Every invalid declaration is collected
    /// so a caller can report all of them at once rather than stopping
    /// at the first.
    pub fn parse(input: &str) -> Result<Manifest, ManifestError> {
        let mut lines = Vec::new();
        let mut errors = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                lines.push(Line::Blank);
            } else if let Some(text) = trimmed.strip_prefix('#') {
                lines.push(Line::Comment(text.trim().to_string()));
            } else {
                let (declaration, comment) = split_trailing_comment(trimmed);
                match declaration.trim_end().parse::<Requirement>() {
                    Ok(requirement) => {
                        tracing::trace!(line, %requirement, "parsed declaration");
                        lines.push(Line::Declaration {
                            requirement,
                            comment,
                        });
                    }
                    Err(source) => errors.push(LineError { line, source }),
                }
            }
        }

        if errors.is_empty() {
            Ok(Manifest { lines })
        } else {
            Err(ManifestError::Syntax(errors))
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The declarations of the manifest in written order, each with
    /// its 1-based line number.
    pub fn requirements(&self) -> impl Iterator<Item = (usize, &Requirement)> {
        self.lines.iter().enumerate().filter_map(|(idx, line)| {
            match line {
                Line::Declaration { requirement, .. } => Some((idx + 1, requirement)),
                _ => None,
            }
        })
    }
}

// A `#` opens a trailing comment only when preceded by whitespace;
// the `#egg=` fragment of a VCS URL is part of the declaration.
fn split_trailing_comment(s: &str) -> (&str, Option<String>) {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return (&s[..i], Some(s[i + 1..].trim().to_string()));
        }
    }
    (s, None)
}

impl FromStr for Manifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Manifest::parse(s)
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Blank => writeln!(f)?,
                Line::Comment(text) if text.is_empty() => writeln!(f, "#")?,
                Line::Comment(text) => writeln!(f, "# {text}")?,
                Line::Declaration {
                    requirement,
                    comment,
                } => {
                    write!(f, "{requirement}")?;
                    if let Some(comment) = comment {
                        write!(f, " # {comment}")?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}
