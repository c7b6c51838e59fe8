//! # Manifest Lint Rules
//!
//! Checks the manifest-level invariants a declaration list has to
//! hold: source-controlled pins first, one declaration per package,
//! and constraint sets that at least one version can satisfy.
//! Severity handling is left to the caller; every rule always runs.
use crate::core::Requirement;
use crate::manifest::Manifest;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Editable VCS entries must appear before all registry entries,
    /// or the installer's order-sensitive resolution can wedge on the
    /// registry versions it has already picked.
    EditableFirst,
    /// No two declarations may share a normalized package name; egg
    /// names and registry names live in one namespace.
    DuplicateName,
    /// Every constraint set must describe a non-empty version range.
    Unsatisfiable,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::EditableFirst => "editable-first",
            Rule::DuplicateName => "duplicate-name",
            Rule::Unsatisfiable => "unsatisfiable",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rule violation, anchored to the manifest line that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub rule: Rule,
    pub message: String,
}

/// All violations found in one manifest, ordered by line.
#[derive(Debug, Default, Serialize)]
pub struct Report(Vec<Diagnostic>);

impl Report {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl IntoIterator for Report {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Runs every rule against `manifest`.
pub fn check(manifest: &Manifest) -> Report {
    let mut diagnostics = Vec::new();

    editable_first(manifest, &mut diagnostics);
    duplicate_names(manifest, &mut diagnostics);
    unsatisfiable(manifest, &mut diagnostics);

    diagnostics.sort_by_key(|d| d.line);
    Report(diagnostics)
}

fn editable_first(manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
    let mut first_registry: Option<usize> = None;

    for (line, req) in manifest.requirements() {
        if req.is_editable() {
            if let Some(at) = first_registry {
                diagnostics.push(Diagnostic {
                    line,
                    rule: Rule::EditableFirst,
                    message: format!(
                        "editable entry '{}' appears after the first registry entry \
                         (line {at}); source-controlled pins must come first",
                        req.name()
                    ),
                });
            }
        } else if first_registry.is_none() {
            first_registry = Some(line);
        }
    }
}

fn duplicate_names(manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (line, req) in manifest.requirements() {
        match seen.get(&req.name().normalized()) {
            Some(&first) => diagnostics.push(Diagnostic {
                line,
                rule: Rule::DuplicateName,
                message: format!(
                    "'{}' duplicates the declaration on line {first}",
                    req.name()
                ),
            }),
            None => {
                seen.insert(req.name().normalized(), line);
            }
        }
    }
}

fn unsatisfiable(manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
    for (line, req) in manifest.requirements() {
        if let Requirement::Registry(r) = req {
            if !r.specifiers.is_satisfiable() {
                diagnostics.push(Diagnostic {
                    line,
                    rule: Rule::Unsatisfiable,
                    message: format!(
                        "no version of '{}' can satisfy '{}'",
                        r.name, r.specifiers
                    ),
                });
            }
        }
    }
}
