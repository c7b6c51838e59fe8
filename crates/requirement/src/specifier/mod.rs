//! # Version Specifiers
//!
//! The constraint expression attached to a registry entry: a
//! comma-separated list of `<op><version>` comparators such as
//! `<0.11,>=0.10.0`. The written order of comparators is preserved so
//! a manifest can be re-serialized exactly as its author spelled it.
#[cfg(test)]
mod tests;

use crate::version::{Version, VersionError};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A comparison operator, one of `==`, `!=`, `>=`, `<=`, `>`, `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

/// A single comparator, e.g. `>=0.10.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub op: Op,
    pub version: Version,
}

/// The full constraint expression of one declaration. An empty set
/// means the declaration is unconstrained ("latest").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecifierSet(Vec<Specifier>);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("A version constraint cannot be empty")]
    Empty,
    #[error("'{0}' does not start with a comparison operator (==, !=, >=, <=, >, <)")]
    InvalidOp(String),
    #[error(transparent)]
    Version(#[from] VersionError),
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
        }
    }

    fn strip(s: &str) -> Option<(Op, &str)> {
        const OPS: [(&str, Op); 6] = [
            ("==", Op::Eq),
            ("!=", Op::Ne),
            (">=", Op::Ge),
            ("<=", Op::Le),
            (">", Op::Gt),
            ("<", Op::Lt),
        ];
        OPS.iter()
            .find_map(|(token, op)| s.strip_prefix(token).map(|rest| (*op, rest)))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Specifier {
    /// Whether `version` satisfies this comparator.
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => *version == self.version,
            Op::Ne => *version != self.version,
            Op::Ge => *version >= self.version,
            Op::Le => *version <= self.version,
            Op::Gt => *version > self.version,
            Op::Lt => *version < self.version,
        }
    }
}

impl FromStr for Specifier {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SpecifierError::Empty);
        }
        let (op, rest) =
            Op::strip(s).ok_or_else(|| SpecifierError::InvalidOp(s.to_string()))?;
        let version = rest.trim().parse()?;
        Ok(Specifier { op, version })
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl SpecifierSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specifier> {
        self.0.iter()
    }

    /// Whether `version` satisfies every comparator in the set.
    pub fn contains(&self, version: &Version) -> bool {
        self.0.iter().all(|s| s.matches(version))
    }

    /// Whether any version at all can satisfy the set.
    ///
    /// The version order is treated as dense: a `!=` hole can only
    /// empty the matched range when the range has already collapsed to
    /// a single version.
    pub fn is_satisfiable(&self) -> bool {
        let mut lower: Option<(&Version, bool)> = None;
        let mut upper: Option<(&Version, bool)> = None;
        let mut pin: Option<&Version> = None;
        let mut holes: Vec<&Version> = Vec::new();

        for spec in &self.0 {
            let v = &spec.version;
            match spec.op {
                Op::Eq => match pin {
                    Some(p) if p != v => return false,
                    _ => pin = Some(v),
                },
                Op::Ne => holes.push(v),
                Op::Gt | Op::Ge => {
                    let inclusive = spec.op == Op::Ge;
                    let tighter = match lower {
                        None => true,
                        Some((bound, bound_inclusive)) => match v.cmp(bound) {
                            Ordering::Greater => true,
                            Ordering::Equal => bound_inclusive && !inclusive,
                            Ordering::Less => false,
                        },
                    };
                    if tighter {
                        lower = Some((v, inclusive));
                    }
                }
                Op::Lt | Op::Le => {
                    let inclusive = spec.op == Op::Le;
                    let tighter = match upper {
                        None => true,
                        Some((bound, bound_inclusive)) => match v.cmp(bound) {
                            Ordering::Less => true,
                            Ordering::Equal => bound_inclusive && !inclusive,
                            Ordering::Greater => false,
                        },
                    };
                    if tighter {
                        upper = Some((v, inclusive));
                    }
                }
            }
        }

        if let Some(p) = pin {
            return within(p, lower, upper) && holes.iter().all(|h| *h != p);
        }

        if let (Some((lo, lo_inclusive)), Some((hi, hi_inclusive))) = (lower, upper) {
            match lo.cmp(hi) {
                Ordering::Greater => return false,
                Ordering::Equal => {
                    if !(lo_inclusive && hi_inclusive) {
                        return false;
                    }
                    // the range is the single version `lo`
                    return holes.iter().all(|h| *h != lo);
                }
                Ordering::Less => (),
            }
        }

        true
    }
}

fn within(
    version: &Version,
    lower: Option<(&Version, bool)>,
    upper: Option<(&Version, bool)>,
) -> bool {
    let above = match lower {
        None => true,
        Some((bound, inclusive)) => match version.cmp(bound) {
            Ordering::Greater => true,
            Ordering::Equal => inclusive,
            Ordering::Less => false,
        },
    };
    let below = match upper {
        None => true,
        Some((bound, inclusive)) => match version.cmp(bound) {
            Ordering::Less => true,
            Ordering::Equal => inclusive,
            Ordering::Greater => false,
        },
    };
    above && below
}

impl FromStr for SpecifierSet {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SpecifierSet::default());
        }
        s.split(',')
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(SpecifierSet)
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut specs = self.0.iter();
        if let Some(first) = specs.next() {
            write!(f, "{first}")?;
        }
        for spec in specs {
            write!(f, ",{spec}")?;
        }
        Ok(())
    }
}

impl Serialize for SpecifierSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpecifierSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
