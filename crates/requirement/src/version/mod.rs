//! # Manifest Versions
//!
//! A version as it appears on the right-hand side of a manifest
//! constraint, e.g. `0.10.0`, `3.6`, `1.3b1` or `2.0.post1`:
//!
//! ```text
//! version = release pre? post? dev?
//! release = N ("." N)*
//! pre     = ("a"|"alpha"|"b"|"beta"|"rc"|"c") N?
//! post    = ".post" N?
//! dev     = ".dev" N?
//! ```
//!
//! Ordering pads missing trailing release segments with zeros, so
//! `0.10` and `0.10.0` compare equal; within one release,
//! developmental releases sort first, then pre-releases, the final
//! release, and post-releases last.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map, map_res, opt, value};
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

/// The parsed components of a version.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre: Option<PreRelease>,
    post: Option<u64>,
    dev: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreRelease {
    pub phase: PrePhase,
    pub number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrePhase {
    Alpha,
    Beta,
    Rc,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    #[error("A version cannot be empty")]
    Empty,
    #[error("'{0}' is not a valid version")]
    Invalid(String),
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn release(input: &str) -> IResult<&str, Vec<u64>> {
    separated_list1(tag("."), number)(input)
}

fn pre(input: &str) -> IResult<&str, PreRelease> {
    map(
        pair(
            alt((
                value(PrePhase::Alpha, alt((tag("alpha"), tag("a")))),
                value(PrePhase::Beta, alt((tag("beta"), tag("b")))),
                value(PrePhase::Rc, alt((tag("rc"), tag("c")))),
            )),
            opt(number),
        ),
        |(phase, n)| PreRelease {
            phase,
            number: n.unwrap_or(0),
        },
    )(input)
}

fn suffix<'a>(label: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, u64> {
    map(preceded(tag(label), opt(number)), |n| n.unwrap_or(0))
}

fn version(input: &str) -> IResult<&str, Version> {
    map(
        tuple((release, opt(pre), opt(suffix(".post")), opt(suffix(".dev")))),
        |(release, pre, post, dev)| Version {
            release,
            pre,
            post,
            dev,
        },
    )(input)
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        match all_consuming(version)(s) {
            Ok((_, v)) => Ok(v),
            Err(_) => Err(VersionError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Version {
    type Error = VersionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Version {
    fn segment(&self, i: usize) -> u64 {
        self.release.get(i).copied().unwrap_or(0)
    }

    // Ranks the sub-release parts: a developmental release on a bare
    // version sorts before any pre-release, a version without a
    // pre-release sorts after every pre-release of the same release,
    // and post-releases sort last.
    fn sub_key(&self) -> ((u8, u8, u64), (u8, u64), (u8, u64)) {
        let pre = match (&self.pre, self.post, self.dev) {
            (None, None, Some(_)) => (0, 0, 0),
            (Some(p), _, _) => (1, p.phase as u8, p.number),
            (None, _, _) => (2, 0, 0),
        };
        let post = match self.post {
            None => (0, 0),
            Some(n) => (1, n),
        };
        let dev = match self.dev {
            None => (1, 0),
            Some(n) => (0, n),
        };
        (pre, post, dev)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let segments = self.release.len().max(other.release.len());
        for i in 0..segments {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => (),
                ord => return ord,
            }
        }
        self.sub_key().cmp(&other.sub_key())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.release.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        if let Some(pre) = &self.pre {
            let phase = match pre.phase {
                PrePhase::Alpha => "a",
                PrePhase::Beta => "b",
                PrePhase::Rc => "rc",
            };
            write!(f, "{phase}{}", pre.number)?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
