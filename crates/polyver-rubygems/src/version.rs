//! Gem version tokenization and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed Gem version.
///
/// A dash rewrites to a `.pre.` separator before splitting, so `1.0-rc1`
/// reads as `1.0.pre.rc1` and follows the usual pre-release discipline:
/// every letter group sorts below every number.
#[derive(Debug, Clone)]
pub struct GemVersion {
    original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Segment {
    Number(u64),
    Letters(String),
}

impl GemVersion {
    pub fn parse(text: &str) -> VersionResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(VersionError::parsing("empty Gem version"));
        }
        let rewritten = trimmed.replace('-', ".pre.");
        let mut segments = Vec::new();
        for piece in rewritten.split('.') {
            if piece.is_empty() {
                return Err(VersionError::parsing(format!(
                    "Gem version '{text}' has an empty segment"
                )));
            }
            if !piece.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(VersionError::parsing(format!(
                    "Gem version '{text}' contains an invalid segment '{piece}'"
                )));
            }
            let mut rest = piece;
            while !rest.is_empty() {
                let digits = rest.bytes().next().is_some_and(|b| b.is_ascii_digit());
                let run = rest
                    .bytes()
                    .take_while(|b| b.is_ascii_digit() == digits)
                    .count();
                let (head, tail) = rest.split_at(run);
                if digits {
                    let number = head.parse::<u64>().map_err(|e| {
                        VersionError::parsing_with(
                            format!("numeric segment '{head}' of '{text}' is out of range"),
                            e,
                        )
                    })?;
                    segments.push(Segment::Number(number));
                } else {
                    segments.push(Segment::Letters(head.to_string()));
                }
                rest = tail;
            }
        }
        Ok(Self {
            original: text.to_string(),
            segments,
        })
    }

    /// Any letter group marks a pre-release.
    pub fn is_pre_release(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Letters(_)))
    }

    /// The next version the pessimistic operator bumps to: the trailing
    /// segment of the numeric prefix is dropped and the new last segment
    /// incremented (`5.3.1` becomes `5.4`, `5` becomes `6`).
    pub fn next_version(&self) -> GemVersion {
        let mut prefix: Vec<u64> = self
            .segments
            .iter()
            .take_while(|s| matches!(s, Segment::Number(_)))
            .map(|s| match s {
                Segment::Number(n) => *n,
                Segment::Letters(_) => unreachable!(),
            })
            .collect();
        if prefix.is_empty() {
            prefix.push(0);
        }
        if prefix.len() > 1 {
            prefix.pop();
        }
        if let Some(last) = prefix.last_mut() {
            *last += 1;
        }
        let text = prefix
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        GemVersion::parse(&text).expect("bumped numeric version is well formed")
    }

    /// Segments with the padding zeros removed: trailing zero segments are
    /// trimmed within the numeric prefix and within the tail after the
    /// first letter group, keeping equality and hashing consistent.
    fn canonical_segments(&self) -> (&[Segment], &[Segment]) {
        let split = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Letters(_)))
            .unwrap_or(self.segments.len());
        let (prefix, tail) = self.segments.split_at(split);
        (trim_zeros(prefix), trim_zeros(tail))
    }
}

fn trim_zeros(mut segments: &[Segment]) -> &[Segment] {
    while let [head @ .., Segment::Number(0)] = segments {
        if head.is_empty() {
            break;
        }
        segments = head;
    }
    segments
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    use Segment::*;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(Number(x)), Some(Number(y))) => x.cmp(y),
        (Some(Letters(x)), Some(Letters(y))) => x.cmp(y),
        (Some(Letters(_)), Some(Number(_))) => Ordering::Less,
        (Some(Number(_)), Some(Letters(_))) => Ordering::Greater,
        // A missing segment pads as zero; letters sort below that too.
        (Some(Number(n)), None) => n.cmp(&0),
        (None, Some(Number(n))) => 0.cmp(n),
        (Some(Letters(_)), None) => Ordering::Less,
        (None, Some(Letters(_))) => Ordering::Greater,
    }
}

impl Ord for GemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let longest = self.segments.len().max(other.segments.len());
        for i in 0..longest {
            let ord = compare_segments(self.segments.get(i), other.segments.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GemVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GemVersion {}

impl Hash for GemVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_segments().hash(state);
    }
}

impl fmt::Display for GemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for GemVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Version for GemVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        GemVersion::is_pre_release(self)
    }
}

impl Serialize for GemVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for GemVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
