//! Gradle version tokenization and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed Gradle version: string parts with a parallel numeric view.
#[derive(Debug, Clone)]
pub struct GradleVersion {
    original: String,
    pub(crate) parts: Vec<String>,
    pub(crate) numeric: Vec<Option<u64>>,
}

/// Rank of a part for non-numeric comparison. `dev` sorts below ordinary
/// strings (rank 1), the release-like specials above them.
fn special_rank(part: &str) -> Option<u8> {
    match part.to_ascii_lowercase().as_str() {
        "dev" => Some(0),
        "rc" => Some(2),
        "snapshot" => Some(3),
        "final" => Some(4),
        "ga" => Some(5),
        "release" => Some(6),
        "sp" => Some(7),
        _ => None,
    }
}

fn rank(part: &str) -> u8 {
    special_rank(part).unwrap_or(1)
}

impl GradleVersion {
    pub fn parse(text: &str) -> VersionResult<Self> {
        let trimmed = text.trim();
        let parts = tokenize(trimmed);
        if parts.is_empty() {
            return Err(VersionError::parsing(format!(
                "Gradle version '{text}' has no parts"
            )));
        }
        let numeric = parts.iter().map(|p| p.parse::<u64>().ok()).collect();
        Ok(Self {
            original: text.to_string(),
            parts,
            numeric,
        })
    }

    /// True when the first special qualifier in the parts is `dev`, `rc` or
    /// `snapshot`.
    pub fn is_pre_release(&self) -> bool {
        self.parts
            .iter()
            .find_map(|p| special_rank(p))
            .is_some_and(|r| matches!(r, 0 | 2 | 3))
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// Split on `.`, `-`, `_`, `+` and on digit/letter boundaries; empty tokens
/// are dropped, so a `+` next to another delimiter is tolerated.
fn tokenize(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        match ch {
            '.' | '-' | '_' | '+' => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => {
                let boundary = current
                    .chars()
                    .next_back()
                    .is_some_and(|last| last.is_ascii_digit() != ch.is_ascii_digit());
                if boundary {
                    parts.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

impl Ord for GradleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let longest = self.parts.len().max(other.parts.len());
        for i in 0..longest {
            match (self.parts.get(i), other.parts.get(i)) {
                (Some(a), Some(b)) => {
                    let ord = match (self.numeric[i], other.numeric[i]) {
                        (Some(x), Some(y)) => x.cmp(&y),
                        // A number beats any non-numeric part.
                        (Some(_), None) => Ordering::Greater,
                        (None, Some(_)) => Ordering::Less,
                        (None, None) => {
                            let (ra, rb) = (rank(a), rank(b));
                            ra.cmp(&rb).then_with(|| {
                                if ra == 1 {
                                    a.cmp(b)
                                } else {
                                    Ordering::Equal
                                }
                            })
                        }
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                // An extra trailing numeric part ranks above, an extra
                // non-numeric part below.
                (Some(_), None) => {
                    return if self.numeric[i].is_some() {
                        Ordering::Greater
                    } else {
                        Ordering::Less
                    };
                }
                (None, Some(_)) => {
                    return if other.numeric[i].is_some() {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    };
                }
                (None, None) => unreachable!(),
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for GradleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GradleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GradleVersion {}

impl Hash for GradleVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (part, number) in self.parts.iter().zip(&self.numeric) {
            match number {
                Some(n) => (0u8, n).hash(state),
                None => match special_rank(part) {
                    Some(r) => (1u8, r).hash(state),
                    None => (2u8, part).hash(state),
                },
            }
        }
    }
}

impl fmt::Display for GradleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for GradleVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Version for GradleVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        GradleVersion::is_pre_release(self)
    }
}

impl Serialize for GradleVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for GradleVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> GradleVersion {
        GradleVersion::parse(text).unwrap()
    }

    #[test]
    fn numeric_ordering() {
        assert!(v("1.0") < v("1.1"));
        assert!(v("1.9") < v("1.10"));
        assert!(v("1.0.1") < v("2"));
    }

    #[test]
    fn special_qualifier_chain() {
        let chain = [
            "1.0-dev",
            "1.0-beta",
            "1.0-rc",
            "1.0-snapshot",
            "1.0-final",
            "1.0-ga",
            "1.0-release",
            "1.0-sp",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "expected {} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn numbers_beat_strings() {
        assert!(v("1.0-rc") < v("1.0.1"));
        assert!(v("1.0-release") < v("1.0.0"));
    }

    #[test]
    fn trailing_part_rules() {
        // Extra numeric part ranks above, extra non-numeric below.
        assert!(v("1.0") < v("1.0.0"));
        assert!(v("1.0-rc") < v("1.0"));
        assert!(v("1.0-whatever") < v("1.0"));
    }

    #[test]
    fn ordinary_strings_are_case_sensitive() {
        assert!(v("1.0-BETA") < v("1.0-beta"));
        assert_ne!(v("1.0-BETA"), v("1.0-beta"));
    }

    #[test]
    fn specials_are_recognized_in_any_case() {
        assert_eq!(v("1.0-SNAPSHOT"), v("1.0-snapshot"));
        assert_eq!(v("1.0-RC"), v("1.0-rc"));
    }

    #[test]
    fn timestamped_snapshot_sorts_above_symbolic_snapshot() {
        // Counter-intuitive but faithful: the numeric timestamp part wins
        // over the special qualifier.
        assert!(v("1.0-SNAPSHOT") < v("1.0-20150201.121010-123"));
    }

    #[test]
    fn pre_release_detection() {
        assert!(v("1.0-dev").is_pre_release());
        assert!(v("1.0-rc").is_pre_release());
        assert!(v("1.0-SNAPSHOT").is_pre_release());
        assert!(!v("1.0").is_pre_release());
        assert!(!v("1.0-final").is_pre_release());
        assert!(!v("1.0-sp").is_pre_release());
        // `beta` is not a Gradle special, so it does not mark a pre-release.
        assert!(!v("1.0-beta").is_pre_release());
        // The first special decides.
        assert!(v("1.0-rc-final").is_pre_release());
    }

    #[test]
    fn digit_letter_boundaries() {
        assert_eq!(v("1.0rc1"), v("1.0-rc-1"));
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(v("1.0-rc-2").to_string(), "1.0-rc-2");
        assert_eq!(v("1.0+build"), v("1.0.build"));
    }

    #[test]
    fn rejects_blank() {
        assert!(GradleVersion::parse("").is_err());
        assert!(GradleVersion::parse("...").is_err());
    }
}
