//! Semantic version values backed by the `semver` crate.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed semantic version.
///
/// Wraps `semver::Version` and keeps both the original text (possibly with a
/// leading `v`) and the normalized form without it. Ordering, equality and
/// hashing follow SemVer precedence, which ignores build metadata; the
/// metadata is still preserved in the textual forms.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    original: String,
    normalized: String,
    inner: semver::Version,
}

impl SemanticVersion {
    /// Parse a semantic version, accepting an optional leading `v` or `V`.
    pub fn parse(text: &str) -> VersionResult<Self> {
        let version = Self::parse_lenient(text)?;
        check_int_bounds(text, &version.inner)?;
        Ok(version)
    }

    /// Grammar check only, without the 32-bit component bound. The snapshot
    /// constructor goes through here: its millisecond stamp is a valid
    /// SemVer identifier but deliberately exceeds the bound applied to
    /// external input.
    fn parse_lenient(text: &str) -> VersionResult<Self> {
        let normalized = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);
        let inner = semver::Version::parse(normalized).map_err(|e| {
            VersionError::parsing_with(format!("invalid semantic version '{text}'"), e)
        })?;
        Ok(Self {
            original: text.to_string(),
            normalized: normalized.to_string(),
            inner,
        })
    }

    /// A bare `major.minor.patch` version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let inner = semver::Version::new(major, minor, patch);
        let text = inner.to_string();
        Self {
            original: text.clone(),
            normalized: text,
            inner,
        }
    }

    /// Attach a (possibly dotted) pre-release identifier string to a core
    /// `major.minor.patch` version. An empty identifier yields the bare core
    /// version.
    pub fn with_pre_release(core: &str, pre_release: &str) -> VersionResult<Self> {
        if pre_release.is_empty() {
            return Self::parse(core);
        }
        Self::parse(&format!("{core}-{pre_release}"))
    }

    /// Build a snapshot of a core version.
    ///
    /// When `snapshot` is true the pre-release identifier is the wall-clock
    /// millisecond stamp taken now; stamps are non-decreasing within a
    /// process but carry no promise across restarts, and two snapshots taken
    /// in the same millisecond compare equal. Callers that need a stable
    /// order should supply their own identifier via
    /// [`SemanticVersion::with_pre_release`].
    pub fn with_snapshot(core: &str, snapshot: bool) -> VersionResult<Self> {
        if !snapshot {
            return Self::parse(core);
        }
        Self::parse(core)?;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self::parse_lenient(&format!("{core}-{millis}"))
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// The pre-release identifiers, in order; empty for a stable release.
    pub fn pre_release_identifiers(&self) -> Vec<&str> {
        if self.inner.pre.is_empty() {
            Vec::new()
        } else {
            self.inner.pre.as_str().split('.').collect()
        }
    }

    /// The build metadata identifiers, in order.
    pub fn build_identifiers(&self) -> Vec<&str> {
        if self.inner.build.is_empty() {
            Vec::new()
        } else {
            self.inner.build.as_str().split('.').collect()
        }
    }

    /// Just `major.minor.patch`.
    pub fn core_version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.inner.major, self.inner.minor, self.inner.patch
        )
    }

    /// The input without any leading `v`, pre-release and build kept.
    pub fn normalized_version(&self) -> &str {
        &self.normalized
    }

    /// The exact input text.
    pub fn original_version(&self) -> &str {
        &self.original
    }
}

/// The backing parser accepts the full 64-bit range; the wider toolchain
/// works with signed 32-bit components, so anything beyond that is rejected
/// here, including numeric pre-release identifiers.
fn check_int_bounds(text: &str, version: &semver::Version) -> VersionResult<()> {
    const LIMIT: u64 = i32::MAX as u64;
    for (what, value) in [
        ("major", version.major),
        ("minor", version.minor),
        ("patch", version.patch),
    ] {
        if value > LIMIT {
            return Err(VersionError::parsing(format!(
                "{what} component of '{text}' exceeds the 32-bit range"
            )));
        }
    }
    if !version.pre.is_empty() {
        for identifier in version.pre.as_str().split('.') {
            if identifier.bytes().all(|b| b.is_ascii_digit())
                && identifier.parse::<u64>().map_or(true, |n| n > LIMIT)
            {
                return Err(VersionError::parsing(format!(
                    "pre-release identifier '{identifier}' of '{text}' exceeds the 32-bit range"
                )));
            }
        }
    }
    Ok(())
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp_precedence(&other.inner)
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.major.hash(state);
        self.inner.minor.hash(state);
        self.inner.patch.hash(state);
        self.inner.pre.as_str().hash(state);
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Version for SemanticVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        !self.inner.pre.is_empty()
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
