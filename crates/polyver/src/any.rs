//! Scheme-tagged versions for heterogeneous collections.

use std::cmp::Ordering;
use std::fmt;

use polyver_calver::version::CalendarVersion;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use polyver_gradle::version::GradleVersion;
use polyver_java::version::JavaVersion;
use polyver_maven::version::MavenVersion;
use polyver_rubygems::version::GemVersion;
use polyver_semver::version::SemanticVersion;

/// The versioning scheme a value was parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Semantic,
    Maven,
    Gradle,
    RubyGems,
    Calendar,
    Java,
}

impl Scheme {
    pub fn name(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::RubyGems => "rubygems",
            Self::Calendar => "calendar",
            Self::Java => "java",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A version of any scheme.
///
/// Within one scheme type, cross-scheme comparison is impossible by
/// construction; this wrapper restores a common type for mixed collections
/// and surfaces mixing as an error instead of silently coercing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyVersion {
    Semantic(SemanticVersion),
    Maven(MavenVersion),
    Gradle(GradleVersion),
    RubyGems(GemVersion),
    Calendar(CalendarVersion),
    Java(JavaVersion),
}

impl AnyVersion {
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Semantic(_) => Scheme::Semantic,
            Self::Maven(_) => Scheme::Maven,
            Self::Gradle(_) => Scheme::Gradle,
            Self::RubyGems(_) => Scheme::RubyGems,
            Self::Calendar(_) => Scheme::Calendar,
            Self::Java(_) => Scheme::Java,
        }
    }

    pub fn original(&self) -> &str {
        match self {
            Self::Semantic(v) => v.original(),
            Self::Maven(v) => v.original(),
            Self::Gradle(v) => v.original(),
            Self::RubyGems(v) => v.original(),
            Self::Calendar(v) => v.original(),
            Self::Java(v) => v.original(),
        }
    }

    pub fn is_pre_release(&self) -> bool {
        match self {
            Self::Semantic(v) => v.is_pre_release(),
            Self::Maven(v) => v.is_pre_release(),
            Self::Gradle(v) => v.is_pre_release(),
            Self::RubyGems(v) => v.is_pre_release(),
            Self::Calendar(v) => v.is_pre_release(),
            Self::Java(v) => v.is_pre_release(),
        }
    }

    /// Compare two versions of the same scheme; mixing schemes is an error,
    /// never a silent coercion.
    pub fn try_cmp(&self, other: &Self) -> VersionResult<Ordering> {
        match (self, other) {
            (Self::Semantic(a), Self::Semantic(b)) => Ok(a.cmp(b)),
            (Self::Maven(a), Self::Maven(b)) => Ok(a.cmp(b)),
            (Self::Gradle(a), Self::Gradle(b)) => Ok(a.cmp(b)),
            (Self::RubyGems(a), Self::RubyGems(b)) => Ok(a.cmp(b)),
            (Self::Calendar(a), Self::Calendar(b)) => Ok(a.cmp(b)),
            (Self::Java(a), Self::Java(b)) => Ok(a.cmp(b)),
            _ => Err(VersionError::SchemeMismatch {
                left: self.original().to_string(),
                left_scheme: self.scheme().name().to_string(),
                right: other.original().to_string(),
                right_scheme: other.scheme().name().to_string(),
            }),
        }
    }
}

impl fmt::Display for AnyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.original())
    }
}

impl From<SemanticVersion> for AnyVersion {
    fn from(version: SemanticVersion) -> Self {
        Self::Semantic(version)
    }
}

impl From<MavenVersion> for AnyVersion {
    fn from(version: MavenVersion) -> Self {
        Self::Maven(version)
    }
}

impl From<GradleVersion> for AnyVersion {
    fn from(version: GradleVersion) -> Self {
        Self::Gradle(version)
    }
}

impl From<GemVersion> for AnyVersion {
    fn from(version: GemVersion) -> Self {
        Self::RubyGems(version)
    }
}

impl From<CalendarVersion> for AnyVersion {
    fn from(version: CalendarVersion) -> Self {
        Self::Calendar(version)
    }
}

impl From<JavaVersion> for AnyVersion {
    fn from(version: JavaVersion) -> Self {
        Self::Java(version)
    }
}
