//! Uniform per-scheme entry points.

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::VersionResult;
use polyver_core::version::Version;
use polyver_gradle::version::GradleVersion;
use polyver_java::version::JavaVersion;
use polyver_maven::version::MavenVersion;
use polyver_rubygems::version::GemVersion;
use polyver_semver::version::SemanticVersion;

/// A versioning scheme: one parser for versions, one for its constraint
/// dialect.
///
/// Calendar versioning is not represented here: its parser is built from a
/// format string, so [`polyver_calver::format::CalendarScheme`] keeps its
/// own constructor-based API (and has no constraint dialect).
pub trait VersionScheme {
    type Version: Version;

    fn parse_version(&self, text: &str) -> VersionResult<Self::Version>;

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<Self::Version>>;
}

/// Maven versions and bracket-range constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenVersionScheme;

impl VersionScheme for MavenVersionScheme {
    type Version = MavenVersion;

    fn parse_version(&self, text: &str) -> VersionResult<MavenVersion> {
        MavenVersion::parse(text)
    }

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<MavenVersion>> {
        polyver_maven::constraint::parse_constraint(text)
    }
}

/// Gradle versions and bracket/ISO/dynamic constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleVersionScheme;

impl VersionScheme for GradleVersionScheme {
    type Version = GradleVersion;

    fn parse_version(&self, text: &str) -> VersionResult<GradleVersion> {
        GradleVersion::parse(text)
    }

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<GradleVersion>> {
        polyver_gradle::constraint::parse_constraint(text)
    }
}

/// Semantic versions with NPM range expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmVersionScheme;

impl VersionScheme for NpmVersionScheme {
    type Version = SemanticVersion;

    fn parse_version(&self, text: &str) -> VersionResult<SemanticVersion> {
        SemanticVersion::parse(text)
    }

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<SemanticVersion>> {
        polyver_npm::constraint::parse_constraint(text)
    }
}

/// Gem versions and requirement operators. A single constraint string may
/// carry several comma-separated requirements, as in a gemspec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyGemsVersionScheme;

impl VersionScheme for RubyGemsVersionScheme {
    type Version = GemVersion;

    fn parse_version(&self, text: &str) -> VersionResult<GemVersion> {
        GemVersion::parse(text)
    }

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<GemVersion>> {
        let requirements: Vec<&str> = text.split(',').collect();
        polyver_rubygems::constraint::parse_constraint(&requirements)
    }
}

/// Java platform versions and bracket ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaVersionScheme;

impl VersionScheme for JavaVersionScheme {
    type Version = JavaVersion;

    fn parse_version(&self, text: &str) -> VersionResult<JavaVersion> {
        JavaVersion::parse(text)
    }

    fn parse_constraint(&self, text: &str) -> VersionResult<VersionConstraint<JavaVersion>> {
        polyver_java::constraint::parse_constraint(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_parse_their_dialects() {
        assert!(MavenVersionScheme.parse_constraint("[1.0,2.0)").is_ok());
        assert!(GradleVersionScheme.parse_constraint("1.+").is_ok());
        assert!(NpmVersionScheme.parse_constraint("^1.2.3").is_ok());
        assert!(RubyGemsVersionScheme.parse_constraint("~> 1.4, >= 1.4.1").is_ok());
        assert!(JavaVersionScheme.parse_constraint("[17,21)").is_ok());
    }

    #[test]
    fn gem_requirement_lists_split_on_commas() {
        let c = RubyGemsVersionScheme.parse_constraint("~> 1.0, >= 1.5").unwrap();
        assert_eq!(c.to_string(), "[1.5,2.ZZZ)");
    }
}
