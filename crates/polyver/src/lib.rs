//! Multi-scheme artifact version parsing and constraint algebra.
//!
//! polyver parses version strings from six ecosystems (Maven, Gradle,
//! NPM/semantic, RubyGems, calendar, Java) into totally ordered values,
//! parses each ecosystem's constraint dialect, and lowers everything onto
//! one interval representation with exact set algebra.
//!
//! This crate is the facade: it re-exports the core algebra and the scheme
//! engines, tags versions with their [`Scheme`], and offers the
//! heterogeneous [`AnyVersion`] wrapper plus the uniform [`VersionScheme`]
//! entry points.

pub mod any;
pub mod schemes;

pub use any::{AnyVersion, Scheme};
pub use polyver_calver::format::{CalendarScheme, ComponentCategory};
pub use polyver_calver::version::CalendarVersion;
pub use polyver_core::constraint::VersionConstraint;
pub use polyver_core::errors::{VersionError, VersionResult};
pub use polyver_core::range::VersionRange;
pub use polyver_core::version::Version;
pub use polyver_gradle::version::GradleVersion;
pub use polyver_java::version::JavaVersion;
pub use polyver_maven::version::MavenVersion;
pub use polyver_rubygems::version::GemVersion;
pub use polyver_semver::version::SemanticVersion;
pub use schemes::{
    GradleVersionScheme, JavaVersionScheme, MavenVersionScheme, NpmVersionScheme,
    RubyGemsVersionScheme, VersionScheme,
};
