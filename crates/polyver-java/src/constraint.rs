//! Java version range expressions.

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::range::VersionRange;
use tracing::trace;

use crate::version::JavaVersion;

/// Parse a Java version range.
///
/// Accepts `[a,b]`, `(a,b)`, mixed and unbounded forms, the point `[v]`,
/// and a bare version `v`, which spans `[v, next-feature)` — except `1.0`,
/// which covers only the 1.0 line: `[1.0, 1.1)`.
pub fn parse_constraint(text: &str) -> VersionResult<VersionConstraint<JavaVersion>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VersionError::parsing("empty Java constraint"));
    }
    if !trimmed.starts_with(['[', '(']) {
        return bare_version_range(trimmed).map(VersionConstraint::from);
    }

    let close = trimmed.chars().next_back();
    if !matches!(close, Some(']' | ')')) {
        return Err(VersionError::parsing(format!("unclosed range '{text}'")));
    }
    let min_included = trimmed.starts_with('[');
    let max_included = close == Some(']');
    let inner = &trimmed[1..trimmed.len() - 1];

    if let Some((lo, hi)) = inner.split_once(',') {
        let lo = lo.trim();
        let hi = hi.trim();
        let min = if lo.is_empty() {
            None
        } else {
            Some(JavaVersion::parse(lo)?)
        };
        let max = if hi.is_empty() {
            None
        } else {
            Some(JavaVersion::parse(hi)?)
        };
        if let (Some(a), Some(b)) = (&min, &max) {
            if a > b {
                return Err(VersionError::parsing(format!(
                    "range '{text}' has its bounds out of order"
                )));
            }
        }
        let min_included = min_included && min.is_some();
        let max_included = max_included && max.is_some();
        return Ok(VersionRange::new(min, max, min_included, max_included).into());
    }

    if !(min_included && max_included) {
        return Err(VersionError::parsing(format!(
            "a single version requires inclusive brackets, got '{text}'"
        )));
    }
    Ok(VersionRange::exactly(JavaVersion::parse(inner.trim())?).into())
}

/// A bare version admits everything up to the next feature release.
fn bare_version_range(text: &str) -> VersionResult<VersionRange<JavaVersion>> {
    let version = JavaVersion::parse(text)?;
    let ceiling = if text == "1.0" {
        JavaVersion::parse("1.1")?
    } else {
        JavaVersion::parse(&(version.feature() + 1).to_string())?
    };
    trace!(version = %version, ceiling = %ceiling, "lowered bare java version");
    Ok(VersionRange::new(
        Some(version),
        Some(ceiling),
        true,
        false,
    ))
}
