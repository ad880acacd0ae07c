//! Maven range expressions: comma-separated bracket ranges.

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::range::VersionRange;
use tracing::trace;

use crate::version::MavenVersion;

/// Parse a Maven constraint expression.
///
/// `[`/`]` endpoints are inclusive, `(`/`)` exclusive; an absent endpoint is
/// unbounded; comma-separated ranges form a disjunction; `[prefix.*]`
/// expands to `[prefix.min,prefix.max]`. An undecorated version parses to
/// the weak constraint `[version,)` that a resolver may override.
pub fn parse_constraint(text: &str) -> VersionResult<VersionConstraint<MavenVersion>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VersionError::parsing("empty Maven constraint"));
    }
    if !trimmed.starts_with('[') && !trimmed.starts_with('(') {
        let version = MavenVersion::parse(trimmed)?;
        trace!(version = %version, "undecorated maven version parsed as weak lower bound");
        return Ok(VersionConstraint::from(VersionRange::at_least(version)).with_weak(true));
    }
    let mut ranges = Vec::new();
    for group in split_groups(trimmed)? {
        ranges.push(parse_range(group)?);
    }
    Ok(VersionConstraint::new(ranges))
}

/// Split a disjunction into its bracket groups, validating the separators.
fn split_groups(text: &str) -> VersionResult<Vec<&str>> {
    let mut groups = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if !rest.starts_with('[') && !rest.starts_with('(') {
            return Err(VersionError::parsing(format!(
                "expected '[' or '(' in constraint '{text}'"
            )));
        }
        let end = rest.find([']', ')']).ok_or_else(|| {
            VersionError::parsing(format!("unclosed range in constraint '{text}'"))
        })?;
        groups.push(&rest[..=end]);
        rest = rest[end + 1..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
            if rest.is_empty() {
                return Err(VersionError::parsing(format!(
                    "trailing comma in constraint '{text}'"
                )));
            }
        } else if !rest.is_empty() {
            return Err(VersionError::parsing(format!(
                "expected ',' between ranges in constraint '{text}'"
            )));
        }
    }
    Ok(groups)
}

fn parse_range(group: &str) -> VersionResult<VersionRange<MavenVersion>> {
    let min_included = group.starts_with('[');
    let max_included = group.ends_with(']');
    let inner = &group[1..group.len() - 1];

    if let Some((lo, hi)) = inner.split_once(',') {
        let lo = lo.trim();
        let hi = hi.trim();
        let min = if lo.is_empty() {
            None
        } else {
            Some(MavenVersion::parse(lo)?)
        };
        let max = if hi.is_empty() {
            None
        } else {
            Some(MavenVersion::parse(hi)?)
        };
        if let (Some(a), Some(b)) = (&min, &max) {
            if a > b {
                return Err(VersionError::parsing(format!(
                    "range '{group}' has its bounds out of order"
                )));
            }
        }
        let min_included = min_included && min.is_some();
        let max_included = max_included && max.is_some();
        return Ok(VersionRange::new(min, max, min_included, max_included));
    }

    let inner = inner.trim();
    if let Some(prefix) = inner.strip_suffix(".*") {
        if prefix.is_empty() {
            return Err(VersionError::parsing(format!(
                "wildcard range '{group}' is missing its prefix"
            )));
        }
        trace!(prefix, "expanding maven wildcard range");
        let lower = MavenVersion::parse(&format!("{prefix}.min"))?;
        let upper = MavenVersion::parse(&format!("{prefix}.max"))?;
        return Ok(VersionRange::new(Some(lower), Some(upper), true, true));
    }
    if !(min_included && max_included) {
        return Err(VersionError::parsing(format!(
            "a single version requires inclusive brackets, got '{group}'"
        )));
    }
    Ok(VersionRange::exactly(MavenVersion::parse(inner)?))
}
