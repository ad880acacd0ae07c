//! Gradle dependency constraint notation.

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::range::VersionRange;
use tracing::trace;

use crate::version::GradleVersion;

/// Parse a Gradle constraint expression.
///
/// Accepts Maven-style brackets, ISO notation (`]a,b[`), the single-point
/// forms `[v]` and `v!!`, the dynamic suffix `N.+`, plain `+` (anything),
/// and an undecorated version meaning `[v,)`.
pub fn parse_constraint(text: &str) -> VersionResult<VersionConstraint<GradleVersion>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VersionError::parsing("empty Gradle constraint"));
    }
    if trimmed == "+" {
        return Ok(VersionConstraint::any());
    }
    if let Some(pinned) = trimmed.strip_suffix("!!") {
        let version = GradleVersion::parse(pinned)?;
        return Ok(VersionConstraint::from(VersionRange::exactly(version)));
    }
    if trimmed.starts_with(['[', '(', ']']) {
        return parse_bracket(trimmed).map(VersionConstraint::from);
    }
    if let Some(prefix) = trimmed.strip_suffix(".+") {
        return parse_dynamic(trimmed, prefix).map(VersionConstraint::from);
    }
    if trimmed.ends_with('+') {
        return Err(VersionError::parsing(format!(
            "dynamic version '{trimmed}' must end in '.+' or be a bare '+'"
        )));
    }
    let version = GradleVersion::parse(trimmed)?;
    Ok(VersionConstraint::from(VersionRange::at_least(version)))
}

fn parse_bracket(text: &str) -> VersionResult<VersionRange<GradleVersion>> {
    let open = text.chars().next().expect("non-empty");
    let close = text.chars().next_back().expect("non-empty");
    if text.len() < 2 || !matches!(close, ']' | ')' | '[') {
        return Err(VersionError::parsing(format!(
            "unclosed range '{text}'"
        )));
    }
    let min_included = open == '[';
    let max_included = close == ']';
    let inner = &text[1..text.len() - 1];

    if let Some((lo, hi)) = inner.split_once(',') {
        let lo = lo.trim();
        let hi = hi.trim();
        let min = if lo.is_empty() {
            None
        } else {
            Some(GradleVersion::parse(lo)?)
        };
        let max = if hi.is_empty() {
            None
        } else {
            Some(GradleVersion::parse(hi)?)
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
        return Ok(VersionRange::new(min, max, min_included, max_included));
    }

    if !(min_included && max_included) {
        return Err(VersionError::parsing(format!(
            "a single version requires inclusive brackets, got '{text}'"
        )));
    }
    Ok(VersionRange::exactly(GradleVersion::parse(inner.trim())?))
}

/// `prefix.+` spans `[prefix.0, prefix-with-last-component-bumped)`. The
/// component before `+` must be numeric.
fn parse_dynamic(original: &str, prefix: &str) -> VersionResult<VersionRange<GradleVersion>> {
    let tail_len = prefix
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if tail_len == 0 {
        return Err(VersionError::parsing(format!(
            "dynamic version '{original}' needs a numeric component before '+'"
        )));
    }
    let (head, digits) = prefix.split_at(prefix.len() - tail_len);
    let number: u64 = digits.parse().map_err(|e| {
        VersionError::parsing_with(format!("invalid numeric component in '{original}'"), e)
    })?;
    let lower = GradleVersion::parse(&format!("{prefix}.0"))?;
    let upper = GradleVersion::parse(&format!("{head}{}", number + 1))?;
    trace!(%lower, %upper, "lowered gradle dynamic version");
    Ok(VersionRange::new(Some(lower), Some(upper), true, false))
}
