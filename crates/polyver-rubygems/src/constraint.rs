//! Gem requirement parsing and lowering.

use std::collections::BTreeSet;

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::range::VersionRange;
use tracing::trace;

use crate::version::GemVersion;

/// Parse a set of Gem requirement strings, ANDed together.
///
/// Arguments are deduplicated and order-independent. Each requirement is an
/// optional operator (`=`, `!=`, `<`, `<=`, `>`, `>=`, `~>`; `=` when
/// omitted) followed by a version. The pessimistic `~>X` lowers to
/// `[X, next_version(X).ZZZ)`; the `.ZZZ` tail keeps pre-releases of the
/// next segment out.
pub fn parse_constraint<S: AsRef<str>>(requirements: &[S]) -> VersionResult<VersionConstraint<GemVersion>> {
    let unique: BTreeSet<&str> = requirements
        .iter()
        .map(|r| r.as_ref().trim())
        .filter(|r| !r.is_empty())
        .collect();
    if unique.is_empty() {
        return Err(VersionError::parsing("empty Gem requirement"));
    }
    let mut constraint = VersionConstraint::any();
    for requirement in unique {
        let lowered = parse_requirement(requirement)?;
        trace!(requirement, lowered = %lowered, "lowered gem requirement");
        constraint = constraint.intersect(&lowered);
    }
    Ok(constraint)
}

fn parse_requirement(text: &str) -> VersionResult<VersionConstraint<GemVersion>> {
    let (operator, rest) = split_operator(text);
    let version = GemVersion::parse(rest)?;
    let constraint = match operator {
        "=" => VersionConstraint::from(VersionRange::exactly(version)),
        "!=" => VersionConstraint::from(VersionRange::exactly(version)).complement(),
        "<" => VersionConstraint::from(VersionRange::lower_than(version)),
        "<=" => VersionConstraint::from(VersionRange::at_most(version)),
        ">" => VersionConstraint::from(VersionRange::higher_than(version)),
        ">=" => VersionConstraint::from(VersionRange::at_least(version)),
        "~>" => {
            let ceiling = GemVersion::parse(&format!("{}.ZZZ", version.next_version()))?;
            VersionConstraint::from(VersionRange::new(
                Some(version),
                Some(ceiling),
                true,
                false,
            ))
        }
        _ => unreachable!("split_operator yields a known operator"),
    };
    Ok(constraint)
}

fn split_operator(text: &str) -> (&str, &str) {
    for operator in ["~>", "<=", ">=", "!=", "<", ">", "="] {
        if let Some(rest) = text.strip_prefix(operator) {
            return (operator, rest.trim_start());
        }
    }
    ("=", text)
}
