//! Translation of NPM range expressions into constraint algebra.

use polyver_core::constraint::VersionConstraint;
use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::range::VersionRange;
use polyver_semver::version::SemanticVersion;
use tracing::trace;

use crate::partial::Partial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    version: SemanticVersion,
}

impl Comparator {
    fn new(op: Op, version: SemanticVersion) -> Self {
        Self { op, version }
    }
}

/// Parse an NPM range expression into a constraint over semantic versions.
///
/// The expression is an `||` disjunction of whitespace-separated AND
/// clauses. Every clause lowers to a single interval: after translating the
/// high-level notations, at most one lower and one upper comparator may
/// remain, and `=` tolerates no company.
pub fn parse_constraint(text: &str) -> VersionResult<VersionConstraint<SemanticVersion>> {
    let mut ranges = Vec::new();
    for clause in text.split("||") {
        let clause = clause.trim();
        let range = parse_clause(clause)?;
        trace!(clause, range = %range, "lowered npm clause");
        ranges.push(range);
    }
    Ok(VersionConstraint::new(ranges))
}

fn parse_clause(clause: &str) -> VersionResult<VersionRange<SemanticVersion>> {
    let tokens = glue_operator_tokens(clause)?;
    let comparators = if tokens.iter().any(|t| t.as_str() == "-") {
        translate_hyphen_range(clause, &tokens)?
    } else {
        let mut all = Vec::new();
        for token in &tokens {
            all.extend(translate_token(token)?);
        }
        if all.is_empty() {
            // A blank clause matches every release.
            all.push(Comparator::new(Op::Ge, SemanticVersion::new(0, 0, 0)));
        }
        all
    };
    assemble_range(clause, comparators)
}

/// Rejoin a detached operator with the version literal after it
/// (`">= 1.2.3"` means `">=1.2.3"`).
fn glue_operator_tokens(clause: &str) -> VersionResult<Vec<String>> {
    const OPERATORS: [&str; 7] = [">=", "<=", ">", "<", "=", "~", "^"];
    let mut tokens: Vec<String> = Vec::new();
    let mut pending: Option<&str> = None;
    for token in clause.split_whitespace() {
        match pending.take() {
            Some(op) => tokens.push(format!("{op}{token}")),
            None if OPERATORS.contains(&token) => pending = Some(token),
            None => tokens.push(token.to_string()),
        }
    }
    if let Some(op) = pending {
        return Err(VersionError::parsing(format!(
            "dangling operator '{op}' in clause '{clause}'"
        )));
    }
    Ok(tokens)
}

fn translate_hyphen_range(clause: &str, tokens: &[String]) -> VersionResult<Vec<Comparator>> {
    let [lower, dash, upper] = tokens else {
        return Err(VersionError::parsing(format!(
            "malformed hyphen range '{clause}'"
        )));
    };
    if dash.as_str() != "-" {
        return Err(VersionError::parsing(format!(
            "malformed hyphen range '{clause}'"
        )));
    }
    let mut comparators = vec![Comparator::new(Op::Ge, Partial::parse(lower)?.floor()?)];
    let upper = Partial::parse(upper)?;
    if upper.is_full() {
        comparators.push(Comparator::new(Op::Le, upper.floor()?));
    } else if let Some(ceiling) = upper.xrange_upper()? {
        comparators.push(Comparator::new(Op::Lt, ceiling));
    }
    Ok(comparators)
}

fn translate_token(token: &str) -> VersionResult<Vec<Comparator>> {
    if let Some(rest) = token.strip_prefix('^') {
        return translate_caret(Partial::parse(rest)?);
    }
    if let Some(rest) = token.strip_prefix('~') {
        return translate_tilde(Partial::parse(rest)?);
    }
    for (literal, op) in [
        (">=", Op::Ge),
        ("<=", Op::Le),
        (">", Op::Gt),
        ("<", Op::Lt),
    ] {
        if let Some(rest) = token.strip_prefix(literal) {
            // Ordered comparisons read missing components as zero.
            return Ok(vec![Comparator::new(op, Partial::parse(rest)?.floor()?)]);
        }
    }
    let rest = token.strip_prefix('=').unwrap_or(token);
    translate_exact(Partial::parse(rest)?)
}

/// `=`/bare literals: a full version pins a point, a partial one spans the
/// X-range it covers.
fn translate_exact(partial: Partial) -> VersionResult<Vec<Comparator>> {
    if partial.is_full() {
        return Ok(vec![Comparator::new(Op::Eq, partial.floor()?)]);
    }
    let mut comparators = vec![Comparator::new(Op::Ge, partial.floor()?)];
    if let Some(ceiling) = partial.xrange_upper()? {
        comparators.push(Comparator::new(Op::Lt, ceiling));
    }
    Ok(comparators)
}

fn translate_caret(partial: Partial) -> VersionResult<Vec<Comparator>> {
    let Some(major) = partial.major else {
        return Ok(vec![Comparator::new(Op::Ge, SemanticVersion::new(0, 0, 0))]);
    };
    let floor = Comparator::new(Op::Ge, partial.floor()?);
    let upper = if major > 0 {
        format!("{}.0.0-0", major + 1)
    } else {
        match (partial.minor, partial.patch) {
            (None, _) => "1.0.0-0".to_string(),
            (Some(minor), _) if minor > 0 => format!("0.{}.0-0", minor + 1),
            (Some(_), None) => "0.1.0-0".to_string(),
            (Some(minor), Some(patch)) => format!("0.{minor}.{}-0", patch + 1),
        }
    };
    Ok(vec![
        floor,
        Comparator::new(Op::Lt, SemanticVersion::parse(&upper)?),
    ])
}

fn translate_tilde(partial: Partial) -> VersionResult<Vec<Comparator>> {
    let Some(major) = partial.major else {
        return Ok(vec![Comparator::new(Op::Ge, SemanticVersion::new(0, 0, 0))]);
    };
    let floor = Comparator::new(Op::Ge, partial.floor()?);
    let upper = match partial.minor {
        None => format!("{}.0.0-0", major + 1),
        Some(minor) => format!("{major}.{}.0-0", minor + 1),
    };
    Ok(vec![
        floor,
        Comparator::new(Op::Lt, SemanticVersion::parse(&upper)?),
    ])
}

/// Fold a clause's comparators into one interval.
fn assemble_range(
    clause: &str,
    comparators: Vec<Comparator>,
) -> VersionResult<VersionRange<SemanticVersion>> {
    let mut lower: Option<Comparator> = None;
    let mut upper: Option<Comparator> = None;
    let mut exact: Option<SemanticVersion> = None;
    let total = comparators.len();
    for comparator in comparators {
        match comparator.op {
            Op::Eq if total > 1 => {
                return Err(VersionError::parsing(format!(
                    "'=' cannot be combined with other comparators in clause '{clause}'"
                )));
            }
            Op::Eq => exact = Some(comparator.version),
            Op::Gt | Op::Ge => {
                if lower.replace(comparator).is_some() {
                    return Err(VersionError::parsing(format!(
                        "clause '{clause}' has more than one lower bound"
                    )));
                }
            }
            Op::Lt | Op::Le => {
                if upper.replace(comparator).is_some() {
                    return Err(VersionError::parsing(format!(
                        "clause '{clause}' has more than one upper bound"
                    )));
                }
            }
        }
    }
    if let Some(version) = exact {
        return Ok(VersionRange::exactly(version));
    }

    let (min, min_included) = match lower {
        Some(c) => (Some(c.version), c.op == Op::Ge),
        None => (None, false),
    };
    let (max, max_included) = match upper {
        Some(c) => (Some(c.version), c.op == Op::Le),
        None => (None, false),
    };
    if let (Some(lo), Some(hi)) = (&min, &max) {
        if lo > hi {
            return Err(VersionError::parsing(format!(
                "unsatisfiable clause '{clause}': lower bound exceeds upper bound"
            )));
        }
    }
    Ok(VersionRange::new(min, max, min_included, max_included))
}
