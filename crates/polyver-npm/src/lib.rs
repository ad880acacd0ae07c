//! NPM dependency range expressions.
//!
//! NPM's high-level notations (`^`, `~`, hyphen ranges, X-ranges) are
//! translated to primitive comparators over semantic versions and from there
//! to plain intervals. An expression is an `||` disjunction of whitespace
//! AND clauses; each clause lowers to exactly one interval.

pub mod constraint;
mod partial;
