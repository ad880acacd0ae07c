//! Scheme-independent version ordering and constraint set algebra.
//!
//! This crate defines the foundation every scheme engine builds on: the
//! [`version::Version`] abstraction (a totally ordered, immutable value), the
//! [`range::VersionRange`] interval with independently inclusive or exclusive
//! endpoints, and the [`constraint::VersionConstraint`] disjoint union of
//! ranges with exact set algebra (membership, containment, intersection,
//! union, difference, complement).
//!
//! Nothing here knows how a version string is tokenized; the algebra only
//! requires that versions are totally ordered.

pub mod constraint;
pub mod errors;
pub mod range;
pub mod version;
