//! Gradle version ordering and constraint notation.
//!
//! Versions split into string parts with a parallel numeric view; numeric
//! parts win over strings, and a handful of special qualifiers (`dev`,
//! `rc`, `snapshot`, `final`, `ga`, `release`, `sp`) order around ordinary
//! strings. Constraints cover Maven-style brackets, ISO `]a,b[` notation,
//! dynamic `N.+` suffixes, strict `v!!` pins, and plain `+`.

pub mod constraint;
pub mod version;
