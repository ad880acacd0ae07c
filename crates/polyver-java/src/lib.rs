//! Java platform versions.
//!
//! Accepts JEP 322 version strings (`11`, `17.0.11`,
//! `17.0.11-alpha+14-cthing`) as well as the legacy forms used through
//! Java 8 (`1.4.2_151-b034`, `8u17`), which canonicalize to the JEP 322
//! shape before parsing. Constraints are bracket ranges; a bare version
//! spans up to the next feature release.

pub mod constraint;
pub mod version;
