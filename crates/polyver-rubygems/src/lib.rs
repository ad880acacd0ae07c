//! RubyGems version ordering and requirement operators.
//!
//! Gem versions interleave numbers and letter groups; any letter group marks
//! a pre-release and sorts below numbers. Requirements use the operators
//! `=`, `!=`, `<`, `<=`, `>`, `>=` and the pessimistic `~>`, with
//! multi-argument requirements ANDed together.

pub mod constraint;
pub mod version;
