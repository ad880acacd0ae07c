//! Maven version parsing, comparison, and range matching.
//!
//! Maven versions are free-form: tokens split on `.`, `-`, `_` and on
//! digit/letter boundaries, with a table of well-known qualifiers
//! (`alpha` < `beta` < `milestone` < `rc` < `snapshot` < `""` (release) <
//! `sp`), `min`/`max` sentinels in last position, and numeric components of
//! arbitrary size. Constraints are comma-separated bracket ranges.

pub mod constraint;
pub mod version;
