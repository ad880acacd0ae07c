//! Calendar versioning (CalVer).
//!
//! A [`format::CalendarScheme`] compiles a format string such as
//! `"YYYY.0M.0D-MAJOR"` into a parser for versions of that shape. Parsed
//! versions compare by calendar fields regardless of the format they came
//! from, so `YYYY`-2020 equals `YY`-20; a trailing `-modifier` is always
//! optional and follows SemVer pre-release ordering.

pub mod format;
pub mod version;
