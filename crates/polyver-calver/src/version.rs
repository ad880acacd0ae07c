//! Calendar version values and their ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use polyver_core::version::Version;

use crate::format::ComponentCategory;

/// Modifier pre-releases recognized case-insensitively as prefixes.
const PRE_RELEASE_PREFIXES: [&str; 7] =
    ["alpha", "beta", "cr", "dev", "milestone", "rc", "snapshot"];

/// A version parsed by a [`crate::format::CalendarScheme`].
///
/// Equality, ordering and hashing work from the parsed calendar fields, not
/// the original text, so the same date parsed under `YYYY` and `YY` formats
/// compares equal.
#[derive(Debug, Clone)]
pub struct CalendarVersion {
    pub(crate) original: String,
    pub(crate) year: Option<u64>,
    pub(crate) week: Option<u64>,
    pub(crate) month: Option<u64>,
    pub(crate) day: Option<u64>,
    pub(crate) major: Option<u64>,
    pub(crate) minor: Option<u64>,
    pub(crate) patch: Option<u64>,
    pub(crate) modifier: Option<String>,
    pub(crate) modifier_tokens: Option<Vec<ModifierToken>>,
    pub(crate) components: Vec<(ComponentCategory, u64)>,
}

/// One dotted token of a modifier, ordered the SemVer pre-release way:
/// numbers below text, numbers numerically, text in ASCII order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum ModifierToken {
    Number(u64),
    Text(String),
}

impl ModifierToken {
    pub(crate) fn split(modifier: &str) -> Vec<Self> {
        modifier
            .split('.')
            .map(|token| match token.parse::<u64>() {
                Ok(n) => Self::Number(n),
                Err(_) => Self::Text(token.to_string()),
            })
            .collect()
    }
}

impl CalendarVersion {
    pub fn year(&self) -> Option<u64> {
        self.year
    }

    pub fn week(&self) -> Option<u64> {
        self.week
    }

    pub fn month(&self) -> Option<u64> {
        self.month
    }

    pub fn day(&self) -> Option<u64> {
        self.day
    }

    pub fn major(&self) -> Option<u64> {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// The trailing modifier text, if any.
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    /// The parsed components in format order, without the modifier.
    pub fn components(&self) -> &[(ComponentCategory, u64)] {
        &self.components
    }

    /// True when the modifier starts with one of the pre-release markers.
    pub fn is_pre_release(&self) -> bool {
        self.modifier.as_deref().is_some_and(|modifier| {
            let lower = modifier.to_ascii_lowercase();
            PRE_RELEASE_PREFIXES
                .iter()
                .any(|prefix| lower.starts_with(prefix))
        })
    }
}

impl Ord for CalendarVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // An absent calendar field sorts below a present one; a present
        // modifier sorts below an absent one, matching SemVer pre-releases.
        self.year
            .cmp(&other.year)
            .then(self.week.cmp(&other.week))
            .then(self.month.cmp(&other.month))
            .then(self.day.cmp(&other.day))
            .then(self.major.cmp(&other.major))
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.modifier_tokens, &other.modifier_tokens) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for CalendarVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CalendarVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CalendarVersion {}

impl Hash for CalendarVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (
            self.year,
            self.week,
            self.month,
            self.day,
            self.major,
            self.minor,
            self.patch,
            &self.modifier_tokens,
        )
            .hash(state);
    }
}

impl fmt::Display for CalendarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Version for CalendarVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        CalendarVersion::is_pre_release(self)
    }
}
