//! Maven version tokenization and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed Maven version with comparable components.
///
/// Padding-equivalent tails (`.0`, `-ga`, `.release`) are trimmed at parse
/// time, so `1.0` and `1.0.0-ga` hold the same components and compare equal.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    original: String,
    components: Vec<Component>,
}

/// One comparable token of a Maven version.
///
/// Kind order for mixed comparisons: `Min` < qualifiers < plain strings <
/// numbers < `Max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Component {
    Min,
    Qualifier(Qualifier),
    /// Unrecognized token, lowercased for the case-insensitive order.
    Text(String),
    Integer(u64),
    /// Digit run beyond the 64-bit range: leading zeros stripped, compared
    /// by length then lexicographically.
    Big(String),
    Max,
}

/// Well-known qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(text: &str) -> VersionResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(VersionError::parsing("empty Maven version"));
        }
        let raw = tokenize(trimmed);
        let last = raw.len() - 1;
        let mut components: Vec<Component> = raw
            .iter()
            .enumerate()
            .map(|(i, token)| classify(token, i == last))
            .collect();
        trim_padding(&mut components);
        Ok(Self {
            original: text.to_string(),
            components,
        })
    }

    /// True when a qualifier ranks below `release` and no `sp` component
    /// overrides it.
    pub fn is_pre_release(&self) -> bool {
        let mut pre = false;
        for component in &self.components {
            match component {
                Component::Qualifier(Qualifier::Sp) => return false,
                Component::Qualifier(q) if *q < Qualifier::Release => pre = true,
                _ => {}
            }
        }
        pre
    }
}

/// Split on `.`/`-`/`_`, on digit/letter boundaries, and on `+` outside a
/// `++` run (where one `+` stays literal). Empty tokens read as `0`.
fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut after_plus = false;
    for ch in text.chars() {
        match ch {
            '.' | '-' | '_' => {
                // Consecutive delimiters leave an empty token, read as 0.
                flush(&mut tokens, &mut current, false, true);
                after_plus = false;
            }
            '+' => {
                if after_plus {
                    current.push('+');
                    after_plus = false;
                } else {
                    flush(&mut tokens, &mut current, false, false);
                    after_plus = true;
                }
            }
            _ => {
                after_plus = false;
                let boundary = current
                    .chars()
                    .next_back()
                    .is_some_and(|last| last.is_ascii_digit() != ch.is_ascii_digit());
                if boundary {
                    flush(&mut tokens, &mut current, ch.is_ascii_digit(), false);
                }
                current.push(ch);
            }
        }
    }
    flush(&mut tokens, &mut current, false, false);
    if tokens.is_empty() {
        tokens.push(RawToken {
            text: String::new(),
            digit_follows: false,
        });
    }
    tokens
}

struct RawToken {
    text: String,
    /// The token was cut by a transition straight into a digit; this is what
    /// turns `a`/`b`/`m` into their qualifier aliases (`1.0a1`).
    digit_follows: bool,
}

fn flush(tokens: &mut Vec<RawToken>, current: &mut String, digit_follows: bool, keep_empty: bool) {
    if current.is_empty() && !keep_empty {
        return;
    }
    tokens.push(RawToken {
        text: std::mem::take(current),
        digit_follows,
    });
}

fn classify(raw: &RawToken, is_last: bool) -> Component {
    let text = &raw.text;
    if text.bytes().all(|b| b.is_ascii_digit()) {
        let digits = text.trim_start_matches('0');
        if digits.is_empty() {
            return Component::Integer(0);
        }
        return match digits.parse::<u64>() {
            Ok(n) => Component::Integer(n),
            Err(_) => Component::Big(digits.to_string()),
        };
    }
    let lower = text.to_lowercase();
    match lower.as_str() {
        "min" if is_last => Component::Min,
        "max" if is_last => Component::Max,
        "alpha" => Component::Qualifier(Qualifier::Alpha),
        "a" if raw.digit_follows => Component::Qualifier(Qualifier::Alpha),
        "beta" => Component::Qualifier(Qualifier::Beta),
        "b" if raw.digit_follows => Component::Qualifier(Qualifier::Beta),
        "milestone" => Component::Qualifier(Qualifier::Milestone),
        "m" if raw.digit_follows => Component::Qualifier(Qualifier::Milestone),
        "rc" | "cr" => Component::Qualifier(Qualifier::Rc),
        "snapshot" => Component::Qualifier(Qualifier::Snapshot),
        "ga" | "final" | "release" => Component::Qualifier(Qualifier::Release),
        "sp" => Component::Qualifier(Qualifier::Sp),
        _ => Component::Text(lower),
    }
}

/// Drop trailing components that compare equal to their padding (`0` for
/// numbers, `release` for qualifiers).
fn trim_padding(components: &mut Vec<Component>) {
    while components.len() > 1 {
        match components.last() {
            Some(Component::Integer(0)) | Some(Component::Qualifier(Qualifier::Release)) => {
                components.pop();
            }
            _ => break,
        }
    }
}

fn kind_rank(component: &Component) -> u8 {
    match component {
        Component::Min => 0,
        Component::Qualifier(_) => 1,
        Component::Text(_) => 2,
        Component::Integer(_) | Component::Big(_) => 3,
        Component::Max => 4,
    }
}

fn compare_components(a: &Component, b: &Component) -> Ordering {
    use Component::*;
    match (a, b) {
        (Integer(x), Integer(y)) => x.cmp(y),
        (Big(x), Big(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Integer(_), Big(_)) => Ordering::Less,
        (Big(_), Integer(_)) => Ordering::Greater,
        (Qualifier(x), Qualifier(y)) => x.cmp(y),
        (Text(x), Text(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// How a component compares against the padding a shorter version is
/// extended with: `0` at numeric positions, `release` at qualifier
/// positions, with plain strings sitting above the qualifier kind.
fn compare_to_padding(component: &Component) -> Ordering {
    match component {
        Component::Integer(n) => n.cmp(&0),
        Component::Big(_) => Ordering::Greater,
        Component::Qualifier(q) => q.cmp(&Qualifier::Release),
        Component::Text(_) => Ordering::Greater,
        Component::Min => Ordering::Less,
        Component::Max => Ordering::Greater,
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let longest = self.components.len().max(other.components.len());
        for i in 0..longest {
            let ord = match (self.components.get(i), other.components.get(i)) {
                (Some(a), Some(b)) => compare_components(a, b),
                (Some(a), None) => compare_to_padding(a),
                (None, Some(b)) => compare_to_padding(b).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for MavenVersion {}

impl std::hash::Hash for MavenVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for MavenVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Version for MavenVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        MavenVersion::is_pre_release(self)
    }
}

impl Serialize for MavenVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for MavenVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
