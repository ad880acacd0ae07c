//! Java version parsing and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use polyver_core::errors::{VersionError, VersionResult};
use polyver_core::version::Version;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JEP 322 shape: `$VNUM(-$PRE)?(\+($BUILD)?)?(-$OPT)?`, validated further
/// in code (a lone `+` needs either a build number or trailing options; an
/// option without `+` needs a pre-release).
static JEP_322: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<vnum>[0-9]+(?:\.[0-9]+)*)(?:-(?<pre>[a-zA-Z0-9]+))?(?:(?<plus>\+)(?<build>[0-9]+)?)?(?:-(?<opt>[-a-zA-Z0-9.]+))?$",
    )
    .expect("static pattern compiles")
});

/// Legacy `1.F[.I][_U][-rest]` shape.
static LEGACY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^1\.(?<feature>[0-9]+)(?:\.(?<interim>[0-9]+))?(?:_(?<update>[0-9]+))?(?:-(?<rest>.+))?$")
        .expect("static pattern compiles")
});

/// Legacy `F[.I]uU` shape (`8u17`, `5.2u10`).
static LEGACY_U: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<feature>[0-9]+)(?:\.(?<interim>[0-9]+))?u(?<update>[0-9]+)$")
        .expect("static pattern compiles")
});

/// The host's reported Java version, taken lazily from the `JAVA_VERSION`
/// environment variable; `None` when unset or unparsable.
static RUNTIME_VERSION: LazyLock<Option<JavaVersion>> = LazyLock::new(|| {
    std::env::var("JAVA_VERSION")
        .ok()
        .and_then(|text| JavaVersion::parse(&text).ok())
});

/// The host platform's reported Java version, if any.
pub fn runtime_version() -> Option<&'static JavaVersion> {
    RUNTIME_VERSION.as_ref()
}

/// Java 8 (1.8).
pub static JAVA_8: LazyLock<JavaVersion> =
    LazyLock::new(|| JavaVersion::parse("8").expect("static version parses"));

/// Java 11.
pub static JAVA_11: LazyLock<JavaVersion> =
    LazyLock::new(|| JavaVersion::parse("11").expect("static version parses"));

/// Java 17.
pub static JAVA_17: LazyLock<JavaVersion> =
    LazyLock::new(|| JavaVersion::parse("17").expect("static version parses"));

/// Java 21.
pub static JAVA_21: LazyLock<JavaVersion> =
    LazyLock::new(|| JavaVersion::parse("21").expect("static version parses"));

/// A parsed Java platform version in JEP 322 terms.
#[derive(Debug, Clone)]
pub struct JavaVersion {
    original: String,
    /// Version numbers with the trailing zeros trimmed; `[0]` is the
    /// feature release.
    components: Vec<u64>,
    pre: Option<String>,
    build: Option<u64>,
    optional: Option<String>,
}

impl JavaVersion {
    pub fn parse(text: &str) -> VersionResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(VersionError::parsing("empty Java version"));
        }
        let canonical = canonicalize_legacy(trimmed);
        let input = canonical.as_deref().unwrap_or(trimmed);
        let captures = JEP_322.captures(input).ok_or_else(|| {
            VersionError::parsing(format!("invalid Java version '{text}'"))
        })?;

        let plus = captures.name("plus").is_some();
        let pre = captures.name("pre").map(|m| m.as_str().to_string());
        let optional = captures.name("opt").map(|m| m.as_str().to_string());
        let build = match captures.name("build") {
            Some(m) => Some(m.as_str().parse::<u64>().map_err(|e| {
                VersionError::parsing_with(format!("build number of '{text}' is out of range"), e)
            })?),
            None => None,
        };
        if plus && build.is_none() && optional.is_none() {
            return Err(VersionError::parsing(format!(
                "'{text}' has a '+' without a build number"
            )));
        }
        if !plus && optional.is_some() && pre.is_none() {
            return Err(VersionError::parsing(format!(
                "'{text}' has trailing options without a pre-release or build"
            )));
        }

        let mut components = Vec::new();
        for number in captures["vnum"].split('.') {
            components.push(number.parse::<u64>().map_err(|e| {
                VersionError::parsing_with(
                    format!("version number '{number}' of '{text}' is out of range"),
                    e,
                )
            })?);
        }
        while components.len() > 1 && components.last() == Some(&0) {
            components.pop();
        }

        Ok(Self {
            original: text.to_string(),
            components,
            pre,
            build,
            optional,
        })
    }

    /// The feature release (`17` in `17.0.11`).
    pub fn feature(&self) -> u64 {
        self.components[0]
    }

    pub fn interim(&self) -> u64 {
        self.components.get(1).copied().unwrap_or(0)
    }

    pub fn update(&self) -> u64 {
        self.components.get(2).copied().unwrap_or(0)
    }

    pub fn patch(&self) -> u64 {
        self.components.get(3).copied().unwrap_or(0)
    }

    /// The version numbers, trailing zeros trimmed.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn pre(&self) -> Option<&str> {
        self.pre.as_deref()
    }

    pub fn build(&self) -> Option<u64> {
        self.build
    }

    pub fn optional(&self) -> Option<&str> {
        self.optional.as_deref()
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre.is_some()
    }

    /// Pre-release identifiers order numerically when both are numbers.
    fn pre_key(&self) -> Option<PreKey> {
        self.pre.as_deref().map(|pre| match pre.parse::<u64>() {
            Ok(n) => PreKey::Number(n),
            Err(_) => PreKey::Text(pre.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum PreKey {
    Number(u64),
    Text(String),
}

/// Rewrite the legacy shapes into JEP 322 form; `None` when the input is
/// not legacy. `1.F[.I][_U][-opt][-bB]` becomes `F[.I][.U][-opt][+B]` for
/// F >= 2; `1.0`/`1.1` era versions keep their leading `1`, which realizes
/// the feature-0-becomes-1 rule. `F[.I]uU` becomes `F.(I or 0).U`.
fn canonicalize_legacy(text: &str) -> Option<String> {
    if let Some(captures) = LEGACY_U.captures(text) {
        let feature = &captures["feature"];
        let interim = captures.name("interim").map_or("0", |m| m.as_str());
        let update = &captures["update"];
        return Some(format!("{feature}.{interim}.{update}"));
    }

    let captures = LEGACY.captures(text)?;
    let feature: u64 = captures["feature"].parse().ok()?;
    let interim = captures.name("interim").map(|m| m.as_str());
    let update = captures.name("update").map(|m| m.as_str());
    let rest = captures.name("rest").map(|m| m.as_str());
    if feature < 2 && update.is_none() && rest.is_none() {
        // `1.0`, `1.1`, `1.1.8`: already a valid JEP 322 string whose
        // feature number is 1.
        return None;
    }

    let mut canonical = if feature < 2 {
        format!("1.{feature}")
    } else {
        feature.to_string()
    };
    if let Some(interim) = interim {
        canonical.push('.');
        canonical.push_str(interim);
    }
    if let Some(update) = update {
        if interim.is_none() {
            canonical.push_str(".0");
        }
        canonical.push('.');
        canonical.push_str(update);
    }

    if let Some(rest) = rest {
        let (opt, build) = match rest.rsplit_once("-b") {
            Some((head, digits)) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                (Some(head), Some(digits.trim_start_matches('0')))
            }
            _ => match rest.strip_prefix('b') {
                Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                    (None, Some(digits.trim_start_matches('0')))
                }
                _ => (Some(rest), None),
            },
        };
        if let Some(opt) = opt {
            if !opt.is_empty() {
                canonical.push('-');
                canonical.push_str(opt);
            }
        }
        if let Some(build) = build {
            canonical.push('+');
            canonical.push_str(if build.is_empty() { "0" } else { build });
        }
    }
    Some(canonical)
}

impl Ord for JavaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let longest = self.components.len().max(other.components.len());
        for i in 0..longest {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            let ord = a.cmp(&b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        // A pre-release sorts below the release; a build sorts above the
        // bare version.
        let pre = match (self.pre_key(), other.pre_key()) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        };
        pre.then(self.build.cmp(&other.build))
            .then_with(|| self.optional.cmp(&other.optional))
    }
}

impl PartialOrd for JavaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for JavaVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JavaVersion {}

impl Hash for JavaVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (&self.components, self.pre_key(), self.build, &self.optional).hash(state);
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for JavaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Version for JavaVersion {
    fn original(&self) -> &str {
        &self.original
    }

    fn is_pre_release(&self) -> bool {
        JavaVersion::is_pre_release(self)
    }
}

impl Serialize for JavaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for JavaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
