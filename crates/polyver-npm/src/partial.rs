//! Partial version literals: `1`, `1.2`, `1.2.x`, `*`, `1.2.3-beta.1`.

use polyver_core::errors::{VersionError, VersionResult};
use polyver_semver::version::SemanticVersion;

/// A version literal with possibly missing or wildcarded components.
///
/// A missing component and an explicit `x`/`X`/`*` wildcard mean the same
/// thing; everything after the first wildcard is ignored.
#[derive(Debug, Clone)]
pub(crate) struct Partial {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Option<String>,
}

impl Partial {
    pub fn parse(token: &str) -> VersionResult<Self> {
        let text = token
            .strip_prefix('v')
            .or_else(|| token.strip_prefix('V'))
            .unwrap_or(token);
        if text.is_empty() || text == "*" {
            return Ok(Self {
                major: None,
                minor: None,
                patch: None,
                pre: None,
            });
        }
        // Build metadata never affects range semantics.
        let text = text.split_once('+').map_or(text, |(head, _)| head);
        let (core, pre) = match text.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (text, None),
        };

        let mut numbers = [None, None, None];
        let mut wildcarded = false;
        for (i, piece) in core.split('.').enumerate() {
            if i >= 3 {
                return Err(VersionError::parsing(format!(
                    "version '{token}' has more than three components"
                )));
            }
            if wildcarded {
                continue;
            }
            if piece.is_empty() {
                return Err(VersionError::parsing(format!(
                    "version '{token}' has an empty component"
                )));
            }
            if matches!(piece, "x" | "X" | "*") {
                wildcarded = true;
                continue;
            }
            let number = piece.parse::<u64>().map_err(|e| {
                VersionError::parsing_with(format!("invalid component '{piece}' in '{token}'"), e)
            })?;
            numbers[i] = Some(number);
        }
        let [major, minor, patch] = numbers;

        if pre.is_some() && patch.is_none() {
            return Err(VersionError::parsing(format!(
                "pre-release in '{token}' requires a full major.minor.patch version"
            )));
        }
        if pre.is_some_and(str::is_empty) {
            return Err(VersionError::parsing(format!(
                "empty pre-release in '{token}'"
            )));
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre: pre.map(str::to_string),
        })
    }

    /// All three numeric components given.
    pub fn is_full(&self) -> bool {
        self.patch.is_some()
    }

    /// The smallest version this literal stands for: missing components
    /// filled with zero, the pre-release kept.
    pub fn floor(&self) -> VersionResult<SemanticVersion> {
        let major = self.major.unwrap_or(0);
        let minor = self.minor.unwrap_or(0);
        let patch = self.patch.unwrap_or(0);
        match &self.pre {
            Some(pre) => {
                SemanticVersion::with_pre_release(&format!("{major}.{minor}.{patch}"), pre)
            }
            None => Ok(SemanticVersion::new(major, minor, patch)),
        }
    }

    /// The exclusive upper bound of the X-range this literal spans, with the
    /// `-0` tail that shuts out pre-releases of the bound itself. `None` when
    /// the literal is unbounded above (`*`).
    pub fn xrange_upper(&self) -> VersionResult<Option<SemanticVersion>> {
        let upper = match (self.major, self.minor) {
            (None, _) => return Ok(None),
            (Some(major), None) => format!("{}.0.0-0", major + 1),
            (Some(major), Some(minor)) => format!("{major}.{}.0-0", minor + 1),
        };
        SemanticVersion::parse(&upper).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wildcards() {
        let p = Partial::parse("1.2.x").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), None));
        let p = Partial::parse("*").unwrap();
        assert!(p.major.is_none());
        let p = Partial::parse("1.x.3").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));
    }

    #[test]
    fn keeps_pre_release_on_full_versions() {
        let p = Partial::parse("1.2.3-beta.1").unwrap();
        assert_eq!(p.pre.as_deref(), Some("beta.1"));
        assert!(Partial::parse("1.2-beta").is_err());
    }

    #[test]
    fn floor_fills_zeros() {
        assert_eq!(Partial::parse("1.2").unwrap().floor().unwrap().to_string(), "1.2.0");
        assert_eq!(Partial::parse("").unwrap().floor().unwrap().to_string(), "0.0.0");
    }

    #[test]
    fn xrange_upper_bumps_first_open_slot() {
        let upper = Partial::parse("1.2.x").unwrap().xrange_upper().unwrap().unwrap();
        assert_eq!(upper.to_string(), "1.3.0-0");
        let upper = Partial::parse("1").unwrap().xrange_upper().unwrap().unwrap();
        assert_eq!(upper.to_string(), "2.0.0-0");
        assert!(Partial::parse("*").unwrap().xrange_upper().unwrap().is_none());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Partial::parse("1..3").is_err());
        assert!(Partial::parse("1.2.3.4").is_err());
        assert!(Partial::parse("one").is_err());
    }
}
