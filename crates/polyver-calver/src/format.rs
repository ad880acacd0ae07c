//! Format-string compilation for calendar schemes.

use std::fmt;

use polyver_core::errors::{VersionError, VersionResult};
use regex::Regex;

use crate::version::{CalendarVersion, ModifierToken};

/// What a format identifier stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Year,
    Month,
    Week,
    Day,
    Major,
    Minor,
    Patch,
    Modifier,
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Week => "WEEK",
            Self::Day => "DAY",
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
            Self::Patch => "PATCH",
            Self::Modifier => "MODIFIER",
        })
    }
}

impl ComponentCategory {
    fn validate(self, value: u64, text: &str) -> VersionResult<()> {
        let valid = match self {
            Self::Year => value >= 1900,
            Self::Month => (1..=12).contains(&value),
            Self::Day => (1..=31).contains(&value),
            Self::Week => (1..=52).contains(&value),
            Self::Major | Self::Minor | Self::Patch | Self::Modifier => true,
        };
        if valid {
            Ok(())
        } else {
            Err(VersionError::parsing(format!(
                "{self} value {value} in '{text}' is out of range"
            )))
        }
    }
}

/// One identifier of a calendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identifier {
    FullYear,
    ShortYear,
    PaddedYear,
    Month,
    PaddedMonth,
    Week,
    PaddedWeek,
    Day,
    PaddedDay,
    Major,
    Minor,
    Patch,
}

impl Identifier {
    /// Longest case-insensitive match at the start of `rest`, with its
    /// length in the format string.
    fn recognize(rest: &str) -> Option<(Self, usize)> {
        const TABLE: [(&str, Identifier); 12] = [
            ("MAJOR", Identifier::Major),
            ("MINOR", Identifier::Minor),
            ("PATCH", Identifier::Patch),
            ("YYYY", Identifier::FullYear),
            ("YY", Identifier::ShortYear),
            ("0Y", Identifier::PaddedYear),
            ("MM", Identifier::Month),
            ("0M", Identifier::PaddedMonth),
            ("WW", Identifier::Week),
            ("0W", Identifier::PaddedWeek),
            ("DD", Identifier::Day),
            ("0D", Identifier::PaddedDay),
        ];
        for (literal, identifier) in TABLE {
            if rest.len() >= literal.len()
                && rest[..literal.len()].eq_ignore_ascii_case(literal)
            {
                return Some((identifier, literal.len()));
            }
        }
        None
    }

    /// The regex fragment this identifier matches.
    fn fragment(self) -> &'static str {
        match self {
            Self::FullYear => r"[0-9]{4}",
            Self::ShortYear => r"[0-9]{1,2}",
            Self::PaddedYear => r"[0-9]{2}",
            Self::Month | Self::Week | Self::Day => r"[0-9]{1,2}",
            Self::PaddedMonth | Self::PaddedWeek | Self::PaddedDay => r"[0-9]{2}",
            Self::Major | Self::Minor | Self::Patch => r"[0-9]+",
        }
    }

    fn category(self) -> ComponentCategory {
        match self {
            Self::FullYear | Self::ShortYear | Self::PaddedYear => ComponentCategory::Year,
            Self::Month | Self::PaddedMonth => ComponentCategory::Month,
            Self::Week | Self::PaddedWeek => ComponentCategory::Week,
            Self::Day | Self::PaddedDay => ComponentCategory::Day,
            Self::Major => ComponentCategory::Major,
            Self::Minor => ComponentCategory::Minor,
            Self::Patch => ComponentCategory::Patch,
        }
    }

    /// Short year forms count from 2000.
    fn adjust(self, value: u64) -> u64 {
        match self {
            Self::ShortYear | Self::PaddedYear => 2000 + value,
            _ => value,
        }
    }
}

/// A compiled calendar format.
///
/// Compilation is a pure function of the format string; callers wanting
/// amortization cache the scheme themselves.
#[derive(Debug, Clone)]
pub struct CalendarScheme {
    format: String,
    identifiers: Vec<Identifier>,
    pattern: Regex,
}

impl CalendarScheme {
    /// Compile a format of identifiers (`YYYY`, `YY`, `0Y`, `MM`, `0M`,
    /// `WW`, `0W`, `DD`, `0D`, `MAJOR`, `MINOR`, `PATCH`, case-insensitive)
    /// joined by `.`, `-` or `_` separators. A trailing `-modifier` on
    /// parsed versions is always optional.
    pub fn new(format: &str) -> VersionResult<Self> {
        if format.is_empty() {
            return Err(VersionError::parsing("empty calendar format"));
        }
        let mut identifiers = Vec::new();
        let mut pattern = String::from("^");
        let mut rest = format;
        while !rest.is_empty() {
            if let Some((identifier, len)) = Identifier::recognize(rest) {
                if identifiers
                    .iter()
                    .any(|seen: &Identifier| seen.category() == identifier.category())
                {
                    return Err(VersionError::parsing(format!(
                        "calendar format '{format}' repeats the {} component",
                        identifier.category()
                    )));
                }
                identifiers.push(identifier);
                pattern.push('(');
                pattern.push_str(identifier.fragment());
                pattern.push(')');
                rest = &rest[len..];
            } else if let Some(stripped) = rest.strip_prefix(['.', '-', '_']) {
                let separator = rest.as_bytes()[0] as char;
                if separator == '.' {
                    pattern.push('\\');
                }
                pattern.push(separator);
                rest = stripped;
            } else {
                return Err(VersionError::parsing(format!(
                    "unrecognized token at '{rest}' in calendar format '{format}'"
                )));
            }
        }
        if identifiers.is_empty() {
            return Err(VersionError::parsing(format!(
                "calendar format '{format}' has no identifiers"
            )));
        }
        pattern.push_str("(?:-(.+))?$");
        let pattern = Regex::new(&pattern).map_err(|e| {
            VersionError::parsing_with(format!("calendar format '{format}' failed to compile"), e)
        })?;
        Ok(Self {
            format: format.to_string(),
            identifiers,
            pattern,
        })
    }

    /// The format string this scheme was compiled from.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Parse a version of this scheme's shape.
    pub fn parse(&self, text: &str) -> VersionResult<CalendarVersion> {
        let captures = self.pattern.captures(text).ok_or_else(|| {
            VersionError::parsing(format!(
                "'{text}' does not match calendar format '{}'",
                self.format
            ))
        })?;

        let mut components = Vec::new();
        let mut fields = [None; 7];
        for (i, identifier) in self.identifiers.iter().enumerate() {
            let raw = captures.get(i + 1).expect("identifier group").as_str();
            let value: u64 = raw.parse().map_err(|e| {
                VersionError::parsing_with(format!("invalid number '{raw}' in '{text}'"), e)
            })?;
            let value = identifier.adjust(value);
            let category = identifier.category();
            category.validate(value, text)?;
            fields[field_slot(category)] = Some(value);
            components.push((category, value));
        }
        let modifier = captures
            .get(self.identifiers.len() + 1)
            .map(|m| m.as_str().to_string());
        let modifier_tokens = modifier.as_deref().map(ModifierToken::split);

        let [year, week, month, day, major, minor, patch] = fields;
        Ok(CalendarVersion {
            original: text.to_string(),
            year,
            week,
            month,
            day,
            major,
            minor,
            patch,
            modifier,
            modifier_tokens,
            components,
        })
    }
}

fn field_slot(category: ComponentCategory) -> usize {
    match category {
        ComponentCategory::Year => 0,
        ComponentCategory::Week => 1,
        ComponentCategory::Month => 2,
        ComponentCategory::Day => 3,
        ComponentCategory::Major => 4,
        ComponentCategory::Minor => 5,
        ComponentCategory::Patch => 6,
        ComponentCategory::Modifier => unreachable!("modifier is not a format identifier"),
    }
}
