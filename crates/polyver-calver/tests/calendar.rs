//! Calendar scheme behavior across formats.

use polyver_calver::format::{CalendarScheme, ComponentCategory};
use polyver_core::version::Version;

#[test]
fn ubuntu_style_versions() {
    let scheme = CalendarScheme::new("YY.0M").unwrap();
    let lts = scheme.parse("24.04").unwrap();
    assert_eq!(lts.year(), Some(2024));
    assert_eq!(lts.month(), Some(4));
    let interim = scheme.parse("24.10").unwrap();
    assert!(lts < interim);
}

#[test]
fn week_based_scheme() {
    let scheme = CalendarScheme::new("YYYY.WW").unwrap();
    let version = scheme.parse("2023.37").unwrap();
    assert_eq!(version.week(), Some(37));
    assert_eq!(
        version.components(),
        &[(ComponentCategory::Year, 2023), (ComponentCategory::Week, 37)]
    );
}

#[test]
fn cross_format_comparison_and_hashing() {
    use std::collections::HashSet;

    let long = CalendarScheme::new("YYYY.0M").unwrap().parse("2020.04").unwrap();
    let short = CalendarScheme::new("YY.MM").unwrap().parse("20.4").unwrap();
    assert_eq!(long, short);

    let mut set = HashSet::new();
    set.insert(long);
    assert!(set.contains(&short));
}

#[test]
fn modifier_orders_within_a_day() {
    let scheme = CalendarScheme::new("YYYY.0M.0D").unwrap();
    let nightly = scheme.parse("2023.06.15-dev.2").unwrap();
    let rc = scheme.parse("2023.06.15-rc.1").unwrap();
    let release = scheme.parse("2023.06.15").unwrap();
    assert!(nightly < rc);
    assert!(rc < release);
    assert!(nightly.is_pre_release());
    assert!(rc.is_pre_release());
    assert!(!release.is_pre_release());
}

#[test]
fn major_minor_patch_tail() {
    let scheme = CalendarScheme::new("YYYY.MM-MAJOR.MINOR.PATCH").unwrap();
    let version = scheme.parse("2023.4-1.2.3").unwrap();
    assert_eq!(version.major(), Some(1));
    assert_eq!(version.minor(), Some(2));
    assert_eq!(version.patch(), Some(3));
    let newer = scheme.parse("2023.4-1.2.4").unwrap();
    assert!(version < newer);
}

#[test]
fn original_text_is_preserved() {
    let scheme = CalendarScheme::new("YYYY.0M.0D").unwrap();
    let version = scheme.parse("2023.06.15-beta").unwrap();
    assert_eq!(version.original(), "2023.06.15-beta");
    assert_eq!(version.to_string(), "2023.06.15-beta");
}

#[test]
fn scheme_reuse_is_pure() {
    let scheme = CalendarScheme::new("YYYY.MM").unwrap();
    let first = scheme.parse("2023.1").unwrap();
    let second = scheme.parse("2023.2").unwrap();
    assert!(first < second);
    assert_eq!(scheme.format(), "YYYY.MM");
}
