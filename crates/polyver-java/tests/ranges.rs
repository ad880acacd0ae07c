//! Java version ranges across the legacy and JEP 322 eras.

use polyver_core::version::Version;
use polyver_java::constraint::parse_constraint;
use polyver_java::version::{JavaVersion, JAVA_11, JAVA_17, JAVA_8};

fn v(text: &str) -> JavaVersion {
    JavaVersion::parse(text).unwrap()
}

#[test]
fn lts_window() {
    let window = parse_constraint("[11,21]").unwrap();
    assert!(window.allows(&JAVA_11));
    assert!(window.allows(&JAVA_17));
    assert!(!window.allows(&JAVA_8));
    assert!(window.allows(&v("21")));
    assert!(!window.allows(&v("21.0.1")));
}

#[test]
fn legacy_updates_fall_inside_their_feature_line() {
    let eights = parse_constraint("1.8").unwrap();
    assert_eq!(eights.to_string(), "[1.8,9)");
    assert!(eights.allows(&v("8u17")));
    assert!(eights.allows(&v("1.8.0_292")));
    assert!(!eights.allows(&v("9")));
    assert!(!eights.allows(&v("1.7")));
}

#[test]
fn ea_builds_sort_below_the_release_window() {
    let window = parse_constraint("[17,18)").unwrap();
    assert!(!window.allows(&v("17-ea")));
    assert!(window.allows(&v("17+35")));
    assert!(window.allows(&v("17.0.9-beta+7")));
}

#[test]
fn range_algebra_over_feature_lines() {
    let lts_only = parse_constraint("[17,18)")
        .unwrap()
        .union(&parse_constraint("[21,22)").unwrap());
    assert_eq!(lts_only.to_string(), "[17,18),[21,22)");
    assert!(lts_only.allows(&v("17.0.11")));
    assert!(!lts_only.allows(&v("19.0.1")));
    assert!(lts_only.allows(&v("21.0.2")));

    let modern = parse_constraint("[18,)").unwrap();
    assert_eq!(lts_only.intersect(&modern).to_string(), "[21,22)");
}

#[test]
fn mixed_era_sort() {
    let mut versions = vec![v("11"), v("1.4.2_151"), v("8u17"), v("1.1"), v("17.0.11")];
    versions.sort();
    let texts: Vec<&str> = versions.iter().map(|v| v.original()).collect();
    assert_eq!(texts, vec!["1.1", "1.4.2_151", "8u17", "11", "17.0.11"]);
}

#[test]
fn equal_versions_hash_equal() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(v("17.0.0"));
    assert!(set.contains(&v("17")));
    set.insert(v("1.8"));
    assert!(set.contains(&v("8")));
}
