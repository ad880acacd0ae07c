//! Gem requirement scenarios against the set algebra.

use polyver_core::version::Version;
use polyver_rubygems::constraint::parse_constraint;
use polyver_rubygems::version::GemVersion;

fn v(text: &str) -> GemVersion {
    GemVersion::parse(text).unwrap()
}

#[test]
fn rails_style_pessimistic_pair() {
    // The common gemspec idiom: stay on a minor line but above a patch.
    let c = parse_constraint(&["~> 7.0", ">= 7.0.4"]).unwrap();
    assert!(!c.allows(&v("7.0.3")));
    assert!(c.allows(&v("7.0.4")));
    assert!(c.allows(&v("7.1")));
    assert!(!c.allows(&v("8.0")));
}

#[test]
fn pessimistic_excludes_next_line_pre_releases() {
    let c = parse_constraint(&["~> 2.2"]).unwrap();
    assert!(c.allows(&v("2.2")));
    assert!(c.allows(&v("2.9.9")));
    assert!(!c.allows(&v("3.0.0.alpha")));
    assert!(!c.allows(&v("3.0.0.rc1")));
    assert!(!c.allows(&v("3.0")));
}

#[test]
fn not_equal_combines_with_bounds() {
    let c = parse_constraint(&[">= 1.0", "< 2.0", "!= 1.3"]).unwrap();
    assert_eq!(c.to_string(), "[1.0,1.3),(1.3,2.0)");
    assert!(c.allows(&v("1.2.9")));
    assert!(!c.allows(&v("1.3")));
    assert!(!c.allows(&v("1.3.0")));
    assert!(c.allows(&v("1.4")));
}

#[test]
fn exact_requirement_intersects_to_itself_or_nothing() {
    let pin = parse_constraint(&["= 1.5"]).unwrap();
    let inside = parse_constraint(&[">= 1.0", "< 2.0"]).unwrap();
    let outside = parse_constraint(&[">= 2.0"]).unwrap();
    assert_eq!(inside.intersect(&pin), pin);
    assert!(outside.intersect(&pin).is_empty());
}

#[test]
fn pre_releases_sit_below_their_release() {
    let c = parse_constraint(&[">= 1.0"]).unwrap();
    assert!(!c.allows(&v("1.0.rc1")));
    assert!(c.allows(&v("1.0")));
    assert!(c.allows(&v("1.0.1.rc1")));
}

#[test]
fn contradictory_requirements_yield_empty() {
    let c = parse_constraint(&["< 1.0", "> 2.0"]).unwrap();
    assert!(c.is_empty());
    assert_eq!(c.to_string(), "<empty>");
}

#[test]
fn requirement_strings_round_trip_versions() {
    for text in ["1.0", "1.0-rc1", "13.0.1", "1.0.0.beta.2"] {
        assert_eq!(v(text).original(), text);
        assert_eq!(GemVersion::parse(&v(text).to_string()).unwrap(), v(text));
    }
}
