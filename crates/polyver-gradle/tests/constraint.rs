//! Gradle constraint notation against the set algebra.

use polyver_core::version::Version;
use polyver_gradle::constraint::parse_constraint;
use polyver_gradle::version::GradleVersion;

fn v(text: &str) -> GradleVersion {
    GradleVersion::parse(text).unwrap()
}

#[test]
fn dynamic_and_bracket_ranges_compose() {
    let dynamic = parse_constraint("1.2.+").unwrap();
    let window = parse_constraint("[1.2.3,2.0)").unwrap();
    let both = dynamic.intersect(&window);
    assert_eq!(both.to_string(), "[1.2.3,1.3)");
    assert!(both.allows(&v("1.2.5")));
    assert!(!both.allows(&v("1.2.2")));
    assert!(!both.allows(&v("1.3")));
}

#[test]
fn strict_pin_against_a_window() {
    let pin = parse_constraint("1.5!!").unwrap();
    let window = parse_constraint("[1.0,2.0)").unwrap();
    assert!(window.allows_all(&pin));
    assert_eq!(window.intersect(&pin), pin);
    assert!(window.difference(&pin).allows(&v("1.4")));
    assert!(!window.difference(&pin).allows(&v("1.5")));
}

#[test]
fn dynamic_unions_cover_adjacent_minors() {
    let one_two = parse_constraint("1.2.+").unwrap();
    let one_three = parse_constraint("1.3.+").unwrap();
    let merged = one_two.union(&one_three);
    // [1.2.0,1.3) and [1.3.0,1.4) stay apart: 1.3 itself sits between them.
    assert_eq!(merged.to_string(), "[1.2.0,1.3),[1.3.0,1.4)");
    assert!(merged.allows(&v("1.2.9")));
    assert!(!merged.allows(&v("1.3")));
    assert!(merged.allows(&v("1.3.0")));
}

#[test]
fn iso_and_maven_notation_agree() {
    let iso = parse_constraint("]1.0,2.0[").unwrap();
    let maven = parse_constraint("(1.0,2.0)").unwrap();
    assert_eq!(iso, maven);
}

#[test]
fn anything_absorbs_every_range() {
    let any = parse_constraint("+").unwrap();
    let window = parse_constraint("[1.0,2.0)").unwrap();
    assert!(any.allows_all(&window));
    assert_eq!(any.union(&window), any);
    assert_eq!(any.intersect(&window), window);
    assert!(any.complement().is_empty());
}

#[test]
fn pre_release_ordering_interacts_with_bounds() {
    // rc < snapshot < final-style releases inside a bracket window.
    let window = parse_constraint("[1.0-rc,1.0-release]").unwrap();
    assert!(window.allows(&v("1.0-rc")));
    assert!(window.allows(&v("1.0-snapshot")));
    assert!(window.allows(&v("1.0-release")));
    assert!(!window.allows(&v("1.0-sp")));
    assert!(!window.allows(&v("1.0-dev")));
}

#[test]
fn original_text_survives_parsing() {
    for text in ["1.0-rc-1", "1.0.GA", "2024.1_3"] {
        assert_eq!(v(text).original(), text);
    }
}
