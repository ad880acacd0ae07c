//! Property tests for the range and constraint set algebra.
//!
//! Membership over a small integer version domain is the oracle: every set
//! operation must agree pointwise with boolean logic on `allows`, and every
//! produced constraint must uphold the sorted/disjoint/non-adjacent
//! invariant.

use std::fmt;

use polyver_core::constraint::VersionConstraint;
use polyver_core::range::VersionRange;
use polyver_core::version::Version;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Rev(u32);

impl fmt::Display for Rev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Version for Rev {
    fn original(&self) -> &str {
        "<test>"
    }

    fn is_pre_release(&self) -> bool {
        false
    }
}

const DOMAIN: u32 = 24;

fn arb_range() -> impl Strategy<Value = VersionRange<Rev>> {
    (0..DOMAIN, 0..DOMAIN, any::<bool>(), any::<bool>(), 0u8..4).prop_map(
        |(a, b, min_inc, max_inc, shape)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            match shape {
                0 => VersionRange::new(Some(Rev(lo)), Some(Rev(hi)), min_inc, max_inc),
                1 => VersionRange::new(None, Some(Rev(hi)), false, max_inc),
                2 => VersionRange::new(Some(Rev(lo)), None, min_inc, false),
                _ => VersionRange::any(),
            }
        },
    )
}

fn arb_constraint() -> impl Strategy<Value = VersionConstraint<Rev>> {
    proptest::collection::vec(arb_range(), 0..5).prop_map(VersionConstraint::new)
}

/// Sorted, pairwise disjoint, non-adjacent.
fn assert_normalized(c: &VersionConstraint<Rev>) {
    for pair in c.ranges().windows(2) {
        assert!(
            pair[0].strictly_lower(&pair[1]),
            "ranges out of order or overlapping: {} vs {}",
            pair[0],
            pair[1]
        );
        assert!(
            !pair[0].is_adjacent(&pair[1]),
            "adjacent ranges left unmerged: {} vs {}",
            pair[0],
            pair[1]
        );
    }
}

fn domain() -> impl Iterator<Item = Rev> {
    (0..DOMAIN).map(Rev)
}

proptest! {
    #[test]
    fn construction_normalizes(c in arb_constraint()) {
        assert_normalized(&c);
    }

    #[test]
    fn intersect_is_pointwise_and(c in arb_constraint(), d in arb_constraint()) {
        let i = c.intersect(&d);
        assert_normalized(&i);
        for v in domain() {
            prop_assert_eq!(i.allows(&v), c.allows(&v) && d.allows(&v));
        }
    }

    #[test]
    fn union_is_pointwise_or(c in arb_constraint(), d in arb_constraint()) {
        let u = c.union(&d);
        assert_normalized(&u);
        for v in domain() {
            prop_assert_eq!(u.allows(&v), c.allows(&v) || d.allows(&v));
        }
    }

    #[test]
    fn difference_is_pointwise_and_not(c in arb_constraint(), d in arb_constraint()) {
        let diff = c.difference(&d);
        assert_normalized(&diff);
        for v in domain() {
            prop_assert_eq!(diff.allows(&v), c.allows(&v) && !d.allows(&v));
        }
    }

    #[test]
    fn complement_is_pointwise_not(c in arb_constraint()) {
        let not_c = c.complement();
        assert_normalized(&not_c);
        for v in domain() {
            prop_assert_eq!(not_c.allows(&v), !c.allows(&v));
        }
    }

    #[test]
    fn commutativity(c in arb_constraint(), d in arb_constraint()) {
        prop_assert_eq!(c.intersect(&d), d.intersect(&c));
        prop_assert_eq!(c.union(&d), d.union(&c));
    }

    #[test]
    fn idempotence(c in arb_constraint()) {
        prop_assert_eq!(c.intersect(&c), c.clone());
        prop_assert_eq!(c.union(&c), c.clone());
    }

    #[test]
    fn self_difference_is_empty(c in arb_constraint()) {
        prop_assert!(c.difference(&c).is_empty());
    }

    #[test]
    fn identities(c in arb_constraint()) {
        prop_assert_eq!(VersionConstraint::empty().union(&c), c.clone());
        prop_assert_eq!(VersionConstraint::any().intersect(&c), c.clone());
        prop_assert!(VersionConstraint::empty().intersect(&c).is_empty());
        prop_assert!(VersionConstraint::any().union(&c).is_any());
    }

    #[test]
    fn double_complement_roundtrips(c in arb_constraint()) {
        prop_assert_eq!(c.complement().complement(), c);
    }

    #[test]
    fn containment_matches_union(c in arb_constraint(), d in arb_constraint()) {
        if c.allows_all(&d) {
            prop_assert_eq!(c.union(&d), c.clone());
            for v in domain() {
                prop_assert!(!d.allows(&v) || c.allows(&v));
            }
        }
    }

    #[test]
    fn overlap_matches_intersection(c in arb_constraint(), d in arb_constraint()) {
        prop_assert_eq!(c.allows_any(&d), !c.intersect(&d).is_empty());
    }

    #[test]
    fn range_difference_never_splits_thrice(a in arb_range(), b in arb_range()) {
        prop_assert!(a.difference(&b).len() <= 2);
    }
}
