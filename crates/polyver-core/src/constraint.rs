//! A constraint: the disjoint, sorted union of version ranges.
//!
//! Every constructor and operation maintains one invariant: the range list is
//! sorted by the range order (lower bound first) and contains no overlapping
//! or adjacent elements. All set algebra over parsed constraints happens
//! here, scheme-agnostically.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::range::VersionRange;
use crate::version::Version;

/// A set of versions represented as a normalized union of intervals, plus a
/// `weak` marker for soft constraints.
///
/// The weak flag marks a constraint a downstream resolver may override (an
/// undecorated Maven version). It affects neither ordering nor set
/// semantics, and is therefore excluded from equality and hashing.
#[derive(Debug, Clone)]
pub struct VersionConstraint<V> {
    ranges: Vec<VersionRange<V>>,
    weak: bool,
}

impl<V: Version> VersionConstraint<V> {
    /// The constraint matching no version.
    pub fn empty() -> Self {
        Self {
            ranges: Vec::new(),
            weak: false,
        }
    }

    /// The constraint matching every version.
    pub fn any() -> Self {
        Self {
            ranges: vec![VersionRange::any()],
            weak: false,
        }
    }

    /// Build a constraint from arbitrary ranges.
    ///
    /// Normalizes: drops empty degenerate ranges, sorts, and coalesces
    /// overlapping or adjacent neighbours, so `(v,v)` inputs become `EMPTY`
    /// and touching intervals fuse.
    pub fn new(ranges: Vec<VersionRange<V>>) -> Self {
        let mut ranges: Vec<VersionRange<V>> =
            ranges.into_iter().filter(|r| !r.is_empty()).collect();
        ranges.sort();
        let mut normalized: Vec<VersionRange<V>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match normalized.last_mut() {
                Some(last) if last.allows_any(&range) || last.is_adjacent(&range) => {
                    *last = last.merge(&range);
                }
                _ => normalized.push(range),
            }
        }
        Self {
            ranges: normalized,
            weak: false,
        }
    }

    /// The same constraint with the weak marker set as given.
    pub fn with_weak(mut self, weak: bool) -> Self {
        self.weak = weak;
        self
    }

    /// Whether a downstream resolver may override this constraint.
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// The normalized ranges, sorted and pairwise disjoint.
    pub fn ranges(&self) -> &[VersionRange<V>] {
        &self.ranges
    }

    /// Whether no version matches.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether every version matches.
    pub fn is_any(&self) -> bool {
        self.ranges.len() == 1 && self.ranges[0].is_any()
    }

    /// Membership: some range contains `version`.
    pub fn allows(&self, version: &V) -> bool {
        self.ranges.iter().any(|r| r.allows(version))
    }

    /// Whether this constraint contains every version `other` matches.
    ///
    /// Linear two-pointer sweep: advance `other` whenever the current self
    /// range covers the current other range, otherwise advance self.
    pub fn allows_all(&self, other: &Self) -> bool {
        let mut si = 0;
        let mut oi = 0;
        while si < self.ranges.len() && oi < other.ranges.len() {
            if self.ranges[si].allows_all(&other.ranges[oi]) {
                oi += 1;
            } else {
                si += 1;
            }
        }
        oi == other.ranges.len()
    }

    /// Whether this constraint shares at least one version with `other`.
    pub fn allows_any(&self, other: &Self) -> bool {
        let mut si = 0;
        let mut oi = 0;
        while si < self.ranges.len() && oi < other.ranges.len() {
            let (a, b) = (&self.ranges[si], &other.ranges[oi]);
            if a.allows_any(b) {
                return true;
            }
            if a.allows_higher(b) {
                oi += 1;
            } else {
                si += 1;
            }
        }
        false
    }

    /// The set intersection.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = Vec::new();
        let mut si = 0;
        let mut oi = 0;
        while si < self.ranges.len() && oi < other.ranges.len() {
            let (a, b) = (&self.ranges[si], &other.ranges[oi]);
            if let Some(overlap) = a.intersect(b) {
                out.push(overlap);
            }
            // Advance the side whose upper bound falls first.
            if a.allows_higher(b) {
                oi += 1;
            } else {
                si += 1;
            }
        }
        Self::new(out).with_weak(self.weak && other.weak)
    }

    /// The set union.
    pub fn union(&self, other: &Self) -> Self {
        let mut ranges = self.ranges.clone();
        ranges.extend(other.ranges.iter().cloned());
        Self::new(ranges).with_weak(self.weak && other.weak)
    }

    /// The versions matched by this constraint but not by `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let weak = self.weak && other.weak;
        let mut out: Vec<VersionRange<V>> = Vec::new();
        let mut remaining = self.ranges.iter();
        let Some(mut current) = remaining.next().cloned() else {
            return Self::empty().with_weak(weak);
        };
        let mut others = other.ranges.iter().peekable();
        loop {
            let Some(o) = others.peek().copied() else {
                out.push(current);
                out.extend(remaining.cloned());
                break;
            };
            if o.strictly_lower(&current) {
                others.next();
                continue;
            }
            if o.strictly_higher(&current) {
                out.push(current);
                match remaining.next() {
                    Some(next) => current = next.clone(),
                    None => break,
                }
                continue;
            }
            let mut pieces = current.difference(o);
            match pieces.len() {
                // Fully covered: move on to the next self range.
                0 => match remaining.next() {
                    Some(next) => current = next.clone(),
                    None => break,
                },
                1 => {
                    let piece = pieces.pop().expect("one remainder");
                    if piece.strictly_lower(o) {
                        // Remainder sits below this other range and below all
                        // later ones; it is final.
                        out.push(piece);
                        match remaining.next() {
                            Some(next) => current = next.clone(),
                            None => break,
                        }
                    } else {
                        current = piece;
                        others.next();
                    }
                }
                2 => {
                    let after = pieces.pop().expect("upper remainder");
                    out.push(pieces.pop().expect("lower remainder"));
                    current = after;
                    others.next();
                }
                _ => unreachable!("range difference produced more than two sub-ranges"),
            }
        }
        Self::new(out).with_weak(weak)
    }

    /// Every version this constraint does not match.
    pub fn complement(&self) -> Self {
        Self::any().difference(self)
    }
}

impl<V: Version> From<VersionRange<V>> for VersionConstraint<V> {
    fn from(range: VersionRange<V>) -> Self {
        Self::new(vec![range])
    }
}

/// Equality ignores the weak marker: two constraints matching the same set
/// of versions are equal.
impl<V: Version> PartialEq for VersionConstraint<V> {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl<V: Version> Eq for VersionConstraint<V> {}

impl<V: Version> Hash for VersionConstraint<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ranges.hash(state);
    }
}

impl<V: Version> fmt::Display for VersionConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranges.is_empty() {
            return f.write_str("<empty>");
        }
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn closed(lo: u32, hi: u32) -> VersionRange<Rev> {
        VersionRange::new(Some(Rev(lo)), Some(Rev(hi)), true, true)
    }

    fn half_open(lo: u32, hi: u32) -> VersionRange<Rev> {
        VersionRange::new(Some(Rev(lo)), Some(Rev(hi)), true, false)
    }

    fn constraint(ranges: Vec<VersionRange<Rev>>) -> VersionConstraint<Rev> {
        VersionConstraint::new(ranges)
    }

    #[test]
    fn new_sorts_and_coalesces() {
        let c = constraint(vec![closed(5, 8), closed(1, 3), closed(2, 6)]);
        assert_eq!(c.ranges(), &[closed(1, 8)]);
    }

    #[test]
    fn new_merges_adjacent() {
        let c = constraint(vec![half_open(1, 3), closed(3, 5)]);
        assert_eq!(c.ranges(), &[closed(1, 5)]);
    }

    #[test]
    fn new_keeps_separated_ranges_apart() {
        let c = constraint(vec![closed(4, 5), closed(1, 2)]);
        assert_eq!(c.ranges(), &[closed(1, 2), closed(4, 5)]);
    }

    #[test]
    fn degenerate_ranges_normalize_to_empty() {
        let c = constraint(vec![VersionRange::new(Some(Rev(3)), Some(Rev(3)), false, false)]);
        assert!(c.is_empty());
        assert_eq!(c, VersionConstraint::empty());
    }

    #[test]
    fn membership() {
        let c = constraint(vec![closed(1, 2), closed(4, 5)]);
        assert!(c.allows(&Rev(1)));
        assert!(!c.allows(&Rev(3)));
        assert!(c.allows(&Rev(5)));
    }

    #[test]
    fn allows_all_over_multiple_ranges() {
        let outer = constraint(vec![closed(1, 3), closed(5, 9)]);
        let inner = constraint(vec![closed(1, 2), closed(6, 7), closed(8, 9)]);
        assert!(outer.allows_all(&inner));
        assert!(!inner.allows_all(&outer));
        assert!(outer.allows_all(&VersionConstraint::empty()));
        assert!(!VersionConstraint::empty().allows_all(&inner));
    }

    #[test]
    fn allows_any_finds_overlap_across_lists() {
        let a = constraint(vec![closed(1, 2), closed(8, 9)]);
        let b = constraint(vec![closed(3, 4), closed(9, 12)]);
        assert!(a.allows_any(&b));
        let c = constraint(vec![closed(3, 4), closed(5, 7)]);
        assert!(!a.allows_any(&c));
    }

    #[test]
    fn intersect_pairs_up_overlaps() {
        let a = constraint(vec![closed(1, 5), closed(8, 12)]);
        let b = constraint(vec![closed(3, 9)]);
        assert_eq!(a.intersect(&b).ranges(), &[closed(3, 5), closed(8, 9)]);
    }

    #[test]
    fn intersect_with_empty_annihilates() {
        let a = constraint(vec![closed(1, 5)]);
        assert!(a.intersect(&VersionConstraint::empty()).is_empty());
    }

    #[test]
    fn intersect_with_any_is_identity() {
        let a = constraint(vec![closed(1, 5), closed(7, 9)]);
        assert_eq!(a.intersect(&VersionConstraint::any()), a);
    }

    #[test]
    fn union_is_identity_on_empty() {
        let a = constraint(vec![closed(1, 5)]);
        assert_eq!(a.union(&VersionConstraint::empty()), a);
        assert_eq!(VersionConstraint::empty().union(&a), a);
    }

    #[test]
    fn union_collapses_to_any() {
        let a = constraint(vec![closed(1, 5)]);
        assert!(a.union(&VersionConstraint::any()).is_any());
    }

    #[test]
    fn difference_carves_holes() {
        let a = constraint(vec![closed(1, 10)]);
        let b = constraint(vec![closed(3, 4), closed(6, 7)]);
        let d = a.difference(&b);
        assert_eq!(
            d.ranges(),
            &[
                half_open(1, 3),
                VersionRange::new(Some(Rev(4)), Some(Rev(6)), false, false),
                VersionRange::new(Some(Rev(7)), Some(Rev(10)), false, true),
            ]
        );
    }

    #[test]
    fn difference_with_self_is_empty() {
        let a = constraint(vec![closed(1, 5), closed(7, 9)]);
        assert!(a.difference(&a).is_empty());
    }

    #[test]
    fn difference_skips_low_and_high_others() {
        let a = constraint(vec![closed(5, 6)]);
        let b = constraint(vec![closed(1, 2), closed(8, 9)]);
        assert_eq!(a.difference(&b), a);
    }

    #[test]
    fn difference_emits_trailing_self_ranges() {
        let a = constraint(vec![closed(1, 2), closed(5, 6), closed(8, 9)]);
        let b = constraint(vec![closed(1, 2)]);
        assert_eq!(a.difference(&b).ranges(), &[closed(5, 6), closed(8, 9)]);
    }

    #[test]
    fn complement_of_empty_is_any() {
        assert!(VersionConstraint::<Rev>::empty().complement().is_any());
        assert!(VersionConstraint::<Rev>::any().complement().is_empty());
    }

    #[test]
    fn complement_inverts_endpoints() {
        let c: VersionConstraint<Rev> = VersionRange::exactly(Rev(4)).into();
        let complement = c.complement();
        assert_eq!(
            complement.ranges(),
            &[VersionRange::lower_than(Rev(4)), VersionRange::higher_than(Rev(4))]
        );
        assert_eq!(complement.complement(), c);
    }

    #[test]
    fn weak_is_ignored_by_equality_and_dropped_by_complement() {
        let soft = constraint(vec![closed(1, 5)]).with_weak(true);
        let hard = constraint(vec![closed(1, 5)]);
        assert_eq!(soft, hard);
        assert!(soft.is_weak());
        assert!(!soft.complement().is_weak());
        assert!(soft.union(&soft).is_weak());
        assert!(!soft.union(&hard).is_weak());
    }

    #[test]
    fn display_forms() {
        assert_eq!(VersionConstraint::<Rev>::empty().to_string(), "<empty>");
        assert_eq!(VersionConstraint::<Rev>::any().to_string(), "(,)");
        let c = constraint(vec![closed(1, 2), half_open(4, 6)]);
        assert_eq!(c.to_string(), "[1,2],[4,6)");
    }
}
