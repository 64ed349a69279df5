//! Set reconciliation for hero-power associations.
//!
//! Pure computation, no store access. Given the power ids currently attached
//! to a hero and the desired ids, produces the rows to drop and the rows to
//! insert. Applying the delta and reconciling again yields an empty delta.

use std::collections::BTreeSet;

use crate::core::types::PowerId;

/// Association changes needed to move a hero from one power set to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerDelta {
    pub to_remove: BTreeSet<PowerId>,
    pub to_add: BTreeSet<PowerId>,
}

impl PowerDelta {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Computes the association delta between `current` and `desired`.
///
/// Duplicate ids in `desired` collapse to a set before comparison; ids present
/// on both sides are left untouched.
pub fn reconcile(current: &BTreeSet<PowerId>, desired: &[PowerId]) -> PowerDelta {
    let desired: BTreeSet<PowerId> = desired.iter().copied().collect();
    PowerDelta {
        to_remove: current.difference(&desired).copied().collect(),
        to_add: desired.difference(current).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[PowerId]) -> BTreeSet<PowerId> {
        ids.iter().copied().collect()
    }

    fn apply(current: &BTreeSet<PowerId>, delta: &PowerDelta) -> BTreeSet<PowerId> {
        let mut next = current.clone();
        for id in &delta.to_remove {
            next.remove(id);
        }
        for id in &delta.to_add {
            next.insert(*id);
        }
        next
    }

    #[test]
    fn disjoint_sets_swap_entirely() {
        let delta = reconcile(&set(&[1, 2]), &[3, 4]);
        assert_eq!(delta.to_remove, set(&[1, 2]));
        assert_eq!(delta.to_add, set(&[3, 4]));
    }

    #[test]
    fn overlap_is_left_untouched() {
        let delta = reconcile(&set(&[1, 2, 3]), &[2, 3, 4]);
        assert_eq!(delta.to_remove, set(&[1]));
        assert_eq!(delta.to_add, set(&[4]));
    }

    #[test]
    fn identical_sets_produce_empty_delta() {
        assert!(reconcile(&set(&[1, 2]), &[2, 1]).is_empty());
    }

    #[test]
    fn empty_desired_removes_everything() {
        let delta = reconcile(&set(&[1, 2]), &[]);
        assert_eq!(delta.to_remove, set(&[1, 2]));
        assert!(delta.to_add.is_empty());
    }

    #[test]
    fn empty_current_adds_everything() {
        let delta = reconcile(&set(&[]), &[7, 9]);
        assert!(delta.to_remove.is_empty());
        assert_eq!(delta.to_add, set(&[7, 9]));
    }

    #[test]
    fn duplicates_in_desired_collapse() {
        let delta = reconcile(&set(&[1]), &[2, 2, 2, 1]);
        assert_eq!(delta.to_add, set(&[2]));
        assert!(delta.to_remove.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let current = set(&[1, 2, 3]);
        let desired = [3, 4, 4, 5];
        let first = reconcile(&current, &desired);
        let after = apply(&current, &first);
        let second = reconcile(&after, &desired);
        assert!(second.is_empty());
    }
}
