//! Token-set reduction: the invariant tokens of a group.

use std::collections::HashSet;

/// Compute the intersection of all member token sets.
///
/// This is a true multi-way intersection, recomputed from the full slice,
/// so the result is independent of member order — a required property, not
/// an accident of implementation. Zero member sets reduce to the empty set;
/// a single member set reduces to itself.
pub fn reduce(member_token_sets: &[HashSet<String>]) -> HashSet<String> {
    let Some(first) = member_token_sets.first() else {
        return HashSet::new();
    };

    first
        .iter()
        .filter(|token| member_token_sets[1..].iter().all(|set| set.contains(*token)))
        .cloned()
        .collect()
}
