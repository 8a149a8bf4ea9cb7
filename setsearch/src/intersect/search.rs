//! Search-based set intersection algorithms.

use std::cmp::Ordering;
use crate::visitor::Visitor;

/// Sorts `database` then binary searches it for every element of `query`,
/// visiting queries in their original order. Every query occurrence that is
/// present in the database is visited once.
///
/// Runs in O(D log D + Q log D).
pub fn binary_search_intersect<T, V>(query: &mut [T], database: &mut [T], visitor: &mut V)
where
    T: Ord,
    V: Visitor<T>,
{
    database.sort_unstable();

    for target in query.iter() {
        let index = lower_bound(database, target);

        if index < database.len() && database[index] == *target {
            visitor.visit(target);
        }
    }
}

/// Index of the first element of `set` not less than `target`, or
/// `set.len()` if there is none. `set` must be sorted.
pub fn lower_bound<T: Ord>(set: &[T], target: &T) -> usize {
    let mut lo = 0;
    let mut hi = set.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;

        match set[mid].cmp(target) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater | Ordering::Equal => hi = mid,
        }
    }

    lo
}
