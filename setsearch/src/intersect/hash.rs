use std::{collections::HashSet, hash::Hash};
use crate::visitor::Visitor;

/// Builds a hash set from `database` and probes it with each element of
/// `query`. Every query occurrence is checked independently; duplicate
/// database entries collapse into one.
///
/// Expected O(D + Q).
pub fn hash_intersect<T, V>(query: &mut [T], database: &mut [T], visitor: &mut V)
where
    T: Eq + Hash,
    V: Visitor<T>,
{
    let mut set: HashSet<&T> = HashSet::with_capacity(database.len());
    for item in database.iter() {
        set.insert(item);
    }

    for item in query.iter() {
        if set.contains(item) {
            visitor.visit(item);
        }
    }
}
