use std::cmp::Ordering;
use crate::visitor::Visitor;

/// Sorts both inputs then walks them with one cursor each.
///
/// Zipper intersection derived from the 'zipper' or 'tape' sorted array
/// merging algorithm. Equal values advance both cursors, so a value present
/// `a` times in the query and `b` times in the database is visited
/// `min(a, b)` times. This differs from [super::binary_search_intersect] and
/// [super::hash_intersect] whenever the query holds duplicates.
///
/// Runs in O(Q log Q + D log D + Q + D).
pub fn merge_intersect<T, V>(query: &mut [T], database: &mut [T], visitor: &mut V)
where
    T: Ord,
    V: Visitor<T>,
{
    query.sort_unstable();
    database.sort_unstable();

    let mut idx_q = 0;
    let mut idx_d = 0;

    while idx_q < query.len() && idx_d < database.len() {
        let value_q = &query[idx_q];
        let value_d = &database[idx_d];

        match value_q.cmp(value_d) {
            Ordering::Less => idx_q += 1,

            Ordering::Greater => idx_d += 1,

            Ordering::Equal => {
                visitor.visit(value_q);
                idx_q += 1;
                idx_d += 1;
            }
        }
    }
}
