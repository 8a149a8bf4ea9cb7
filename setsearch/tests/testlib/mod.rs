use quickcheck::Arbitrary;
use setsearch::{
    intersect::{self, Intersect2},
    visitor::Counter,
};
use std::fmt;

// Arbitrary Set //
/// Values with no duplicates, in arbitrary order.
#[derive(Debug, Clone)]
pub struct DistinctSet(Vec<i32>);

impl DistinctSet {
    pub fn from_unsorted(mut vec: Vec<i32>) -> Self {
        vec.sort_unstable();
        vec.dedup();
        Self(vec)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.0.clone()
    }
}

impl From<Vec<i32>> for DistinctSet {
    fn from(value: Vec<i32>) -> Self {
        Self::from_unsorted(value)
    }
}

impl quickcheck::Arbitrary for DistinctSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut set = Self::from_unsorted(Vec::<i32>::arbitrary(g));
        // Unsorted on input so that sorting is part of what gets tested.
        set.0.reverse();
        let mid = set.0.len() / 2;
        set.0.rotate_left(mid);
        set
    }
}

// Arbitrary Intersection Function //
#[derive(Clone)]
pub struct CountIntersectFn(
    &'static str, pub Intersect2<i32, Counter>
);

impl CountIntersectFn {
    pub fn count(&self, query: &[i32], database: &[i32]) -> usize {
        intersect::count_2set(&mut query.to_vec(), &mut database.to_vec(), self.1)
    }
}

impl fmt::Debug for CountIntersectFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl quickcheck::Arbitrary for CountIntersectFn {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        g.choose([
            CountIntersectFn("binary_search", intersect::binary_search_intersect),
            CountIntersectFn("merge", intersect::merge_intersect),
            CountIntersectFn("hash_table", intersect::hash_intersect),
        ].as_slice())
        .unwrap()
        .clone()
    }
}

// Arbitrary Pair of Sets //
/// Two duplicate-free sets with a known number of shared values.
#[derive(Debug, Clone)]
pub struct SimilarSetPair {
    pub query: DistinctSet,
    pub database: DistinctSet,
    pub shared: usize,
}

impl quickcheck::Arbitrary for SimilarSetPair {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Shared values are even, the rest are odd and split by sign so the
        // only overlap is `shared`.
        let shared = DistinctSet::from_unsorted(
            Vec::<i32>::arbitrary(g).into_iter().map(|v| (v / 2) * 2).collect());

        let mut query: Vec<i32> = Vec::<u16>::arbitrary(g).into_iter()
            .map(|v| v as i32 * 2 + 1)
            .collect();
        let mut database: Vec<i32> = Vec::<u16>::arbitrary(g).into_iter()
            .map(|v| -(v as i32 * 2 + 1))
            .collect();
        query.extend(shared.as_slice());
        database.extend(shared.as_slice());

        SimilarSetPair {
            query: query.into(),
            database: database.into(),
            shared: shared.as_slice().len(),
        }
    }
}

// Arbitrary Multiset //
/// Values drawn from a small domain so duplicates are common.
#[derive(Debug, Clone)]
pub struct Multiset(pub Vec<i32>);

impl quickcheck::Arbitrary for Multiset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Multiset(Vec::<u8>::arbitrary(g).into_iter()
            .map(|v| (v % 16) as i32)
            .collect())
    }
}
