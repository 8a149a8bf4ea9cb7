mod search;
mod merge;
mod hash;

pub use {
    search::*,
    merge::*,
    hash::*,
};

use std::{fmt, hash::Hash, str::FromStr};
use crate::visitor::{Counter, VecWriter, Visitor};

/// Two-set intersection of a query against a database. Both slices are
/// scratch copies owned by the caller and may be reordered in place.
pub type Intersect2<T, V> = fn(query: &mut [T], database: &mut [T], visitor: &mut V);

pub fn run_2set<T: Clone>(
    query: &mut [T],
    database: &mut [T],
    intersect: Intersect2<T, VecWriter<T>>) -> Vec<T>
{
    let mut writer: VecWriter<T> = VecWriter::with_capacity(query.len());
    intersect(query, database, &mut writer);
    writer.into()
}

pub fn count_2set<T>(
    query: &mut [T],
    database: &mut [T],
    intersect: Intersect2<T, Counter>) -> usize
{
    let mut counter = Counter::new();
    intersect(query, database, &mut counter);
    counter.count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    BinarySearch,
    Merge,
    HashTable,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::BinarySearch,
        SearchAlgorithm::Merge,
        SearchAlgorithm::HashTable,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::BinarySearch => "binary_search",
            SearchAlgorithm::Merge => "merge",
            SearchAlgorithm::HashTable => "hash_table",
        }
    }

    /// Human readable name used in chart legends and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            SearchAlgorithm::BinarySearch => "Binary search",
            SearchAlgorithm::Merge => "Merge search",
            SearchAlgorithm::HashTable => "Hash table search",
        }
    }

    pub fn intersect_fn<T, V>(&self) -> Intersect2<T, V>
    where
        T: Ord + Hash,
        V: Visitor<T>,
    {
        match self {
            SearchAlgorithm::BinarySearch => binary_search_intersect,
            SearchAlgorithm::Merge => merge_intersect,
            SearchAlgorithm::HashTable => hash_intersect,
        }
    }

    /// Intersection size of `query` and `database` under this algorithm's
    /// duplicate policy.
    pub fn count<T: Ord + Hash>(&self, query: &mut [T], database: &mut [T]) -> usize {
        count_2set(query, database, self.intersect_fn())
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchAlgorithm::ALL.into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown algorithm {}", s))
    }
}
