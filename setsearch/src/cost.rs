//! Closed-form cost model of the sort based intersections.
//!
//! These are textbook asymptotic cost expressions evaluated numerically, not
//! measurements. Both take the query size `q` and database size `d` and use
//! the natural logarithm, so both sizes must be at least 1.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    BinarySearch,
    Merge,
}

impl CostModel {
    pub const ALL: [CostModel; 2] = [CostModel::BinarySearch, CostModel::Merge];

    pub fn label(&self) -> &'static str {
        match self {
            CostModel::BinarySearch => "Binary Search",
            CostModel::Merge => "Merge Search",
        }
    }

    pub fn eval(&self, q: usize, d: usize) -> f64 {
        match self {
            CostModel::BinarySearch => binary_search_cost(q, d),
            CostModel::Merge => merge_cost(q, d),
        }
    }
}

/// `d·ln(q) + q·ln(d)`
pub fn binary_search_cost(q: usize, d: usize) -> f64 {
    assert_domain(q, d);
    let (q, d) = (q as f64, d as f64);
    d * q.ln() + q * d.ln()
}

/// `d·ln(q) + q·ln(q) + q + d`
pub fn merge_cost(q: usize, d: usize) -> f64 {
    assert_domain(q, d);
    let (q, d) = (q as f64, d as f64);
    d * q.ln() + q * q.ln() + q + d
}

/// Evaluates `model` at every query size for a fixed database size.
pub fn cost_series(
    model: CostModel,
    query_sizes: impl IntoIterator<Item = usize>,
    database_size: usize) -> Vec<f64>
{
    query_sizes.into_iter()
        .map(|q| model.eval(q, database_size))
        .collect()
}

fn assert_domain(q: usize, d: usize) {
    assert!(q > 0, "query size must be positive");
    assert!(d > 0, "database size must be positive");
}
