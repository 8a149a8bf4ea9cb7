use std::hash::Hash;

use rand::{distributions::Uniform, seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where benchmark databases and queries are drawn from.
pub trait DataSource {
    type Item: Ord + Hash + Clone;

    fn draw<R: Rng>(&self, rng: &mut R, len: usize) -> Result<Vec<Self::Item>, String>;
}

/// Independent uniform integers in `0..=max_value`. Values may repeat.
#[derive(Debug, Clone, Copy)]
pub struct UniformInts {
    pub max_value: u64,
}

impl DataSource for UniformInts {
    type Item = u64;

    fn draw<R: Rng>(&self, rng: &mut R, len: usize) -> Result<Vec<u64>, String> {
        let distribution = Uniform::new_inclusive(0, self.max_value);
        Ok((0..len).map(|_| rng.sample(&distribution)).collect())
    }
}

/// Samples lines of a corpus without replacement.
#[derive(Debug, Clone)]
pub struct CorpusSample {
    values: Vec<String>,
}

impl CorpusSample {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DataSource for CorpusSample {
    type Item = String;

    fn draw<R: Rng>(&self, rng: &mut R, len: usize) -> Result<Vec<String>, String> {
        if len > self.values.len() {
            return Err(format!(
                "sample larger than population: {} > {}",
                len, self.values.len()
            ));
        }

        Ok(index::sample(rng, self.values.len(), len)
            .into_iter()
            .map(|i| self.values[i].clone())
            .collect())
    }
}

/// Draws a fresh `(database, query)` pair, database first.
pub fn db_queries<S, R>(
    source: &S,
    rng: &mut R,
    database_size: usize,
    query_size: usize) -> Result<(Vec<S::Item>, Vec<S::Item>), String>
where
    S: DataSource,
    R: Rng,
{
    let database = source.draw(rng, database_size)?;
    let query = source.draw(rng, query_size)?;
    Ok((database, query))
}

pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
