use std::{fmt, hash::Hash, hint, time::{Duration, Instant}};

use indicatif::{ProgressBar, ProgressStyle};
use num::ToPrimitive;
use rand::Rng;
use setsearch::{intersect::SearchAlgorithm, visitor::Counter};

use crate::{generators::{self, DataSource}, memory};

/// One timed call and one separately measured call of an algorithm on the
/// same round of data.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub time: Duration,
    pub bytes: u64,
    pub count: usize,
}

/// What a measurement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// Copying the inputs and running the algorithm on the copies.
    #[default]
    Call,
    /// The algorithm alone. Copies are made before the clock starts.
    AlgorithmOnly,
}

#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub query_sizes: Vec<usize>,
    pub database_size: usize,
    pub rounds: usize,
    pub verify: bool,
    pub progress: bool,
    pub region: Region,
}

/// Per query size means for one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSeries {
    pub algorithm: SearchAlgorithm,
    /// Nanoseconds
    pub times: Vec<f64>,
    pub bytes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResults {
    pub database_size: usize,
    pub query_sizes: Vec<usize>,
    pub series: Vec<AlgorithmSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Time,
    Memory,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Time => "Time",
            Metric::Memory => "Memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub algorithm: SearchAlgorithm,
    pub metric: Metric,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} min {} max {}",
            self.algorithm.label(), self.metric.label(), self.min, self.max)
    }
}

impl SweepResults {
    /// Min and max of every series, times first then memory.
    pub fn summaries(&self) -> Result<Vec<Summary>, String> {
        let mut summaries = Vec::with_capacity(self.series.len() * 2);

        for metric in [Metric::Time, Metric::Memory] {
            for series in &self.series {
                let values = match metric {
                    Metric::Time => &series.times,
                    Metric::Memory => &series.bytes,
                };
                let (min, max) = min_max(values).ok_or_else(|| format!(
                    "no {} measurements for {}",
                    metric.label().to_lowercase(), series.algorithm.label()
                ))?;
                summaries.push(Summary { algorithm: series.algorithm, metric, min, max });
            }
        }
        Ok(summaries)
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// Mean of `samples`. NaN if empty.
pub fn mean<T: ToPrimitive>(samples: &[T]) -> f64 {
    let sum: f64 = samples.iter()
        .map(|s| s.to_f64().unwrap_or(f64::NAN))
        .sum();
    sum / samples.len() as f64
}

fn time<D, R>(
    region: Region,
    prepare: impl Fn() -> D,
    run: impl Fn(&mut D) -> R) -> (Duration, R)
{
    match region {
        Region::Call => {
            let start = Instant::now();
            let result = hint::black_box(run(&mut prepare()));
            (start.elapsed(), result)
        },
        Region::AlgorithmOnly => {
            let mut data = prepare();
            let start = Instant::now();
            let result = hint::black_box(run(&mut data));
            (start.elapsed(), result)
        },
    }
}

fn measure<D, R>(
    region: Region,
    prepare: impl Fn() -> D,
    run: impl Fn(&mut D) -> R) -> (u64, R)
{
    let (result, bytes) = match region {
        Region::Call =>
            memory::measure(|| hint::black_box(run(&mut prepare()))),
        Region::AlgorithmOnly => {
            let mut data = prepare();
            memory::measure(|| hint::black_box(run(&mut data)))
        },
    };
    (bytes, result)
}

/// Times `algorithm` on fresh copies of the inputs, then measures its heap
/// usage on another set of fresh copies. `region` decides whether making the
/// copies counts towards both readings.
pub fn sample_algorithm<T>(
    algorithm: SearchAlgorithm,
    query: &[T],
    database: &[T],
    region: Region) -> Sample
where
    T: Ord + Hash + Clone,
{
    let intersect = algorithm.intersect_fn::<T, Counter>();

    let prepare = || (query.to_vec(), database.to_vec(), Counter::new());
    let run = |(query, database, counter): &mut (Vec<T>, Vec<T>, Counter)| {
        intersect(query, database, counter);
        counter.count()
    };

    let (time, count) = time(region, prepare, run);
    let (bytes, _) = measure(region, prepare, run);

    Sample { time, bytes, count }
}

/// Runs every algorithm for each query size and averages over the rounds.
/// Data is drawn fresh from `source` every round.
pub fn run_sweep<S, R>(
    settings: &SweepSettings,
    source: &S,
    rng: &mut R) -> Result<SweepResults, String>
where
    S: DataSource,
    R: Rng,
{
    let progress = progress_bar(settings)?;

    let mut series: Vec<AlgorithmSeries> = SearchAlgorithm::ALL.iter()
        .map(|&algorithm| AlgorithmSeries {
            algorithm,
            times: Vec::with_capacity(settings.query_sizes.len()),
            bytes: Vec::with_capacity(settings.query_sizes.len()),
        })
        .collect();

    for &query_size in &settings.query_sizes {
        progress.set_message(format!("query size {}", query_size));

        let mut times: Vec<Vec<u128>> = vec![Vec::with_capacity(settings.rounds); series.len()];
        let mut bytes: Vec<Vec<u64>> = vec![Vec::with_capacity(settings.rounds); series.len()];

        for _ in 0..settings.rounds {
            let (database, query) = generators::db_queries(
                source, rng, settings.database_size, query_size)?;

            let samples: Vec<Sample> = series.iter()
                .map(|s| sample_algorithm(s.algorithm, &query, &database, settings.region))
                .collect();

            if settings.verify {
                verify_counts(&series, &samples, query_size)?;
            }

            for (i, sample) in samples.iter().enumerate() {
                times[i].push(sample.time.as_nanos());
                bytes[i].push(sample.bytes);
            }
            progress.inc(1);
        }

        for (i, s) in series.iter_mut().enumerate() {
            s.times.push(mean(&times[i]));
            s.bytes.push(mean(&bytes[i]));
        }
    }
    progress.finish_and_clear();

    Ok(SweepResults {
        database_size: settings.database_size,
        query_sizes: settings.query_sizes.clone(),
        series,
    })
}

// Binary search and hash table both count every query occurrence, so they
// agree on any input. Merge is left out as it pairs duplicates one to one.
fn verify_counts(
    series: &[AlgorithmSeries],
    samples: &[Sample],
    query_size: usize) -> Result<(), String>
{
    let count_of = |algorithm: SearchAlgorithm| series.iter()
        .position(|s| s.algorithm == algorithm)
        .map(|i| samples[i].count);

    let binary = count_of(SearchAlgorithm::BinarySearch);
    let hash = count_of(SearchAlgorithm::HashTable);

    match (binary, hash) {
        (Some(binary), Some(hash)) if binary != hash => Err(format!(
            "count mismatch at query size {}: {} found {}, {} found {}",
            query_size,
            SearchAlgorithm::BinarySearch, binary,
            SearchAlgorithm::HashTable, hash
        )),
        _ => Ok(()),
    }
}

fn progress_bar(settings: &SweepSettings) -> Result<ProgressBar, String> {
    if !settings.progress {
        return Ok(ProgressBar::hidden());
    }

    let total = (settings.query_sizes.len() * settings.rounds) as u64;
    let style = ProgressStyle::with_template(
        "{bar:40.green/white} {pos}/{len} rounds [{elapsed_precise}] {msg}")
        .map_err(|e| format!("invalid progress template: {}", e))?;

    Ok(ProgressBar::new(total).with_style(style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{seeded_rng, CorpusSample, UniformInts};

    fn settings(query_sizes: Vec<usize>) -> SweepSettings {
        SweepSettings {
            query_sizes,
            database_size: 200,
            rounds: 3,
            verify: true,
            progress: false,
            region: Region::Call,
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1u64, 2, 3, 6]), 3.0);
        assert_eq!(mean(&[10u128]), 10.0);
        assert!(mean::<u64>(&[]).is_nan());
    }

    #[test]
    fn test_sample_counts() {
        let query = [1, 2, 3, 4, 5];
        let database = [3, 4, 5, 6, 7];

        for algorithm in SearchAlgorithm::ALL {
            for region in [Region::Call, Region::AlgorithmOnly] {
                let sample = sample_algorithm(algorithm, &query, &database, region);
                assert_eq!(sample.count, 3, "{} {:?}", algorithm, region);
            }
        }
    }

    #[test]
    fn test_sample_does_not_sort_inputs() {
        let query = vec![5, 1, 4];
        let database = vec![9, 4, 1];
        sample_algorithm(SearchAlgorithm::Merge, &query, &database, Region::Call);
        sample_algorithm(SearchAlgorithm::Merge, &query, &database, Region::AlgorithmOnly);
        assert_eq!(query, vec![5, 1, 4]);
        assert_eq!(database, vec![9, 4, 1]);
    }

    #[test]
    fn test_sweep_shape() {
        let settings = settings(vec![10, 20, 30, 40]);
        let results = run_sweep(
            &settings, &UniformInts { max_value: 50 }, &mut seeded_rng(Some(5))
        ).unwrap();

        assert_eq!(results.database_size, 200);
        assert_eq!(results.query_sizes, vec![10, 20, 30, 40]);
        assert_eq!(results.series.len(), 3);
        for (series, algorithm) in results.series.iter().zip(SearchAlgorithm::ALL) {
            assert_eq!(series.algorithm, algorithm);
            assert_eq!(series.times.len(), 4);
            assert_eq!(series.bytes.len(), 4);
            assert!(series.times.iter().all(|t| t.is_finite() && *t >= 0.0));
        }

        let summaries = results.summaries().unwrap();
        assert_eq!(summaries.len(), 6);
        assert!(summaries[..3].iter().all(|s| s.metric == Metric::Time));
        assert!(summaries[3..].iter().all(|s| s.metric == Metric::Memory));
        assert!(summaries.iter().all(|s| s.min <= s.max));
    }

    #[test]
    fn test_sweep_corpus() {
        let corpus = CorpusSample::new((0..500).map(|i| format!("word{}", i)).collect());
        let results = run_sweep(&settings(vec![50, 100]), &corpus, &mut seeded_rng(Some(9)))
            .unwrap();
        assert_eq!(results.series[0].times.len(), 2);
    }

    #[test]
    fn test_sweep_corpus_too_small() {
        let corpus = CorpusSample::new((0..100).map(|i| i.to_string()).collect());
        let result = run_sweep(&settings(vec![10]), &corpus, &mut seeded_rng(Some(9)));
        assert!(result.unwrap_err().contains("sample larger than population"));
    }

    #[test]
    fn test_empty_sweep_has_no_summary() {
        let results = run_sweep(
            &settings(vec![]), &UniformInts { max_value: 10 }, &mut seeded_rng(Some(1))
        ).unwrap();
        assert!(results.summaries().is_err());
    }

    #[test]
    fn test_verify_mismatch() {
        let series: Vec<AlgorithmSeries> = SearchAlgorithm::ALL.iter()
            .map(|&algorithm| AlgorithmSeries { algorithm, times: vec![], bytes: vec![] })
            .collect();
        let sample = |count| Sample { time: Duration::ZERO, bytes: 0, count };

        assert!(verify_counts(&series, &[sample(4), sample(2), sample(4)], 10).is_ok());
        assert!(verify_counts(&series, &[sample(4), sample(4), sample(3)], 10).is_err());
    }

    #[test]
    fn test_summary_line() {
        let summary = Summary {
            algorithm: SearchAlgorithm::HashTable,
            metric: Metric::Memory,
            min: 16.0,
            max: 2048.5,
        };
        assert_eq!(summary.to_string(), "Hash table search Memory min 16 max 2048.5");

        let summary = Summary { metric: Metric::Time, min: 1500.0, max: 2e6, ..summary };
        assert_eq!(summary.to_string(), "Hash table search Time min 1500 max 2000000");
    }
}
