//! Command line and TOML configuration for the `search` and `sim` drivers.
//!
//! Every option may come from a TOML file passed with `--config`; flags given
//! on the command line take precedence over the file. The merged options are
//! validated into a [SearchConfig] or [SimConfig].

use std::{fs, path::{Path, PathBuf}};

use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{fmt_open_err, path_str};

pub const DEFAULT_MAX_VALUE: u64 = 235976;
pub const DEFAULT_ROUNDS: usize = 10;

/// Query sizes `start..stop` stepped by `step`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct QueryRange {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl QueryRange {
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..self.stop).step_by(self.step.max(1))
    }

    fn validate(&self) -> Result<(), String> {
        if self.step == 0 {
            return Err("query range step must be positive".to_string());
        }
        if self.start >= self.stop {
            return Err(format!(
                "query range {}..{} is empty", self.start, self.stop
            ));
        }
        Ok(())
    }
}

impl From<[usize; 3]> for QueryRange {
    fn from([start, stop, step]: [usize; 3]) -> Self {
        Self { start, stop, step }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ChartConfig {
    pub out_file: PathBuf,
    /// Inches
    pub width: f64,
    /// Inches
    pub height: f64,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SearchConfig {
    pub query_range: QueryRange,
    pub database_size: usize,
    pub values_file: Option<PathBuf>,
    pub max_value: u64,
    pub rounds: usize,
    pub seed: Option<u64>,
    pub verify: bool,
    pub progress: bool,
    /// Leave input copying out of time and memory readings
    pub algorithm_only: bool,
    pub chart: ChartConfig,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SimConfig {
    pub query_range: QueryRange,
    pub database_size: usize,
    pub chart: ChartConfig,
}

/// Benchmark binary search, merge and hash table intersection.
#[derive(Parser, Deserialize, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// TOML file providing defaults for any of the options below
    #[arg(long)]
    #[serde(skip)]
    pub config: Option<PathBuf>,
    /// Query size parameters (start stop step)
    #[arg(long, alias = "query_range", num_args = 3,
        value_names = ["START", "STOP", "STEP"])]
    pub query_range: Option<Vec<usize>>,
    /// Database size
    #[arg(long, alias = "database_size")]
    pub database_size: Option<usize>,
    /// A gzipped text file containing values to use for database and queries
    #[arg(long, alias = "values_file")]
    pub values_file: Option<PathBuf>,
    /// Maximum value when searching integers [default: 235976]
    #[arg(long, alias = "max_value")]
    pub max_value: Option<u64>,
    /// Number of rounds to run each algorithm [default: 10]
    #[arg(long)]
    pub rounds: Option<usize>,
    /// Seed for data generation, random if omitted
    #[arg(long)]
    pub seed: Option<u64>,
    /// Check that binary search and hash table counts agree every round
    #[arg(long)]
    pub verify: bool,
    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
    /// Measure the algorithm alone, copying inputs before timing starts
    #[arg(long, alias = "algorithm_only")]
    pub algorithm_only: bool,
    /// File to save plot to (.svg)
    #[arg(long, alias = "out_file")]
    pub out_file: Option<PathBuf>,
    /// Width of plot in inches [default: 8]
    #[arg(long)]
    pub width: Option<f64>,
    /// Height of plot in inches [default: 5]
    #[arg(long)]
    pub height: Option<f64>,
}

/// Plot the modeled runtime of binary search and merge intersection.
#[derive(Parser, Deserialize, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[serde(default, deny_unknown_fields)]
pub struct SimOptions {
    /// TOML file providing defaults for any of the options below
    #[arg(long)]
    #[serde(skip)]
    pub config: Option<PathBuf>,
    /// Query size parameters (start stop step)
    #[arg(long, alias = "query_range", num_args = 3,
        value_names = ["START", "STOP", "STEP"])]
    pub query_range: Option<Vec<usize>>,
    /// Database size
    #[arg(long, alias = "database_size")]
    pub database_size: Option<usize>,
    /// Output file (.svg)
    #[arg(long, alias = "out_file")]
    pub out_file: Option<PathBuf>,
    /// Width of plot in inches [default: 3]
    #[arg(long)]
    pub width: Option<f64>,
    /// Height of plot in inches [default: 3]
    #[arg(long)]
    pub height: Option<f64>,
}

impl SearchOptions {
    /// Loads the `--config` file if any and merges it under these options.
    pub fn resolve(self) -> Result<SearchConfig, String> {
        let file: SearchOptions = load_file(self.config.as_deref())?;
        self.merge(file)
    }

    pub fn merge(self, file: SearchOptions) -> Result<SearchConfig, String> {
        let config = SearchConfig {
            query_range: query_range(self.query_range.or(file.query_range))?,
            database_size: required(self.database_size.or(file.database_size), "database_size")?,
            values_file: self.values_file.or(file.values_file),
            max_value: self.max_value.or(file.max_value).unwrap_or(DEFAULT_MAX_VALUE),
            rounds: self.rounds.or(file.rounds).unwrap_or(DEFAULT_ROUNDS),
            seed: self.seed.or(file.seed),
            verify: self.verify || file.verify,
            progress: !(self.quiet || file.quiet),
            algorithm_only: self.algorithm_only || file.algorithm_only,
            chart: chart(
                self.out_file.or(file.out_file),
                self.width.or(file.width).unwrap_or(8.0),
                self.height.or(file.height).unwrap_or(5.0),
            )?,
        };

        if config.rounds == 0 {
            return Err("rounds must be positive".to_string());
        }
        config.query_range.validate()?;
        Ok(config)
    }
}

impl SimOptions {
    /// Loads the `--config` file if any and merges it under these options.
    pub fn resolve(self) -> Result<SimConfig, String> {
        let file: SimOptions = load_file(self.config.as_deref())?;
        self.merge(file)
    }

    pub fn merge(self, file: SimOptions) -> Result<SimConfig, String> {
        let config = SimConfig {
            query_range: query_range(self.query_range.or(file.query_range))?,
            database_size: required(self.database_size.or(file.database_size), "database_size")?,
            chart: chart(
                self.out_file.or(file.out_file),
                self.width.or(file.width).unwrap_or(3.0),
                self.height.or(file.height).unwrap_or(3.0),
            )?,
        };

        config.query_range.validate()?;
        // The cost model takes logarithms of both sizes.
        if config.query_range.start == 0 {
            return Err("query sizes must be positive".to_string());
        }
        if config.database_size == 0 {
            return Err("database_size must be positive".to_string());
        }
        Ok(config)
    }
}

fn load_file<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, String> {
    let Some(path) = path else {
        return Ok(T::default());
    };

    let config_toml = fs::read_to_string(path)
        .map_err(|e| fmt_open_err(e, path))?;

    toml::from_str(&config_toml)
        .map_err(|e| format!(
            "invalid toml file {}: {}",
            path_str(path), e
        ))
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing required option {}", name))
}

fn query_range(values: Option<Vec<usize>>) -> Result<QueryRange, String> {
    let values = required(values, "query_range")?;
    let values: [usize; 3] = values.try_into()
        .map_err(|v: Vec<usize>| format!(
            "query_range takes 3 values (start stop step), got {}", v.len()
        ))?;
    Ok(values.into())
}

fn chart(out_file: Option<PathBuf>, width: f64, height: f64) -> Result<ChartConfig, String> {
    let out_file = required(out_file, "out_file")?;
    for (name, value) in [("width", width), ("height", height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("{} must be a positive number of inches, got {}", name, value));
        }
    }
    Ok(ChartConfig { out_file, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_search(args: &[&str]) -> SearchOptions {
        SearchOptions::try_parse_from(
            std::iter::once("search").chain(args.iter().copied())
        ).unwrap()
    }

    #[test]
    fn search_defaults() {
        let config = parse_search(&[
            "--query-range", "100", "1000", "100",
            "--database-size", "5000",
            "--out-file", "out.svg",
        ]).merge(SearchOptions::default()).unwrap();

        assert_eq!(config.query_range, QueryRange { start: 100, stop: 1000, step: 100 });
        assert_eq!(config.database_size, 5000);
        assert_eq!(config.values_file, None);
        assert_eq!(config.max_value, DEFAULT_MAX_VALUE);
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert_eq!(config.seed, None);
        assert!(!config.verify);
        assert!(config.progress);
        assert!(!config.algorithm_only);
        assert_eq!(config.chart, ChartConfig {
            out_file: PathBuf::from("out.svg"), width: 8.0, height: 5.0,
        });
    }

    #[test]
    fn underscore_aliases() {
        let config = parse_search(&[
            "--query_range", "1", "10", "3",
            "--database_size", "7",
            "--out_file", "plot.svg",
            "--max_value", "99",
            "--algorithm_only",
        ]).merge(SearchOptions::default()).unwrap();

        assert_eq!(config.query_range.sizes().collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(config.max_value, 99);
        assert!(config.algorithm_only);
    }

    #[test]
    fn flags_override_file() {
        let file: SearchOptions = toml::from_str(r#"
            query_range = [10, 20, 5]
            database_size = 100
            rounds = 3
            seed = 42
            verify = true
            out_file = "file.svg"
            width = 4.5
        "#).unwrap();

        let config = parse_search(&["--rounds", "7", "--out-file", "cli.svg"])
            .merge(file)
            .unwrap();

        assert_eq!(config.query_range, QueryRange { start: 10, stop: 20, step: 5 });
        assert_eq!(config.database_size, 100);
        assert_eq!(config.rounds, 7);
        assert_eq!(config.seed, Some(42));
        assert!(config.verify);
        assert_eq!(config.chart.out_file, PathBuf::from("cli.svg"));
        assert_eq!(config.chart.width, 4.5);
        assert_eq!(config.chart.height, 5.0);
    }

    #[test]
    fn unknown_file_field() {
        let file: Result<SearchOptions, _> = toml::from_str("rouds = 3");
        assert!(file.is_err());
    }

    #[test]
    fn missing_required() {
        let err = parse_search(&["--database-size", "5", "--out-file", "a.svg"])
            .merge(SearchOptions::default())
            .unwrap_err();
        assert!(err.contains("query_range"));

        let err = parse_search(&["--query-range", "1", "2", "1", "--database-size", "5"])
            .merge(SearchOptions::default())
            .unwrap_err();
        assert!(err.contains("out_file"));
    }

    #[test]
    fn invalid_values() {
        let base = ["--database-size", "5", "--out-file", "a.svg"];
        let with = |extra: &[&str]| {
            let args: Vec<&str> = base.iter().chain(extra).copied().collect();
            parse_search(&args).merge(SearchOptions::default())
        };

        assert!(with(&["--query-range", "1", "10", "0"]).is_err());
        assert!(with(&["--query-range", "10", "10", "1"]).is_err());
        assert!(with(&["--query-range", "1", "10", "1", "--rounds", "0"]).is_err());
        assert!(with(&["--query-range", "1", "10", "1", "--width", "0"]).is_err());
        assert!(with(&["--query-range", "1", "10", "1"]).is_ok());
    }

    #[test]
    fn wrong_query_range_arity() {
        let result = SearchOptions::try_parse_from([
            "search", "--query-range", "1", "2", "--database-size", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn sim_requires_positive_sizes() {
        let parse = |args: &[&str]| SimOptions::try_parse_from(
            std::iter::once("sim").chain(args.iter().copied())
        ).unwrap().merge(SimOptions::default());

        let config = parse(&[
            "--query-range", "1", "100", "10", "--database-size", "50",
            "--out-file", "sim.svg",
        ]).unwrap();
        assert_eq!(config.chart.width, 3.0);
        assert_eq!(config.chart.height, 3.0);

        assert!(parse(&[
            "--query-range", "0", "100", "10", "--database-size", "50",
            "--out-file", "sim.svg",
        ]).is_err());
        assert!(parse(&[
            "--query-range", "1", "100", "10", "--database-size", "0",
            "--out-file", "sim.svg",
        ]).is_err());
    }
}
