use benchmark::{
    config::{SearchConfig, SearchOptions},
    corpus, path_str,
    format::format_time,
    generators::{self, CorpusSample, UniformInts},
    harness::{self, Metric, Region, SweepResults, SweepSettings},
    memory::{self, TrackingAllocator},
    plot,
};
use clap::Parser;
use colored::*;

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn main() {
    let cli = SearchOptions::parse();

    if cfg!(debug_assertions) {
        println!("{}", "warning: running in debug mode".yellow().bold());
    }

    if let Err(e) = run(cli) {
        let msg = format!("error: {}", e);
        println!("{}", msg.red().bold());
        std::process::exit(1);
    }
    println!("{}", "Done".green().bold());
}

fn run(cli: SearchOptions) -> Result<(), String> {
    let config = cli.resolve()?;

    if !memory::is_tracking() {
        println!("{}", "warning: allocation tracking inactive, memory reads 0".yellow());
    }

    let results = run_benchmark(&config)?;

    for summary in results.summaries()? {
        println!("{}", summary);
        if summary.metric == Metric::Time {
            let readable = format!("  {} .. {}", format_time(summary.min), format_time(summary.max));
            println!("{}", readable.dimmed());
        }
    }

    plot::plot_sweep(&results, &config.chart)?;
    println!("{} {}", "Wrote".green().bold(), path_str(&config.chart.out_file));

    Ok(())
}

fn run_benchmark(config: &SearchConfig) -> Result<SweepResults, String> {
    let settings = SweepSettings {
        query_sizes: config.query_range.sizes().collect(),
        database_size: config.database_size,
        rounds: config.rounds,
        verify: config.verify,
        progress: config.progress,
        region: if config.algorithm_only { Region::AlgorithmOnly } else { Region::Call },
    };
    let mut rng = generators::seeded_rng(config.seed);

    let header = format!(
        "database size {}, {} query sizes, {} rounds",
        settings.database_size, settings.query_sizes.len(), settings.rounds
    );

    match &config.values_file {
        Some(path) => {
            println!("{} {}", "Loading".green().bold(), path_str(path));
            let corpus = CorpusSample::new(corpus::from_path(path)?);
            println!("{} values", corpus.len());

            println!("{} strings: {}", "Benchmarking".green().bold(), header);
            harness::run_sweep(&settings, &corpus, &mut rng)
        },
        None => {
            println!("{} integers up to {}: {}",
                "Benchmarking".green().bold(), config.max_value, header);
            let source = UniformInts { max_value: config.max_value };
            harness::run_sweep(&settings, &source, &mut rng)
        },
    }
}
