use benchmark::{config::SimOptions, path_str, plot};
use clap::Parser;
use colored::*;
use setsearch::cost::{cost_series, CostModel};

fn main() {
    let cli = SimOptions::parse();

    if let Err(e) = run(cli) {
        let msg = format!("error: {}", e);
        println!("{}", msg.red().bold());
        std::process::exit(1);
    }
    println!("{}", "Done".green().bold());
}

fn run(cli: SimOptions) -> Result<(), String> {
    let config = cli.resolve()?;

    let query_sizes: Vec<usize> = config.query_range.sizes().collect();

    let series: Vec<(CostModel, Vec<f64>)> = CostModel::ALL.iter()
        .map(|&model| (
            model,
            cost_series(model, query_sizes.iter().copied(), config.database_size)
        ))
        .collect();

    for (model, values) in &series {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("{} Runtime min {} max {}", model.label(), min, max);
    }

    plot::plot_cost(&query_sizes, &series, &config.chart)?;
    println!("{} {}", "Wrote".green().bold(), path_str(&config.chart.out_file));

    Ok(())
}
