//! SVG charts of sweep results and of the cost model.

use std::ops::Range;

use plotters::{coord::Shift, prelude::*};
use setsearch::cost::CostModel;

use crate::{
    config::ChartConfig,
    format::{format_si, format_size},
    harness::SweepResults,
    path_str,
};

/// Pixels per inch of chart dimensions.
pub const DPI: f64 = 100.0;

pub fn pixels(inches: f64) -> u32 {
    (inches * DPI).round().max(1.0) as u32
}

/// A named line of y values, one per x value.
pub struct Line<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

struct Panel<'a> {
    caption: Option<String>,
    x_desc: &'a str,
    y_desc: &'a str,
    x_labels: bool,
    legend: bool,
}

/// Time on top, memory below, both against query size.
pub fn plot_sweep(results: &SweepResults, chart: &ChartConfig) -> Result<(), String> {
    let root = open(chart)?;
    let areas = root.split_evenly((2, 1));

    let times: Vec<Line> = results.series.iter()
        .map(|s| Line { label: s.algorithm.label(), values: &s.times })
        .collect();
    let bytes: Vec<Line> = results.series.iter()
        .map(|s| Line { label: s.algorithm.label(), values: &s.bytes })
        .collect();

    draw_panel(&areas[0], &results.query_sizes, &times, Panel {
        caption: Some(format!(
            "Search algorithms (database size: {})", results.database_size
        )),
        x_desc: "",
        y_desc: "Time (ns)",
        x_labels: false,
        legend: true,
    })?;

    draw_panel(&areas[1], &results.query_sizes, &bytes, Panel {
        caption: None,
        x_desc: "Query size",
        y_desc: "Memory (bytes)",
        x_labels: true,
        legend: false,
    })?;

    present(&root, chart)
}

/// Modeled runtime of each cost model against query size.
pub fn plot_cost(
    query_sizes: &[usize],
    series: &[(CostModel, Vec<f64>)],
    chart: &ChartConfig) -> Result<(), String>
{
    let root = open(chart)?;

    let lines: Vec<Line> = series.iter()
        .map(|(model, values)| Line { label: model.label(), values })
        .collect();

    draw_panel(&root, query_sizes, &lines, Panel {
        caption: Some("Runtime vs. Query Size".to_string()),
        x_desc: "Query Size",
        y_desc: "Runtime",
        x_labels: true,
        legend: true,
    })?;

    present(&root, chart)
}

fn open(chart: &ChartConfig) -> Result<DrawingArea<SVGBackend<'_>, Shift>, String> {
    let is_svg = chart.out_file.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(format!(
            "unsupported chart format {}, expected an .svg file",
            path_str(&chart.out_file)
        ));
    }

    let size = (pixels(chart.width), pixels(chart.height));
    let root = SVGBackend::new(&chart.out_file, size).into_drawing_area();

    root.fill(&WHITE)
        .map_err(|e| format!(
            "unable to fill bg with white for {}: {}",
            path_str(&chart.out_file), e
        ))?;

    Ok(root)
}

fn present(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &ChartConfig) -> Result<(), String> {
    root.present()
        .map_err(|e| format!(
            "unable to write {}: {}",
            path_str(&chart.out_file), e
        ))
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    xs: &[usize],
    lines: &[Line],
    panel: Panel) -> Result<(), String>
{
    let x_range = axis_range(xs.iter().map(|&x| x as f64))
        .ok_or_else(|| "nothing to plot".to_string())?;
    let y_range = axis_range(lines.iter().flat_map(|l| l.values.iter().copied()))
        .ok_or_else(|| "nothing to plot".to_string())?;

    let name = panel.caption.as_deref().unwrap_or(panel.y_desc);

    let mut builder = ChartBuilder::on(area);
    if let Some(caption) = &panel.caption {
        builder.caption(caption, ("sans-serif", 18).into_font());
    }
    let mut chart = builder
        .x_label_area_size(if panel.x_labels { 40 } else { 10 })
        .y_label_area_size(60)
        .margin(10)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| format!(
            "unable to create chart for {}: {}", name, e
        ))?;

    for (i, line) in lines.iter().enumerate() {
        let color = Palette99::pick(i);

        chart
            .draw_series(LineSeries::new(
                xs.iter().zip(line.values).map(|(&x, &y)| (x as f64, y)),
                color.stroke_width(2),
            ))
            .map_err(|e| format!(
                "unable to draw series {} for {}: {}", line.label, name, e
            ))?
            .label(line.label)
            .legend(move |(x, y)| Rectangle::new(
                [(x, y - 5), (x + 10, y + 5)],
                color.filled()
            ));
    }

    let x_formatter = |x: &f64| if panel.x_labels {
        format_size(x.round().max(0.0) as usize)
    } else {
        String::new()
    };

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&|y| format_si(*y))
        .max_light_lines(4)
        .draw()
        .map_err(|e| format!(
            "unable to draw mesh {}: {}", name, e
        ))?;

    if panel.legend {
        chart.configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(|e| format!(
                "unable to draw series labels {}: {}", name, e
            ))?;
    }

    Ok(())
}

/// Range covering every finite value, padded by 5% and never empty.
fn axis_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    Some((lo - pad)..(hi + pad))
}
