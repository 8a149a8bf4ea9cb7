/// Axis label for sizes, e.g. `2500` -> `2.5k`.
pub fn format_size(size: usize) -> String {
    match size {
        0..=999 => size.to_string(),
        1_000..=999_999 => trim(size as f64 / 1e3) + "k",
        _ => trim(size as f64 / 1e6) + "M",
    }
}

/// Axis label for measurements, with an SI suffix above one thousand.
pub fn format_si(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 1e3 {
        trim(value)
    }
    else if magnitude < 1e6 {
        trim(value / 1e3) + "k"
    }
    else if magnitude < 1e9 {
        trim(value / 1e6) + "M"
    }
    else {
        trim(value / 1e9) + "G"
    }
}

pub fn format_time(nanos: f64) -> String {
    if nanos < 1e3 {
        format!("{:.0}ns", nanos)
    }
    else if nanos < 1e6 {
        format!("{:.2}µs", nanos / 1e3)
    }
    else if nanos < 1e9 {
        format!("{:.2}ms", nanos / 1e6)
    }
    else {
        format!("{:.2}s", nanos / 1e9)
    }
}

// At most one decimal place, none if it would be zero.
fn trim(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
