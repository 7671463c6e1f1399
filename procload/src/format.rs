//! Fixed-point renderings used as header values.

/// CPU fraction with three decimals, e.g. `0.250`.
pub fn format_cpu(fraction: f64) -> String {
    format!("{fraction:.3}")
}

/// Memory fraction with two decimals, e.g. `0.60`.
pub fn format_mem(fraction: f64) -> String {
    format!("{fraction:.2}")
}
