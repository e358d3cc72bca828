pub fn suitability_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn cost_inr(value: f64) -> String {
    format!("{value:.2}")
}

pub fn co2_kg(value: f64) -> String {
    format!("{value:.4}")
}

pub fn eco_score(value: f64) -> String {
    format!("{value:.3}")
}

pub fn percent_one_decimal(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed amount, e.g. `+12.40` / `-3.00`.
pub fn signed(value: f64, decimals: usize) -> String {
    format!("{value:+.decimals$}")
}
