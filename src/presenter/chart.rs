use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::RecommendationRecord;

const BAR_GLYPH: char = '█';
const MIN_WIDTH: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub unit: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn from_records(records: &[RecommendationRecord]) -> Self {
        let labels = records.iter().map(|r| r.material_name.clone()).collect();
        let series = vec![
            ChartSeries {
                name: "Cost".to_string(),
                unit: "INR".to_string(),
                values: records.iter().map(|r| r.predicted_cost_inr).collect(),
            },
            ChartSeries {
                name: "CO2".to_string(),
                unit: "kg".to_string(),
                values: records.iter().map(|r| r.predicted_co2_kg).collect(),
            },
            ChartSeries {
                name: "Eco Score".to_string(),
                unit: String::new(),
                values: records.iter().map(|r| r.eco_score).collect(),
            },
        ];
        Self { labels, series }
    }
}

#[derive(Debug)]
pub struct ChartHandle {
    generation: u64,
    width: usize,
    canvas: String,
}

impl ChartHandle {
    pub fn draw(data: &ChartData, width: usize) -> Self {
        Self::draw_generation(data, width, 1)
    }

    /// Destroys `previous` (if any) and draws a fresh chart for `data`.
    pub fn redraw(previous: Option<ChartHandle>, data: &ChartData, width: usize) -> Self {
        let generation = match previous {
            Some(old) => old.destroy() + 1,
            None => 1,
        };
        Self::draw_generation(data, width, generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn destroy(self) -> u64 {
        debug!(generation = self.generation, "destroying chart");
        self.generation
    }

    fn draw_generation(data: &ChartData, width: usize, generation: u64) -> Self {
        let width = width.max(MIN_WIDTH);
        Self {
            generation,
            width,
            canvas: draw_canvas(data, width),
        }
    }
}

fn draw_canvas(data: &ChartData, width: usize) -> String {
    let label_width = data
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let mut sections = Vec::new();
    for series in &data.series {
        let mut lines = Vec::new();
        if series.unit.is_empty() {
            lines.push(series.name.clone());
        } else {
            lines.push(format!("{} ({})", series.name, series.unit));
        }
        let max = series
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        for (label, value) in data.labels.iter().zip(&series.values) {
            let bar = BAR_GLYPH.to_string().repeat(bar_length(*value, max, width));
            lines.push(format!(
                "  {label:<label_width$} │{bar} {}",
                trim_value(*value)
            ));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if !value.is_finite() || value <= 0.0 || max <= 0.0 {
        return 0;
    }
    let scaled = (value / max * width as f64).round() as usize;
    scaled.clamp(1, width)
}

fn trim_value(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
