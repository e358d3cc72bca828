pub mod chart;
pub mod extrema;
pub mod format;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};
use crate::presenter::chart::ChartData;
use crate::presenter::extrema::select_extrema;
use crate::records::{ComparisonRecord, RecommendationRecord};

pub use extrema::Extrema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderModel {
    pub generated_at: DateTime<Utc>,
    pub cards: Vec<SummaryCard>,
    pub rows: Vec<RenderRow>,
    pub chart: ChartData,
    pub comparison: Option<ComparisonView>,
}

impl RenderModel {
    pub fn card(&self, kind: CardKind) -> Option<&SummaryCard> {
        self.cards.iter().find(|c| c.kind == kind)
    }

    pub fn best_overall(&self) -> &RenderRow {
        // present() never builds a model without rows
        &self.rows[0]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    BestOverall,
    LowestCost,
    LowestCo2,
}

impl CardKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::BestOverall => "Best Overall",
            Self::LowestCost => "Lowest Cost",
            Self::LowestCo2 => "Lowest CO2",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryCard {
    pub kind: CardKind,
    pub rank: usize,
    pub material_name: String,
    pub material_type: String,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderRow {
    pub rank: usize,
    pub material_name: String,
    pub material_type: String,
    pub suitability: String,
    pub cost_inr: String,
    pub co2_kg: String,
    pub eco_score: String,
    pub over_capacity: bool,
}

impl RenderRow {
    fn from_record(rank: usize, record: &RecommendationRecord) -> Self {
        Self {
            rank,
            material_name: record.material_name.clone(),
            material_type: record.material_type.clone(),
            suitability: format::suitability_percent(record.suitability_score),
            cost_inr: format::cost_inr(record.predicted_cost_inr),
            co2_kg: format::co2_kg(record.predicted_co2_kg),
            eco_score: format::eco_score(record.eco_score),
            over_capacity: record.can_handle_weight == Some(false),
        }
    }

    pub fn line(&self) -> String {
        format!(
            "#{} {} [{}] suitability {} | cost ₹{} | CO2 {} kg | eco {}",
            self.rank,
            self.material_name,
            self.material_type,
            self.suitability,
            self.cost_inr,
            self.co2_kg,
            self.eco_score
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonView {
    pub current_material: String,
    pub recommended_material: String,
    pub current_cost_inr: String,
    pub recommended_cost_inr: String,
    pub current_co2_kg: String,
    pub recommended_co2_kg: String,
    pub cost_difference_inr: String,
    pub co2_savings_kg: String,
    pub co2_reduction_percent: String,
    pub recommended_eco_score: String,
}

impl From<&ComparisonRecord> for ComparisonView {
    fn from(record: &ComparisonRecord) -> Self {
        Self {
            current_material: record.current_material.clone(),
            recommended_material: record.recommended_material.clone(),
            current_cost_inr: format::cost_inr(record.current_cost_inr),
            recommended_cost_inr: format::cost_inr(record.recommended_cost_inr),
            current_co2_kg: format::co2_kg(record.current_co2_kg),
            recommended_co2_kg: format::co2_kg(record.recommended_co2_kg),
            cost_difference_inr: format::signed(record.cost_difference_inr, 2),
            co2_savings_kg: format::co2_kg(record.co2_savings_kg),
            co2_reduction_percent: format::percent_one_decimal(record.co2_reduction_percent),
            recommended_eco_score: format::eco_score(record.recommended_eco_score),
        }
    }
}

// `records` arrive in rank order; the first one is the best overall pick.
pub fn present(
    records: &[RecommendationRecord],
    comparison: Option<&ComparisonRecord>,
) -> DashResult<RenderModel> {
    let extrema = select_extrema(records).ok_or(DashError::EmptyInput)?;

    let rows: Vec<RenderRow> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| RenderRow::from_record(idx + 1, record))
        .collect();

    Ok(RenderModel {
        generated_at: Utc::now(),
        cards: build_cards(records, &extrema),
        rows,
        chart: ChartData::from_records(records),
        comparison: comparison.map(ComparisonView::from),
    })
}

fn build_cards(records: &[RecommendationRecord], extrema: &Extrema) -> Vec<SummaryCard> {
    let card = |kind: CardKind, idx: usize| {
        let record = &records[idx];
        let headline = match kind {
            CardKind::BestOverall => format!(
                "{} suitability",
                format::suitability_percent(record.suitability_score)
            ),
            CardKind::LowestCost => format!("₹{}", format::cost_inr(record.predicted_cost_inr)),
            CardKind::LowestCo2 => format!("{} kg CO2", format::co2_kg(record.predicted_co2_kg)),
        };
        SummaryCard {
            kind,
            rank: idx + 1,
            material_name: record.material_name.clone(),
            material_type: record.material_type.clone(),
            headline,
        }
    };

    vec![
        card(CardKind::BestOverall, extrema.best_overall),
        card(CardKind::LowestCost, extrema.lowest_cost),
        card(CardKind::LowestCo2, extrema.lowest_co2),
    ]
}
