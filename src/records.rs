use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub material_name: String,
    pub material_type: String,
    pub suitability_score: f64,
    pub predicted_cost_inr: f64,
    pub predicted_co2_kg: f64,
    pub eco_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biodegradability_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_handle_weight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_capacity_kg: Option<f64>,
}

impl RecommendationRecord {
    pub fn new(
        material_name: impl Into<String>,
        material_type: impl Into<String>,
        suitability_score: f64,
        predicted_cost_inr: f64,
        predicted_co2_kg: f64,
        eco_score: f64,
    ) -> Self {
        Self {
            material_name: material_name.into(),
            material_type: material_type.into(),
            suitability_score,
            predicted_cost_inr,
            predicted_co2_kg,
            eco_score,
            material_id: None,
            biodegradability_score: None,
            can_handle_weight: None,
            weight_capacity_kg: None,
        }
    }

    pub fn with_capacity(mut self, weight_capacity_kg: f64, can_handle_weight: bool) -> Self {
        self.weight_capacity_kg = Some(weight_capacity_kg);
        self.can_handle_weight = Some(can_handle_weight);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRecord {
    pub current_material: String,
    pub recommended_material: String,
    pub current_cost_inr: f64,
    pub recommended_cost_inr: f64,
    pub current_co2_kg: f64,
    pub recommended_co2_kg: f64,
    pub cost_difference_inr: f64,
    pub co2_savings_kg: f64,
    pub co2_reduction_percent: f64,
    pub recommended_eco_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDetails {
    pub material_id: i64,
    pub material_name: String,
    pub material_type: String,
    pub strength_score: f64,
    pub weight_capacity_kg: f64,
    pub biodegradability_score: f64,
    pub co2_emission_kg: f64,
    pub recyclability_percent: f64,
    pub cost_per_kg: f64,
    pub moisture_resistance: f64,
    pub eco_score: f64,
    pub co2_impact_index: f64,
    pub cost_efficiency_index: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub models_loaded: BTreeMap<String, bool>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Fragility {
    #[default]
    Auto,
    Low,
    Medium,
    High,
}

impl Fragility {
    pub const ALL: [Fragility; 4] = [
        Fragility::Auto,
        Fragility::Low,
        Fragility::Medium,
        Fragility::High,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Fragility {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown fragility level: {0} (expected auto, low, medium or high)")]
pub struct FragilityParseError(pub String);

impl FromStr for Fragility {
    type Err = FragilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_slug() == normalized)
            .ok_or_else(|| FragilityParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopN {
    Three,
    #[default]
    Five,
    Ten,
}

impl TopN {
    pub const ALL: [TopN; 3] = [TopN::Three, TopN::Five, TopN::Ten];

    pub fn get(self) -> u32 {
        match self {
            Self::Three => 3,
            Self::Five => 5,
            Self::Ten => 10,
        }
    }
}

impl Display for TopN {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Debug, Error)]
#[error("top_n must be one of 3, 5 or 10 (got {0})")]
pub struct TopNError(pub u32);

impl TryFrom<u32> for TopN {
    type Error = TopNError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.get() == value)
            .ok_or(TopNError(value))
    }
}

impl FromStr for TopN {
    type Err = TopNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(|_| TopNError(0))?;
        Self::try_from(value)
    }
}

impl Serialize for TopN {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}

impl<'de> Deserialize<'de> for TopN {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
