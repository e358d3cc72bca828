pub mod envelope;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};
use crate::records::{
    ComparisonRecord, Fragility, HealthStatus, MaterialDetails, RecommendationRecord, TopN,
};

/// Heaviest product the backend accepts, in kg.
pub const MAX_WEIGHT_KG: f64 = 500.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendRequest {
    pub category: String,
    pub weight: f64,
    pub top_n: TopN,
    pub fragility_override: Fragility,
    pub budget_limit: Option<f64>,
}

impl RecommendRequest {
    pub fn new(category: impl Into<String>, weight: f64) -> Self {
        Self {
            category: category.into(),
            weight,
            top_n: TopN::default(),
            fragility_override: Fragility::default(),
            budget_limit: None,
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        validate_category(&self.category)?;
        validate_weight(self.weight)?;
        if self.weight > MAX_WEIGHT_KG {
            return Err(DashError::invalid(format!(
                "weight exceeds maximum limit ({MAX_WEIGHT_KG:.0} kg)"
            )));
        }
        if let Some(budget) = self.budget_limit {
            if !budget.is_finite() || budget <= 0.0 {
                return Err(DashError::invalid("budget_limit must be a positive number"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareRequest {
    pub category: String,
    pub weight: f64,
    pub current_material: String,
}

impl CompareRequest {
    pub fn validate(&self) -> DashResult<()> {
        validate_category(&self.category)?;
        validate_weight(self.weight)?;
        if self.current_material.trim().is_empty() {
            return Err(DashError::invalid("current_material is required"));
        }
        Ok(())
    }
}

fn validate_category(category: &str) -> DashResult<()> {
    if category.trim().is_empty() {
        return Err(DashError::invalid("category is required"));
    }
    Ok(())
}

fn validate_weight(weight: f64) -> DashResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DashError::invalid("weight must be a positive number"));
    }
    Ok(())
}

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn health(&self) -> DashResult<HealthStatus>;
    async fn categories(&self) -> DashResult<Vec<String>>;
    async fn materials(&self) -> DashResult<Vec<String>>;
    async fn material_details(&self, name: &str) -> DashResult<MaterialDetails>;
    async fn recommend(&self, request: &RecommendRequest) -> DashResult<Vec<RecommendationRecord>>;
    async fn compare(&self, request: &CompareRequest) -> DashResult<ComparisonRecord>;
}
