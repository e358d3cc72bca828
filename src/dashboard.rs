use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{DashError, DashResult};
use crate::notice::{Notice, NoticeSink};
use crate::presenter::chart::ChartHandle;
use crate::presenter::{present, ComparisonView, RenderModel};
use crate::records::{ComparisonRecord, HealthStatus, MaterialDetails};
use crate::source::{CompareRequest, RecommendRequest, RecommendationSource};

pub const CATEGORIES_UNAVAILABLE: &str = "Could not load categories. Continuing with an empty list.";
pub const MATERIALS_UNAVAILABLE: &str = "Could not load materials. Continuing with an empty list.";
pub const RECOMMEND_UNAVAILABLE: &str = "Could not fetch recommendations. Please try again.";
pub const COMPARE_UNAVAILABLE: &str = "Could not fetch the comparison. Showing recommendations only.";
pub const DETAILS_UNAVAILABLE: &str = "Could not load material details. Please try again.";
pub const HEALTH_UNAVAILABLE: &str = "Backend health check failed.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selectors {
    pub categories: Vec<String>,
    pub materials: Vec<String>,
}

pub struct Dashboard {
    source: Arc<dyn RecommendationSource>,
    sink: Box<dyn NoticeSink>,
    chart_width: usize,
    selectors: Selectors,
    current: Option<RenderModel>,
    chart: Option<ChartHandle>,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn RecommendationSource>,
        sink: Box<dyn NoticeSink>,
        chart_width: usize,
    ) -> Self {
        Self {
            source,
            sink,
            chart_width,
            selectors: Selectors::default(),
            current: None,
            chart: None,
        }
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    pub fn current(&self) -> Option<&RenderModel> {
        self.current.as_ref()
    }

    pub fn chart(&self) -> Option<&ChartHandle> {
        self.chart.as_ref()
    }

    pub async fn load_selectors(&mut self) -> &Selectors {
        self.load_categories().await;
        self.load_materials().await;
        info!(
            categories = self.selectors.categories.len(),
            materials = self.selectors.materials.len(),
            "selectors loaded"
        );
        &self.selectors
    }

    // A failing source leaves its selector empty.
    pub async fn load_categories(&mut self) -> &[String] {
        self.selectors.categories = match self.source.categories().await {
            Ok(categories) => categories,
            Err(error) => {
                self.report(&error, CATEGORIES_UNAVAILABLE);
                Vec::new()
            }
        };
        &self.selectors.categories
    }

    pub async fn load_materials(&mut self) -> &[String] {
        self.selectors.materials = match self.source.materials().await {
            Ok(materials) => materials,
            Err(error) => {
                self.report(&error, MATERIALS_UNAVAILABLE);
                Vec::new()
            }
        };
        &self.selectors.materials
    }

    /// Returns `None` after emitting a notice when there is nothing to show.
    pub async fn recommend(
        &mut self,
        request: &RecommendRequest,
        current_material: Option<&str>,
    ) -> Option<&RenderModel> {
        self.current = None;
        let previous_chart = self.chart.take();

        match self.build_model(request, current_material).await {
            Some(model) => {
                self.chart = Some(ChartHandle::redraw(
                    previous_chart,
                    &model.chart,
                    self.chart_width,
                ));
                self.current = Some(model);
                self.current.as_ref()
            }
            None => {
                if let Some(chart) = previous_chart {
                    chart.destroy();
                }
                None
            }
        }
    }

    pub async fn compare(&mut self, request: &CompareRequest) -> Option<ComparisonView> {
        match self.fetch_comparison(request).await {
            Ok(record) => Some(ComparisonView::from(&record)),
            Err(error) => {
                self.report(&error, COMPARE_UNAVAILABLE);
                None
            }
        }
    }

    pub async fn material_details(&mut self, name: &str) -> Option<MaterialDetails> {
        let result = if name.trim().is_empty() {
            Err(DashError::invalid("material name is required"))
        } else {
            self.source.material_details(name.trim()).await
        };
        match result {
            Ok(details) => Some(details),
            Err(error) => {
                self.report(&error, DETAILS_UNAVAILABLE);
                None
            }
        }
    }

    pub async fn health(&mut self) -> Option<HealthStatus> {
        match self.source.health().await {
            Ok(status) => Some(status),
            Err(error) => {
                self.report(&error, HEALTH_UNAVAILABLE);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }

    async fn build_model(
        &self,
        request: &RecommendRequest,
        current_material: Option<&str>,
    ) -> Option<RenderModel> {
        if let Err(error) = request.validate() {
            self.report(&error, RECOMMEND_UNAVAILABLE);
            return None;
        }

        let records = match self.source.recommend(request).await {
            Ok(records) => records,
            Err(error) => {
                self.report(&error, RECOMMEND_UNAVAILABLE);
                return None;
            }
        };
        if let Some(top) = records.first() {
            info!(
                category = %request.category,
                count = records.len(),
                top = %top.material_name,
                "recommendations received"
            );
        }

        let mut comparison = None;
        if let Some(material) = current_material.map(str::trim).filter(|m| !m.is_empty()) {
            if !records.is_empty() {
                let compare = CompareRequest {
                    category: request.category.clone(),
                    weight: request.weight,
                    current_material: material.to_string(),
                };
                match self.fetch_comparison(&compare).await {
                    Ok(record) => comparison = Some(record),
                    Err(error) => self.report(&error, COMPARE_UNAVAILABLE),
                }
            }
        }

        match present(&records, comparison.as_ref()) {
            Ok(model) => Some(model),
            Err(error) => {
                self.report(&error, RECOMMEND_UNAVAILABLE);
                None
            }
        }
    }

    async fn fetch_comparison(&self, request: &CompareRequest) -> DashResult<ComparisonRecord> {
        request.validate()?;
        let record = self.source.compare(request).await?;
        info!(
            current = %record.current_material,
            recommended = %record.recommended_material,
            reduction = record.co2_reduction_percent,
            "comparison received"
        );
        Ok(record)
    }

    fn report(&self, error: &DashError, generic: &str) {
        warn!("{error}");
        self.sink.notify(&Notice::from_error(error, generic));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::notice::{CollectingSink, NoticeKind};
    use crate::records::RecommendationRecord;

    #[derive(Default)]
    struct FakeSource {
        categories: Option<Vec<String>>,
        materials: Option<Vec<String>>,
        batches: Mutex<Vec<DashResult<Vec<RecommendationRecord>>>>,
        comparison: Option<ComparisonRecord>,
    }

    fn offline(endpoint: &str) -> DashError {
        DashError::upstream(endpoint, "connection refused")
    }

    #[async_trait]
    impl RecommendationSource for FakeSource {
        async fn health(&self) -> DashResult<HealthStatus> {
            Err(offline("health"))
        }

        async fn categories(&self) -> DashResult<Vec<String>> {
            self.categories.clone().ok_or_else(|| offline("categories"))
        }

        async fn materials(&self) -> DashResult<Vec<String>> {
            self.materials.clone().ok_or_else(|| offline("materials"))
        }

        async fn material_details(&self, _name: &str) -> DashResult<MaterialDetails> {
            Err(offline("material"))
        }

        async fn recommend(&self, _request: &RecommendRequest) -> DashResult<Vec<RecommendationRecord>> {
            let mut batches = self.batches.lock().expect("lock");
            if batches.is_empty() {
                return Err(offline("recommend"));
            }
            batches.remove(0)
        }

        async fn compare(&self, _request: &CompareRequest) -> DashResult<ComparisonRecord> {
            self.comparison.clone().ok_or_else(|| offline("compare"))
        }
    }

    fn records() -> Vec<RecommendationRecord> {
        vec![
            RecommendationRecord::new("Bamboo", "Plant", 0.9, 10.0, 0.5, 0.8),
            RecommendationRecord::new("Plastic", "Polymer", 0.3, 5.0, 2.0, 0.2),
        ]
    }

    fn comparison() -> ComparisonRecord {
        ComparisonRecord {
            current_material: "Plastic".to_string(),
            recommended_material: "Bamboo".to_string(),
            current_cost_inr: 15.0,
            recommended_cost_inr: 10.0,
            current_co2_kg: 2.25,
            recommended_co2_kg: 0.5,
            cost_difference_inr: 5.0,
            co2_savings_kg: 1.75,
            co2_reduction_percent: 77.8,
            recommended_eco_score: 0.8,
        }
    }

    fn dashboard(source: FakeSource) -> (Dashboard, CollectingSink) {
        let sink = CollectingSink::new();
        let dash = Dashboard::new(Arc::new(source), Box::new(sink.clone()), 30);
        (dash, sink)
    }

    #[tokio::test]
    async fn selector_failure_falls_back_to_empty() {
        let (mut dash, sink) = dashboard(FakeSource {
            categories: None,
            materials: Some(vec!["Bamboo".to_string()]),
            ..FakeSource::default()
        });
        let selectors = dash.load_selectors().await.clone();
        assert!(selectors.categories.is_empty());
        assert_eq!(selectors.materials, vec!["Bamboo"]);
        assert_eq!(sink.kinds(), vec![NoticeKind::UpstreamFailure]);
        assert_eq!(sink.notices()[0].body, CATEGORIES_UNAVAILABLE);
    }

    #[tokio::test]
    async fn single_selector_fetch_ignores_the_other() {
        let (mut dash, sink) = dashboard(FakeSource {
            categories: Some(vec!["Food".to_string()]),
            materials: None,
            ..FakeSource::default()
        });
        assert_eq!(dash.load_categories().await, ["Food".to_string()]);
        assert!(sink.notices().is_empty());
        assert!(dash.selectors().materials.is_empty());

        assert!(dash.load_materials().await.is_empty());
        assert_eq!(sink.notices()[0].body, MATERIALS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn recommend_builds_model_and_chart() {
        let (mut dash, sink) = dashboard(FakeSource {
            batches: Mutex::new(vec![Ok(records())]),
            comparison: Some(comparison()),
            ..FakeSource::default()
        });
        let model = dash
            .recommend(&RecommendRequest::new("Food", 1.0), Some("Plastic"))
            .await
            .expect("model")
            .clone();
        assert_eq!(model.rows.len(), 2);
        assert!(model.comparison.is_some());
        assert_eq!(dash.chart().map(ChartHandle::generation), Some(1));
        assert!(sink.notices().is_empty());
    }

    #[tokio::test]
    async fn empty_result_clears_previous_state() {
        let (mut dash, sink) = dashboard(FakeSource {
            batches: Mutex::new(vec![Ok(records()), Ok(Vec::new())]),
            ..FakeSource::default()
        });
        let request = RecommendRequest::new("Food", 1.0);
        assert!(dash.recommend(&request, None).await.is_some());
        assert!(dash.recommend(&request, None).await.is_none());
        assert!(dash.current().is_none());
        assert!(dash.chart().is_none());
        assert_eq!(sink.kinds(), vec![NoticeKind::EmptyResult]);
    }

    #[tokio::test]
    async fn later_result_replaces_earlier_one() {
        let mut second = records();
        second.reverse();
        let (mut dash, _sink) = dashboard(FakeSource {
            batches: Mutex::new(vec![Ok(records()), Ok(second)]),
            ..FakeSource::default()
        });
        let request = RecommendRequest::new("Food", 1.0);
        dash.recommend(&request, None).await;
        dash.recommend(&request, None).await;
        let current = dash.current().expect("model");
        assert_eq!(current.best_overall().material_name, "Plastic");
        assert_eq!(dash.chart().map(ChartHandle::generation), Some(2));
    }

    #[tokio::test]
    async fn upstream_failure_is_a_single_notice() {
        let (mut dash, sink) = dashboard(FakeSource::default());
        assert!(dash
            .recommend(&RecommendRequest::new("Food", 1.0), None)
            .await
            .is_none());
        let notices = sink.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].body, RECOMMEND_UNAVAILABLE);
    }

    #[tokio::test]
    async fn comparison_failure_keeps_recommendations() {
        let (mut dash, sink) = dashboard(FakeSource {
            batches: Mutex::new(vec![Ok(records())]),
            comparison: None,
            ..FakeSource::default()
        });
        let model = dash
            .recommend(&RecommendRequest::new("Food", 1.0), Some("Glass"))
            .await
            .expect("model");
        assert!(model.comparison.is_none());
        assert_eq!(sink.notices()[0].body, COMPARE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_source() {
        let (mut dash, sink) = dashboard(FakeSource {
            batches: Mutex::new(vec![Ok(records())]),
            ..FakeSource::default()
        });
        assert!(dash
            .recommend(&RecommendRequest::new("Food", -2.0), None)
            .await
            .is_none());
        assert_eq!(sink.kinds(), vec![NoticeKind::InvalidRequest]);
        assert!(dash
            .recommend(&RecommendRequest::new("Food", 2.0), None)
            .await
            .is_some());
    }
}
