use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::presenter::{ComparisonView, RenderModel, SummaryCard};
use crate::records::{HealthStatus, MaterialDetails};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_dashboard(model: &RenderModel) -> String {
    let mut out = String::new();
    out.push_str(&render_cards(&model.cards));
    out.push('\n');
    out.push_str(&render_results_table(model));
    if let Some(comparison) = &model.comparison {
        out.push_str("\n\n");
        out.push_str(&render_comparison_table(comparison));
    }
    out
}

pub fn render_cards(cards: &[SummaryCard]) -> String {
    let mut table = new_table();
    table.set_header(
        cards
            .iter()
            .map(|c| Cell::new(c.kind.title()).fg(Color::Green))
            .collect::<Vec<_>>(),
    );
    table.add_row(
        cards
            .iter()
            .map(|c| format!("{}\n{} · rank #{}\n{}", c.material_name, c.material_type, c.rank, c.headline))
            .collect::<Vec<_>>(),
    );
    table.to_string()
}

pub fn render_results_table(model: &RenderModel) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Material",
        "Type",
        "Suitability",
        "Cost (INR)",
        "CO2 (kg)",
        "Eco Score",
    ]);

    for row in &model.rows {
        let name = if row.over_capacity {
            Cell::new(format!("{} (over capacity)", row.material_name)).fg(Color::Yellow)
        } else {
            Cell::new(&row.material_name)
        };
        table.add_row(Row::from(vec![
            Cell::new(row.rank),
            name,
            Cell::new(&row.material_type),
            Cell::new(&row.suitability),
            Cell::new(&row.cost_inr),
            Cell::new(&row.co2_kg),
            Cell::new(&row.eco_score),
        ]));
    }
    table.to_string()
}

pub fn render_comparison_table(view: &ComparisonView) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Current", "Recommended"]);
    table.add_row(vec![
        "Material",
        view.current_material.as_str(),
        view.recommended_material.as_str(),
    ]);
    table.add_row(vec![
        "Cost (INR)",
        view.current_cost_inr.as_str(),
        view.recommended_cost_inr.as_str(),
    ]);
    table.add_row(vec![
        "CO2 (kg)",
        view.current_co2_kg.as_str(),
        view.recommended_co2_kg.as_str(),
    ]);
    table.add_row(vec!["Eco Score", "-", view.recommended_eco_score.as_str()]);

    format!(
        "{table}\nCO2 reduction: {} ({} kg saved)\nCost difference: ₹{}",
        view.co2_reduction_percent, view.co2_savings_kg, view.cost_difference_inr
    )
}

pub fn render_names_table(header: &str, names: &[String]) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", header]);
    for (idx, name) in names.iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), name.clone()]);
    }
    table.to_string()
}

pub fn render_material_table(details: &MaterialDetails) -> String {
    let mut table = new_table();
    table.set_header(vec!["Property", "Value"]);
    let rows = [
        ("Material", details.material_name.clone()),
        ("Type", details.material_type.clone()),
        ("ID", details.material_id.to_string()),
        ("Strength score", format!("{:.2}", details.strength_score)),
        ("Weight capacity (kg)", format!("{}", details.weight_capacity_kg)),
        ("Biodegradability", format!("{:.2}", details.biodegradability_score)),
        ("CO2 emission (kg)", format!("{:.4}", details.co2_emission_kg)),
        ("Recyclability", format!("{:.1}%", details.recyclability_percent)),
        ("Cost per kg (INR)", format!("{:.2}", details.cost_per_kg)),
        ("Moisture resistance", format!("{:.2}", details.moisture_resistance)),
        ("Eco score", format!("{:.3}", details.eco_score)),
        ("CO2 impact index", format!("{:.3}", details.co2_impact_index)),
        ("Cost efficiency index", format!("{:.3}", details.cost_efficiency_index)),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table.to_string()
}

pub fn render_health_table(health: &HealthStatus) -> String {
    let mut table = new_table();
    table.set_header(vec!["Check", "Status"]);
    let status_cell = if health.is_healthy() {
        Cell::new(&health.status).fg(Color::Green)
    } else {
        Cell::new(&health.status).fg(Color::Red)
    };
    table.add_row(Row::from(vec![Cell::new("api"), status_cell]));
    for (model, loaded) in &health.models_loaded {
        let cell = if *loaded {
            Cell::new("loaded").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        table.add_row(Row::from(vec![Cell::new(format!("model: {model}")), cell]));
    }
    let mut out = table.to_string();
    if !health.version.is_empty() {
        out.push_str(&format!("\nversion {} at {}", health.version, health.timestamp));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::present;
    use crate::records::{ComparisonRecord, RecommendationRecord};

    #[test]
    fn dashboard_shows_cards_rows_and_comparison() {
        let records = vec![
            RecommendationRecord::new("Bamboo", "Plant", 0.9, 10.0, 0.5, 0.8),
            RecommendationRecord::new("Plastic", "Polymer", 0.3, 5.0, 2.0, 0.2)
                .with_capacity(1.0, false),
        ];
        let comparison = ComparisonRecord {
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
        };
        let model = present(&records, Some(&comparison)).expect("model");
        let text = render_dashboard(&model);
        assert!(text.contains("Best Overall"));
        assert!(text.contains("Lowest CO2"));
        assert!(text.contains("Plastic (over capacity)"));
        assert!(text.contains("90.0%"));
        assert!(text.contains("CO2 reduction: 77.8% (1.7500 kg saved)"));
        assert!(text.contains("Cost difference: ₹+5.00"));
    }

    #[test]
    fn names_table_is_numbered() {
        let text = render_names_table("Category", &["Food".to_string()]);
        assert!(text.contains("Category"));
        assert!(text.contains("Food"));
    }
}
