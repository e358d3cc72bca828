use anyhow::Result;
use serde::Serialize;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use crate::presenter::present;
    use crate::records::RecommendationRecord;

    #[test]
    fn model_json_keeps_formatted_values() {
        let records = vec![RecommendationRecord::new("Jute", "Fibre", 0.876, 199.5, 0.01234, 0.5)];
        let model = present(&records, None).expect("model");
        let text = render_json(&model).expect("json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["rows"][0]["suitability"], "87.6%");
        assert_eq!(value["cards"][0]["kind"], "best_overall");
        assert!(value["comparison"].is_null());
    }
}
