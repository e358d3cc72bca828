use crate::records::RecommendationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub best_overall: usize,
    pub lowest_cost: usize,
    pub lowest_co2: usize,
}

/// Single left-to-right pass with running minima. Strict `<` keeps the
/// earliest record on ties. `None` for an empty slice.
pub fn select_extrema(records: &[RecommendationRecord]) -> Option<Extrema> {
    let first = records.first()?;
    let mut lowest_cost = (0usize, first.predicted_cost_inr);
    let mut lowest_co2 = (0usize, first.predicted_co2_kg);

    for (idx, record) in records.iter().enumerate().skip(1) {
        if record.predicted_cost_inr < lowest_cost.1 {
            lowest_cost = (idx, record.predicted_cost_inr);
        }
        if record.predicted_co2_kg < lowest_co2.1 {
            lowest_co2 = (idx, record.predicted_co2_kg);
        }
    }

    Some(Extrema {
        best_overall: 0,
        lowest_cost: lowest_cost.0,
        lowest_co2: lowest_co2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cost: f64, co2: f64, score: f64) -> RecommendationRecord {
        RecommendationRecord::new(name, "Test", score, cost, co2, 0.5)
    }

    #[test]
    fn picks_independent_minima() {
        let records = vec![
            record("Bamboo", 10.0, 0.5, 0.9),
            record("Plastic", 5.0, 2.0, 0.3),
        ];
        let extrema = select_extrema(&records).expect("non-empty");
        assert_eq!(records[extrema.lowest_cost].material_name, "Plastic");
        assert_eq!(records[extrema.lowest_co2].material_name, "Bamboo");
        assert_eq!(records[extrema.best_overall].material_name, "Bamboo");
    }

    #[test]
    fn ties_keep_first_encountered() {
        let records = vec![
            record("A", 8.0, 1.0, 0.7),
            record("B", 3.0, 0.2, 0.6),
            record("C", 3.0, 0.2, 0.5),
        ];
        let extrema = select_extrema(&records).expect("non-empty");
        assert_eq!(extrema.lowest_cost, 1);
        assert_eq!(extrema.lowest_co2, 1);
    }

    #[test]
    fn best_overall_ignores_metric_order() {
        let records = vec![
            record("Worst", 99.0, 9.0, 0.1),
            record("Cheap", 1.0, 0.1, 0.99),
        ];
        let extrema = select_extrema(&records).expect("non-empty");
        assert_eq!(extrema.best_overall, 0);
        assert_eq!(extrema.lowest_cost, 1);
    }

    #[test]
    fn minima_bound_every_record() {
        let records: Vec<_> = (0..25)
            .map(|i| {
                let f = i as f64;
                record(&format!("M{i}"), ((f * 7.3) % 11.0) + 1.0, ((f * 3.1) % 5.0) + 0.01, 0.5)
            })
            .collect();
        let extrema = select_extrema(&records).expect("non-empty");
        let min_cost = records[extrema.lowest_cost].predicted_cost_inr;
        let min_co2 = records[extrema.lowest_co2].predicted_co2_kg;
        for r in &records {
            assert!(min_cost <= r.predicted_cost_inr);
            assert!(min_co2 <= r.predicted_co2_kg);
        }
    }

    #[test]
    fn empty_input_has_no_extrema() {
        assert!(select_extrema(&[]).is_none());
    }
}
