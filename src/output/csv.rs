use anyhow::Result;

use crate::presenter::RenderRow;

pub fn rows_to_csv(rows: &[RenderRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "rank",
        "material_name",
        "material_type",
        "suitability",
        "cost_inr",
        "co2_kg",
        "eco_score",
        "over_capacity",
    ])?;
    for row in rows {
        writer.write_record([
            row.rank.to_string(),
            row.material_name.clone(),
            row.material_type.clone(),
            row.suitability.clone(),
            row.cost_inr.clone(),
            row.co2_kg.clone(),
            row.eco_score.clone(),
            row.over_capacity.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn names_to_csv(header: &str, names: &[String]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([header])?;
    for name in names {
        writer.write_record([name])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
