pub mod csv;
pub mod json;
pub mod table;

use anyhow::Result;
use clap::ValueEnum;

use crate::presenter::RenderModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub trait RenderAdapter {
    fn render(&self, model: &RenderModel) -> Result<String>;
}

pub struct TableAdapter;

impl RenderAdapter for TableAdapter {
    fn render(&self, model: &RenderModel) -> Result<String> {
        Ok(table::render_dashboard(model))
    }
}

pub struct JsonAdapter;

impl RenderAdapter for JsonAdapter {
    fn render(&self, model: &RenderModel) -> Result<String> {
        json::render_json(model)
    }
}

pub struct CsvAdapter;

impl RenderAdapter for CsvAdapter {
    fn render(&self, model: &RenderModel) -> Result<String> {
        csv::rows_to_csv(&model.rows)
    }
}

pub fn adapter_for(format: OutputFormat) -> Box<dyn RenderAdapter> {
    match format {
        OutputFormat::Table => Box::new(TableAdapter),
        OutputFormat::Json => Box::new(JsonAdapter),
        OutputFormat::Csv => Box::new(CsvAdapter),
    }
}
