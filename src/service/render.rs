//! Service list output

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::Table;
use serde::{Deserialize, Serialize};

use super::model::DisplayRow;

/// Column headers of the service table
pub const HEADERS: [&str; 4] = ["NAMESPACE", "NAME", "TARGET PORT", "URL"];

/// Output format for the service list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!(
                "Unknown output format '{}' (expected table or json)",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Render rows in the requested format
pub fn render(rows: &[DisplayRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Json => render_json(rows),
    }
}

/// Bordered table; multi-URL cells span several lines
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(HEADERS.to_vec());
    for row in rows {
        table.add_row(vec![&row.namespace, &row.name, &row.port_status, &row.urls]);
    }
    table.to_string()
}

pub fn render_json(rows: &[DisplayRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize service list")
}
