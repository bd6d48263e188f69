use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use crate::adapter::SparkAdapter;
use crate::render;

#[derive(Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    region: &'a str,
    positive_increase: i64,
    negative_increase: i64,
    death_increase: i64,
}

pub fn export_csv(adapter: &SparkAdapter, region_label: &str, out: &Path) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("failed to create {}", out.display()))?;
    let mut written = 0usize;

    for index in render::visible_range(adapter) {
        let record = adapter.item_at(index)?;
        writer.serialize(CsvRow {
            date: record.date,
            region: record.state.as_deref().unwrap_or(region_label),
            positive_increase: record.positive_increase,
            negative_increase: record.negative_increase,
            death_increase: record.death_increase,
        })?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}
