use std::fmt::Write;

use num_format::{Locale, ToFormattedString};

use crate::adapter::SparkAdapter;
use crate::models::{DateInfo, RegionSelection};

pub const DEFAULT_WIDTH: usize = 60;
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn visible_range(adapter: &SparkAdapter) -> std::ops::Range<usize> {
    let count = adapter.count();
    if count == 0 {
        return 0..0;
    }
    let bounds = adapter.visible_bounds();
    let start = bounds.left.max(0.0).ceil() as usize;
    let end = (bounds.right as usize + 1).min(count);
    start.min(end)..end
}

pub fn sparkline(adapter: &SparkAdapter, width: usize) -> String {
    let range = visible_range(adapter);
    let values: Vec<f32> = range
        .filter_map(|index| adapter.y_value_at(index).ok())
        .collect();
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let bounds = adapter.visible_bounds();
    let span = bounds.top - bounds.bottom;
    let columns = values.len().min(width);

    (0..columns)
        .map(|column| {
            let from = column * values.len() / columns;
            let to = ((column + 1) * values.len() / columns).max(from + 1);
            let bucket = &values[from..to];
            let avg = bucket.iter().sum::<f32>() / bucket.len() as f32;
            let level = if span > 0.0 {
                (((avg - bounds.bottom) / span) * (BARS.len() - 1) as f32).round() as usize
            } else {
                0
            };
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

/// The count and date shown under the chart, e.g. `12,345 positive cases on Mar 07, 2021`.
pub fn info_line(info: &DateInfo) -> String {
    format!(
        "{} {} on {}",
        info.value.to_formatted_string(&Locale::en),
        info.metric.label(),
        info.date.format("%b %d, %Y")
    )
}

pub fn build_view(region: &RegionSelection, adapter: Option<&SparkAdapter>, width: usize) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{region}");

    let Some(adapter) = adapter.filter(|adapter| adapter.count() > 0) else {
        let _ = writeln!(output, "No data loaded.");
        return output;
    };

    let range = visible_range(adapter);
    let _ = writeln!(
        output,
        "{} ({:?}, {} of {} days)",
        adapter.metric.label(),
        adapter.time_scale,
        range.len(),
        adapter.count()
    );
    let _ = writeln!(output, "{}", sparkline(adapter, width));

    if let Some(last) = adapter.count().checked_sub(1) {
        if let Ok(info) = adapter.info_at(last) {
            let _ = writeln!(output, "{}", info_line(&info));
        }
    }

    output
}

pub fn build_region_list(options: &[String]) -> String {
    let mut output = String::new();
    for option in options {
        let _ = writeln!(output, "- {option}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, Metric, TimeScale};
    use chrono::{Duration, NaiveDate};

    fn adapter_over(values: &[i64]) -> SparkAdapter {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let records: Vec<DailyRecord> = values
            .iter()
            .enumerate()
            .map(|(i, v)| DailyRecord {
                date: start + Duration::days(i as i64),
                state: None,
                positive_increase: *v,
                negative_increase: 0,
                death_increase: 0,
            })
            .collect();
        SparkAdapter::new(records.into())
    }

    #[test]
    fn sparkline_spans_lowest_to_highest_glyph() {
        let adapter = adapter_over(&[0, 7, 14, 21, 28, 35, 42, 49]);
        assert_eq!(sparkline(&adapter, 60), "▁▂▃▄▅▆▇█");
    }

    #[test]
    fn flat_series_draws_lowest_glyph() {
        let adapter = adapter_over(&[5, 5, 5]);
        assert_eq!(sparkline(&adapter, 60), "▁▁▁");
    }

    #[test]
    fn long_series_is_bucketed_to_width() {
        let values: Vec<i64> = (0..200).collect();
        let adapter = adapter_over(&values);
        let line = sparkline(&adapter, 40);
        assert_eq!(line.chars().count(), 40);
        assert!(line.starts_with('▁'));
        assert!(line.ends_with('█'));
    }

    #[test]
    fn week_scale_draws_only_the_trailing_days() {
        let values: Vec<i64> = (0..100).collect();
        let mut adapter = adapter_over(&values);
        adapter.time_scale = TimeScale::Week;

        assert_eq!(visible_range(&adapter), 93..100);
        assert_eq!(sparkline(&adapter, 60).chars().count(), 7);
    }

    #[test]
    fn short_series_under_month_scale_shows_everything() {
        let mut adapter = adapter_over(&[1, 2, 3]);
        adapter.time_scale = TimeScale::Month;
        assert_eq!(visible_range(&adapter), 0..3);
    }

    #[test]
    fn info_line_formats_thousands_and_date() {
        let info = DateInfo {
            date: NaiveDate::from_ymd_opt(2021, 3, 7).unwrap(),
            value: 1234567,
            metric: Metric::Positive,
        };
        assert_eq!(info_line(&info), "1,234,567 positive cases on Mar 07, 2021");
    }

    #[test]
    fn view_without_data_says_so() {
        let view = build_view(&RegionSelection::Nationwide, None, 60);
        assert!(view.contains("All (Nationwide)"));
        assert!(view.contains("No data loaded."));
    }

    #[test]
    fn view_includes_latest_reading() {
        let adapter = adapter_over(&[10, 2000]);
        let view = build_view(&RegionSelection::Region("CA".into()), Some(&adapter), 60);
        assert!(view.starts_with("CA\n"));
        assert!(view.contains("2,000 positive cases on Mar 02, 2021"));
    }
}
