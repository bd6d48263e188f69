use crate::error::AdapterError;
use crate::models::{DailyRecord, DataBounds, DateInfo, Metric, TimeScale};
use crate::store::Sequence;

#[derive(Debug, Clone)]
pub struct SparkAdapter {
    daily_data: Sequence,
    pub metric: Metric,
    pub time_scale: TimeScale,
}

impl SparkAdapter {
    pub fn new(daily_data: Sequence) -> Self {
        Self {
            daily_data,
            metric: Metric::default(),
            time_scale: TimeScale::default(),
        }
    }

    pub fn count(&self) -> usize {
        self.daily_data.len()
    }

    pub fn item_at(&self, index: usize) -> Result<&DailyRecord, AdapterError> {
        self.daily_data.get(index).ok_or(AdapterError::OutOfRange {
            index,
            count: self.count(),
        })
    }

    pub fn y_value_at(&self, index: usize) -> Result<f32, AdapterError> {
        Ok(self.item_at(index)?.value(self.metric) as f32)
    }

    pub fn info_at(&self, index: usize) -> Result<DateInfo, AdapterError> {
        let record = self.item_at(index)?;
        Ok(DateInfo {
            date: record.date,
            value: record.value(self.metric),
            metric: self.metric,
        })
    }

    /// The right edge always sits on the latest record. For week/month the left edge
    /// is pulled to `count - days`, which goes negative on short series.
    pub fn visible_bounds(&self) -> DataBounds {
        let count = self.count();
        if count == 0 {
            return DataBounds::default();
        }

        let (bottom, top) = self
            .daily_data
            .iter()
            .map(|record| record.value(self.metric) as f32)
            .fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

        let mut bounds = DataBounds {
            left: 0.0,
            right: (count - 1) as f32,
            bottom,
            top,
        };

        if let Some(days) = self.time_scale.num_days() {
            bounds.left = count as f32 - days as f32;
        }

        bounds
    }
}
