use tracing::{debug, info, warn};

use crate::adapter::SparkAdapter;
use crate::error::AdapterError;
use crate::fetch::FetchOutcome;
use crate::models::{DateInfo, Metric, RegionSelection, TimeScale};
use crate::store::{self, DataStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchSummary {
    pub nationwide_loaded: bool,
    pub per_region_loaded: bool,
}

#[derive(Debug, Default)]
pub struct App {
    store: DataStore,
    selected: RegionSelection,
    adapter: Option<SparkAdapter>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapter(&self) -> Option<&SparkAdapter> {
        self.adapter.as_ref()
    }

    pub fn selected(&self) -> &RegionSelection {
        &self.selected
    }

    /// Region whose data is actually on screen; an unloaded selection shows nationwide.
    pub fn shown_region(&self) -> RegionSelection {
        if self.store.has_region(&self.selected) {
            self.selected.clone()
        } else {
            RegionSelection::Nationwide
        }
    }

    /// Installs whatever arrived. A failed half is logged and leaves its old data in place.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> FetchSummary {
        let mut summary = FetchSummary::default();

        match outcome.nationwide {
            Ok(raw) => {
                let records = store::ingest_nationwide(raw);
                info!(records = records.len(), "installed nationwide data");
                self.store.set_nationwide(records);
                summary.nationwide_loaded = true;
            }
            Err(err) => warn!(error = %err, "nationwide fetch failed"),
        }

        match outcome.per_region {
            Ok(raw) => {
                let grouped = store::ingest_per_region(raw);
                info!(regions = grouped.len(), "installed per-region data");
                self.store.set_per_region(grouped);
                summary.per_region_loaded = true;
            }
            Err(err) => warn!(error = %err, "per-region fetch failed"),
        }

        let shown_changed = match &self.selected {
            RegionSelection::Nationwide => summary.nationwide_loaded,
            region @ RegionSelection::Region(_) => {
                summary.per_region_loaded
                    || (summary.nationwide_loaded && !self.store.has_region(region))
            }
        };
        if shown_changed || self.adapter.is_none() {
            self.rebuild_adapter();
        }

        summary
    }

    /// Switches region. The new adapter starts over at positive cases across all days.
    pub fn select_region(&mut self, region: RegionSelection) {
        if !self.store.has_region(&region) {
            debug!(%region, "region not loaded, showing nationwide data");
        }
        self.selected = region;
        self.rebuild_adapter();
    }

    pub fn select_metric(&mut self, metric: Metric) {
        if let Some(adapter) = self.adapter.as_mut() {
            debug!(?metric, "metric changed");
            adapter.metric = metric;
        }
    }

    pub fn select_time_scale(&mut self, time_scale: TimeScale) {
        if let Some(adapter) = self.adapter.as_mut() {
            debug!(?time_scale, "time scale changed");
            adapter.time_scale = time_scale;
        }
    }

    pub fn scrub(&self, index: usize) -> Result<DateInfo, AdapterError> {
        match &self.adapter {
            Some(adapter) => adapter.info_at(index),
            None => Err(AdapterError::OutOfRange { index, count: 0 }),
        }
    }

    pub fn latest_info(&self) -> Option<DateInfo> {
        let adapter = self.adapter.as_ref()?;
        let last = adapter.count().checked_sub(1)?;
        adapter.info_at(last).ok()
    }

    pub fn region_options(&self) -> Vec<String> {
        self.store.region_options()
    }

    fn rebuild_adapter(&mut self) {
        let sequence = self.store.sequence_for(&self.selected);
        self.adapter = Some(SparkAdapter::new(sequence));
    }
}
