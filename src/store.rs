use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{DailyRecord, RegionSelection, NATIONWIDE_LABEL};

pub type Sequence = Arc<[DailyRecord]>;

#[derive(Debug, Clone)]
pub struct DataStore {
    nationwide: Sequence,
    per_region: HashMap<String, Sequence>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self {
            nationwide: Arc::from(Vec::new()),
            per_region: HashMap::new(),
        }
    }
}

impl DataStore {
    pub fn set_nationwide(&mut self, records: Vec<DailyRecord>) {
        self.nationwide = Arc::from(records);
    }

    pub fn set_per_region(&mut self, mapping: HashMap<String, Vec<DailyRecord>>) {
        self.per_region = mapping
            .into_iter()
            .map(|(region, records)| (region, Arc::from(records)))
            .collect();
    }

    pub fn sequence_for(&self, region: &RegionSelection) -> Sequence {
        match region {
            RegionSelection::Region(code) => self
                .per_region
                .get(code)
                .cloned()
                .unwrap_or_else(|| Arc::clone(&self.nationwide)),
            RegionSelection::Nationwide => Arc::clone(&self.nationwide),
        }
    }

    pub fn has_region(&self, region: &RegionSelection) -> bool {
        match region {
            RegionSelection::Nationwide => true,
            RegionSelection::Region(code) => self.per_region.contains_key(code),
        }
    }

    pub fn region_options(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.per_region.keys().cloned().collect();
        codes.sort();
        codes.insert(0, NATIONWIDE_LABEL.to_string());
        codes
    }
}

pub fn ingest_nationwide(mut raw: Vec<DailyRecord>) -> Vec<DailyRecord> {
    raw.reverse();
    raw
}

/// Reverses the newest-first per-region feed and groups it by `state`.
///
/// Records without a state code are dropped; each group keeps chronological order.
pub fn ingest_per_region(raw: Vec<DailyRecord>) -> HashMap<String, Vec<DailyRecord>> {
    let mut grouped: HashMap<String, Vec<DailyRecord>> = HashMap::new();

    for record in raw.into_iter().rev() {
        let Some(state) = record.state.clone() else {
            continue;
        };
        grouped.entry(state).or_default().push(record);
    }

    grouped
}
