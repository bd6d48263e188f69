use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::FetchError;
use crate::models::DailyRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.covidtracking.com/api/v1/";
const NATIONWIDE_PATH: &str = "us/daily.json";
const PER_REGION_PATH: &str = "states/daily.json";
const NATIONWIDE_FILE: &str = "us_daily.json";
const PER_REGION_FILE: &str = "states_daily.json";

/// Result of running both fetches; either half may have failed on its own.
#[derive(Debug)]
pub struct FetchOutcome {
    pub nationwide: Result<Vec<DailyRecord>, FetchError>,
    pub per_region: Result<Vec<DailyRecord>, FetchError>,
}

#[derive(Debug, Clone)]
pub struct CovidClient {
    http: reqwest::Client,
    base_url: String,
}

impl CovidClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn fetch_nationwide(&self) -> Result<Vec<DailyRecord>, FetchError> {
        self.get_records(NATIONWIDE_PATH).await
    }

    pub async fn fetch_per_region(&self) -> Result<Vec<DailyRecord>, FetchError> {
        self.get_records(PER_REGION_PATH).await
    }

    pub async fn fetch_all(&self) -> FetchOutcome {
        let (nationwide, per_region) =
            tokio::join!(self.fetch_nationwide(), self.fetch_per_region());
        FetchOutcome {
            nationwide,
            per_region,
        }
    }

    async fn get_records(&self, path: &str) -> Result<Vec<DailyRecord>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "requesting daily records");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })?;
        let records = decode_records(&url, &body)?;
        info!(%url, records = records.len(), "received daily records");
        Ok(records)
    }
}

#[derive(Debug, Clone)]
pub enum DataSource {
    Api(CovidClient),
    Dir(PathBuf),
}

impl DataSource {
    pub async fn fetch_all(&self) -> FetchOutcome {
        match self {
            DataSource::Api(client) => client.fetch_all().await,
            DataSource::Dir(dir) => {
                let (nationwide, per_region) = tokio::join!(
                    read_records(dir.join(NATIONWIDE_FILE)),
                    read_records(dir.join(PER_REGION_FILE))
                );
                FetchOutcome {
                    nationwide,
                    per_region,
                }
            }
        }
    }
}

async fn read_records(path: impl AsRef<Path>) -> Result<Vec<DailyRecord>, FetchError> {
    let path = path.as_ref();
    let what = path.display().to_string();
    let body = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: what.clone(),
        source,
    })?;
    decode_records(&what, &body)
}

pub fn decode_records(what: &str, body: &[u8]) -> Result<Vec<DailyRecord>, FetchError> {
    let records: Vec<DailyRecord> =
        serde_json::from_slice(body).map_err(|source| FetchError::Decode {
            what: what.to_string(),
            source,
        })?;

    if records.is_empty() {
        return Err(FetchError::Empty {
            what: what.to_string(),
        });
    }

    Ok(records)
}
