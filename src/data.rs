//! Sourcing of market snapshots, either live from the sportsbook or from a JSON file.

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::file::ReadJsonFile;
use crate::snapshot::MarketSnapshot;
use crate::statistic::{Statistic, UnknownStatistic};

const BASE_URL: &str = "https://sportsbook-nash.draftkings.com/api/sportscontent/dkuswatl/v1/leagues/88808";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const BROWSER_HEADERS: [(&str, &str); 6] = [
    ("sec-ch-ua", r#""Chromium";v="130", "Google Chrome";v="130", "Not:A_Brand";v="99""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "Windows"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
];
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0}")]
    UnknownStatistic(#[from] UnknownStatistic),

    #[error("request for {statistic} failed with status {status}")]
    Status {
        statistic: Statistic,
        status: StatusCode,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct CapturedSnapshot {
    pub statistic: Statistic,
    pub capture_time: DateTime<Utc>,
    pub snapshot: MarketSnapshot,
}

/// The category and subcategory under which the statistic's player props are published.
fn subcategory(statistic: Statistic) -> (u32, u32) {
    match statistic {
        Statistic::PassingTouchdowns => (1000, 15987),
        Statistic::PassingYards => (1000, 14119),
        Statistic::RushingYards => (1001, 14118),
        Statistic::ReceivingYards => (1342, 14117),
    }
}

pub fn endpoint(statistic: Statistic) -> String {
    let (category, subcategory) = subcategory(statistic);
    format!("{BASE_URL}/categories/{category}/subcategories/{subcategory}")
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 5);
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://sportsbook.draftkings.com"));
    headers.insert(REFERER, HeaderValue::from_static("https://sportsbook-nash.draftkings.com/"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    for (name, value) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers
}

/// Downloads the current snapshot for the given statistic.
pub async fn download(statistic: Statistic) -> Result<CapturedSnapshot, DataError> {
    let url = endpoint(statistic);
    info!("downloading {statistic} from {url}");
    let client = Client::builder()
        .default_headers(default_headers())
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status { statistic, status });
    }
    let body = response.bytes().await?;
    debug!("received {} bytes for {statistic}", body.len());
    let snapshot: MarketSnapshot = serde_json::from_slice(&body)?;
    Ok(CapturedSnapshot {
        statistic,
        capture_time: Utc::now(),
        snapshot,
    })
}

/// Downloads the snapshot for a statistic given by name, failing before any request is made if
/// the name is not recognised.
pub async fn download_by_name(name: &str) -> Result<CapturedSnapshot, DataError> {
    let statistic = name.parse::<Statistic>()?;
    download(statistic).await
}

/// Reads a previously saved snapshot for the given statistic.
pub fn read_from_file(statistic: Statistic, path: impl AsRef<Path>) -> Result<CapturedSnapshot, DataError> {
    let path = path.as_ref();
    debug!("reading {statistic} from {}", path.display());
    let snapshot = MarketSnapshot::read_json_file(path)?;
    Ok(CapturedSnapshot {
        statistic,
        capture_time: Utc::now(),
        snapshot,
    })
}
