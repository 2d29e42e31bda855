//! HTTP client for the BDL (Bank Danych Lokalnych) statistics API.
//!
//! Three read-only endpoints are used: the list of administrative units at a level,
//! one variable across units for a year, and one unit across a list of years.

pub mod payload;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{BdlError, Result};
use payload::{DataEntry, ResultsPage, UnitEntry};

/// Administrative level of voivodeships.
pub const REGION_LEVEL: u8 = 2;
const PAGE_SIZE: &str = "100";
const AGGREGATE_ID: &str = "1";

#[derive(Debug, Clone)]
pub struct BdlClient {
    http: Client,
    base_url: String,
    variable_id: u32,
}

impl BdlClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(client_id) = &config.client_id {
            let value = reqwest::header::HeaderValue::from_str(client_id)
                .map_err(|err| BdlError::ClientSetup(format!("X-ClientId: {err}")))?;
            headers.insert("x-clientid", value);
        }
        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            variable_id: config.variable_id,
        })
    }

    pub fn variable_id(&self) -> u32 {
        self.variable_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /units?level=2` in a single page.
    pub async fn units(&self, level: u8) -> Result<Vec<UnitEntry>> {
        let url = format!("{}/units", self.base_url);
        let level = level.to_string();
        let query = [
            ("level", level.as_str()),
            ("format", "json"),
            ("page-size", PAGE_SIZE),
        ];
        let page: ResultsPage<UnitEntry> = self.get_json(&url, &query).await?;
        Ok(page.results)
    }

    /// `GET /data/by-variable/{var}` restricted to voivodeships and one year.
    pub async fn data_by_variable(&self, year: &str) -> Result<Vec<DataEntry>> {
        let url = format!("{}/data/by-variable/{}", self.base_url, self.variable_id);
        let level = REGION_LEVEL.to_string();
        let query = [
            ("aggregate-id", AGGREGATE_ID),
            ("unit-level", level.as_str()),
            ("year", year),
            ("page-size", PAGE_SIZE),
            ("format", "json"),
        ];
        let page: ResultsPage<DataEntry> = self.get_json(&url, &query).await?;
        Ok(page.results)
    }

    /// `GET /data/by-unit/{unit}` for the configured variable; `year` is repeated per entry.
    pub async fn data_by_unit(&self, unit_id: &str, years: &[String]) -> Result<Vec<DataEntry>> {
        let url = format!("{}/data/by-unit/{}", self.base_url, unit_id);
        let variable = self.variable_id.to_string();
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(years.len() + 3);
        query.push(("var-id", variable.as_str()));
        query.extend(years.iter().map(|year| ("year", year.as_str())));
        query.push(("aggregate-id", AGGREGATE_ID));
        query.push(("format", "json"));
        let page: ResultsPage<DataEntry> = self.get_json(&url, &query).await?;
        Ok(page.results)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!(%url, ?query, "upstream request");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BdlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| BdlError::ResponseParse(err.to_string()))
    }
}
