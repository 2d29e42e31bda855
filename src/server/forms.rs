//! Form fields accepted by the pages. Every field is optional and falls back to a default.

use serde::Deserialize;

use crate::config::{year_range, DEFAULT_RANKING_YEAR, DEFAULT_REGION, FIRST_YEAR, LAST_YEAR};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingForm {
    pub rok: Option<String>,
}

impl RankingForm {
    pub fn year(&self) -> String {
        non_empty(self.rok.as_deref())
            .unwrap_or(DEFAULT_RANKING_YEAR)
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendForm {
    pub wojewodztwo: Option<String>,
    pub od: Option<String>,
    #[serde(rename = "do")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    pub region: String,
    pub from: i32,
    pub to: i32,
}

impl Default for TrendRequest {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            from: FIRST_YEAR,
            to: LAST_YEAR,
        }
    }
}

impl From<&TrendForm> for TrendRequest {
    fn from(form: &TrendForm) -> Self {
        Self {
            region: non_empty(form.wojewodztwo.as_deref())
                .unwrap_or(DEFAULT_REGION)
                .to_string(),
            from: parse_year(form.od.as_deref(), FIRST_YEAR),
            to: parse_year(form.to.as_deref(), LAST_YEAR),
        }
    }
}

impl TrendRequest {
    /// Inclusive list of years, or the message shown to the user when the range is
    /// reversed or leaves the published years.
    pub fn years(&self) -> Result<Vec<String>, String> {
        if self.from > self.to {
            return Err(format!(
                "Nieprawidłowy zakres lat: {} > {}",
                self.from, self.to
            ));
        }
        let published = FIRST_YEAR..=LAST_YEAR;
        if !published.contains(&self.from) || !published.contains(&self.to) {
            return Err(format!(
                "Nieprawidłowy zakres lat: {}–{} (dostępne {FIRST_YEAR}–{LAST_YEAR})",
                self.from, self.to
            ));
        }
        Ok(year_range(self.from, self.to))
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_year(raw: Option<&str>, default: i32) -> i32 {
    non_empty(raw)
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(default)
}
