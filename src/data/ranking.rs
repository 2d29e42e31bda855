use serde::Serialize;
use tracing::info;

use crate::bdl::payload::DataEntry;
use crate::bdl::BdlClient;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub region: String,
    pub year: String,
    pub value: f64,
}

/// One year across all voivodeships, highest value first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingTable {
    pub year: String,
    pub rows: Vec<Observation>,
}

impl RankingTable {
    /// Keeps, per entry, the first value published for `year`; entries without one are dropped.
    /// Sort is stable so equal values keep the upstream order.
    pub fn from_entries(year: &str, entries: Vec<DataEntry>) -> Self {
        let mut rows: Vec<Observation> = entries
            .into_iter()
            .filter_map(|entry| {
                let value = entry
                    .values
                    .iter()
                    .find_map(|v| (v.year == year).then_some(v.val).flatten())?;
                Some(Observation {
                    region: entry.name,
                    year: year.to_string(),
                    value,
                })
            })
            .collect();

        rows.sort_by(|left, right| right.value.total_cmp(&left.value));

        Self {
            year: year.to_string(),
            rows,
        }
    }

    pub fn empty(year: &str) -> Self {
        Self {
            year: year.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn top(&self, n: usize) -> &[Observation] {
        &self.rows[..self.rows.len().min(n)]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub async fn fetch_ranking(client: &BdlClient, year: &str) -> Result<RankingTable> {
    let entries = client.data_by_variable(year).await?;
    let table = RankingTable::from_entries(year, entries);
    info!(year, rows = table.len(), "ranking fetched");
    Ok(table)
}
