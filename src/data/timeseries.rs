use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bdl::payload::DataEntry;
use crate::bdl::BdlClient;
use crate::data::region::RegionDirectory;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// One voivodeship across years, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub region: String,
    pub points: Vec<YearValue>,
}

impl TimeSeries {
    pub fn empty(region: &str) -> Self {
        Self {
            region: region.to_string(),
            points: Vec::new(),
        }
    }

    /// Collects non-null values across every result group the API returned.
    pub fn from_entries(region: &str, entries: Vec<DataEntry>) -> Self {
        let mut points: Vec<YearValue> = entries
            .into_iter()
            .flat_map(|entry| entry.values)
            .filter_map(|value| {
                let val = value.val?;
                match value.year_number() {
                    Some(year) => Some(YearValue { year, value: val }),
                    None => {
                        debug!(year = %value.year, "skipping value with unparseable year");
                        None
                    }
                }
            })
            .collect();

        points.sort_by_key(|point| point.year);

        Self {
            region: region.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Unknown region names are not an error: they yield an empty series.
pub async fn fetch_time_series(
    client: &BdlClient,
    directory: &RegionDirectory,
    region: &str,
    years: &[String],
) -> Result<TimeSeries> {
    let Some(unit_id) = directory.unit_id(region) else {
        warn!(region, "no unit id for region");
        return Ok(TimeSeries::empty(region));
    };

    let entries = client.data_by_unit(unit_id, years).await?;
    let series = TimeSeries::from_entries(region, entries);
    if series.is_empty() {
        info!(region, years = ?years, "no data for region in requested years");
    }
    Ok(series)
}
