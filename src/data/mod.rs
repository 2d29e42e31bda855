//! Typed tables built from BDL payloads: the region directory, yearly rankings and
//! per-region time series.

pub mod ranking;
pub mod region;
pub mod timeseries;

pub use ranking::{fetch_ranking, Observation, RankingTable};
pub use region::{Region, RegionDirectory};
pub use timeseries::{fetch_time_series, TimeSeries, YearValue};
