use crate::data::{RankingTable, TimeSeries};

/// Bars shown in the ranking chart.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    pub x_label: String,
    pub values: Vec<BarPoint>,
}

impl BarSeries {
    /// First [`TOP_N`] rows of an already sorted ranking, in ranking order.
    pub fn top_of_ranking(table: &RankingTable) -> Self {
        Self {
            title: "Top 10 województw wg ceny 1m²".to_string(),
            x_label: "Cena za 1m²".to_string(),
            values: table
                .top(TOP_N)
                .iter()
                .map(|row| BarPoint {
                    label: row.region.clone(),
                    value: row.value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(i32, f64)>,
}

impl LineSeries {
    pub fn from_time_series(series: &TimeSeries) -> Self {
        Self {
            title: format!("Zmiana ceny 1m² mieszkań – {}", series.region),
            x_label: "Rok".to_string(),
            y_label: "Cena (zł)".to_string(),
            points: series.points.iter().map(|p| (p.year, p.value)).collect(),
        }
    }
}
