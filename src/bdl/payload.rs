//! Wire shapes of the BDL API responses. Only the fields the dashboard reads are modelled.

use serde::{Deserialize, Deserializer};

/// Envelope shared by the units and data endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// One entry of `/units`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitEntry {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

/// One result group of `/data/by-variable` (a unit) or `/data/by-unit` (a variable).
#[derive(Debug, Clone, Deserialize)]
pub struct DataEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

/// A single yearly value; `val` is null when the office has not published it.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueEntry {
    #[serde(deserialize_with = "id_as_string")]
    pub year: String,
    #[serde(default)]
    pub val: Option<f64>,
}

impl ValueEntry {
    pub fn year_number(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }
}

/// The live API sends ids and years as strings, older dumps as numbers.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
