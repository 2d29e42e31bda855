//! Voivodeship directory: display name -> BDL unit id. Built once at startup.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::bdl::payload::UnitEntry;
use crate::bdl::{BdlClient, REGION_LEVEL};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: String,
    pub unit_id: String,
}

/// Read-only after construction; shared across requests without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDirectory {
    by_name: BTreeMap<String, String>,
}

impl RegionDirectory {
    /// Fetches all level-2 units in one page. Any failure is returned to the caller,
    /// which is expected to abort startup.
    pub async fn load(client: &BdlClient) -> Result<Self> {
        let units = client.units(REGION_LEVEL).await?;
        let directory = Self::from_units(units);
        info!(regions = directory.len(), "region directory loaded");
        Ok(directory)
    }

    pub fn from_units(units: impl IntoIterator<Item = UnitEntry>) -> Self {
        let by_name = units
            .into_iter()
            .map(|unit| (capitalize(&unit.name), unit.id))
            .collect();
        Self { by_name }
    }

    pub fn unit_id(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn regions(&self) -> Vec<Region> {
        self.by_name
            .iter()
            .map(|(name, unit_id)| Region {
                name: name.clone(),
                unit_id: unit_id.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Trimmed, first character upper-case, the rest lower-case ("MAŁOPOLSKIE" -> "Małopolskie").
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
