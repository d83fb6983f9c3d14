//! Read-only queries over one [`Datasets`] generation.
//!
//! Listings keep ingest order everywhere. Unknown country/region/city keys produce
//! empty results; only an epoch lookup can miss.

use crate::iss::error::QueryError;
use crate::iss::index::Groups;
use crate::iss::model::{Datasets, PositionRecord, SightingRecord};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Occurrence count per name, in the order each name was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, usize)>,
}

impl CountMap {
    fn from_groups<T>(groups: &Groups<T>, count: impl Fn(&T) -> usize) -> Self {
        Self {
            entries: groups
                .iter()
                .map(|(name, group)| (name.to_string(), count(group)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CountMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// The field projection served for a sighting. The set is the same at every filter
/// level, so `region` and `city` are emitted even when they were part of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SightingView<'a> {
    pub region: &'a str,
    pub city: &'a str,
    pub spacecraft: &'a str,
    pub sighting_date: &'a str,
    pub duration_minutes: &'a str,
    pub max_elevation: &'a str,
    pub enters: &'a str,
    pub exits: &'a str,
    pub utc_offset: &'a str,
    pub utc_time: &'a str,
    pub utc_date: &'a str,
}

impl<'a> From<&'a SightingRecord> for SightingView<'a> {
    fn from(r: &'a SightingRecord) -> Self {
        Self {
            region: &r.region,
            city: &r.city,
            spacecraft: &r.spacecraft,
            sighting_date: &r.sighting_date,
            duration_minutes: &r.duration_minutes,
            max_elevation: &r.max_elevation,
            enters: &r.enters,
            exits: &r.exits,
            utc_offset: &r.utc_offset,
            utc_time: &r.utc_time,
            utc_date: &r.utc_date,
        }
    }
}

impl Datasets {
    /// All epochs in file order. Cloning the iterator restarts the sequence.
    pub fn list_epochs(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.positions.records().iter().map(|r| r.epoch.as_str())
    }

    pub fn get_epoch(&self, epoch: &str) -> Result<&PositionRecord, QueryError> {
        self.positions
            .find(epoch)
            .ok_or_else(|| QueryError::NotFound(epoch.to_string()))
    }

    pub fn count_countries(&self) -> CountMap {
        CountMap::from_groups(self.sightings.index().countries(), |c| c.records.len())
    }

    pub fn filter_by_country(&self, country: &str) -> Vec<SightingView<'_>> {
        self.sightings
            .index()
            .country(country)
            .map(|c| self.project(&c.records))
            .unwrap_or_default()
    }

    pub fn count_regions(&self, country: &str) -> CountMap {
        self.sightings
            .index()
            .country(country)
            .map(|c| CountMap::from_groups(&c.regions, |r| r.records.len()))
            .unwrap_or_default()
    }

    pub fn filter_by_region(&self, country: &str, region: &str) -> Vec<SightingView<'_>> {
        self.sightings
            .index()
            .region(country, region)
            .map(|r| self.project(&r.records))
            .unwrap_or_default()
    }

    pub fn count_cities(&self, country: &str, region: &str) -> CountMap {
        self.sightings
            .index()
            .region(country, region)
            .map(|r| CountMap::from_groups(&r.cities, |c| c.records.len()))
            .unwrap_or_default()
    }

    pub fn filter_by_city(&self, country: &str, region: &str, city: &str) -> Vec<SightingView<'_>> {
        self.sightings
            .index()
            .city(country, region, city)
            .map(|c| self.project(&c.records))
            .unwrap_or_default()
    }

    fn project(&self, positions: &[usize]) -> Vec<SightingView<'_>> {
        let records = self.sightings.records();
        positions
            .iter()
            .map(|&i| SightingView::from(&records[i]))
            .collect()
    }
}
