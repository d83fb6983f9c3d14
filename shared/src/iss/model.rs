use crate::iss::index::SightingIndex;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One ephemeris sample. Position is in km, velocity in km/s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionRecord {
    pub epoch: String,
    pub position: Vector3,
    pub velocity: Vector3,
}

/// The six-field position/velocity projection served for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVectorView {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
    #[serde(rename = "X_DOT")]
    pub x_dot: f64,
    #[serde(rename = "Y_DOT")]
    pub y_dot: f64,
    #[serde(rename = "Z_DOT")]
    pub z_dot: f64,
}

impl PositionRecord {
    pub fn state_vector(&self) -> StateVectorView {
        StateVectorView {
            x: self.position.x,
            y: self.position.y,
            z: self.position.z,
            x_dot: self.velocity.x,
            y_dot: self.velocity.y,
            z_dot: self.velocity.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SightingRecord {
    pub country: String,
    pub region: String,
    pub city: String,
    pub spacecraft: String,
    pub sighting_date: String,
    pub duration_minutes: String,
    pub max_elevation: String,
    pub enters: String,
    pub exits: String,
    pub utc_offset: String,
    pub utc_time: String,
    pub utc_date: String,
}

/// Ephemeris samples in file order, with an epoch lookup built once at construction.
#[derive(Debug, Default)]
pub struct PositionDataset {
    records: Vec<PositionRecord>,
    by_epoch: HashMap<String, usize>,
}

impl PositionDataset {
    pub fn new(records: Vec<PositionRecord>) -> Self {
        let mut by_epoch = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            // First occurrence wins if the file repeats an epoch.
            by_epoch.entry(record.epoch.clone()).or_insert(i);
        }
        Self { records, by_epoch }
    }

    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn find(&self, epoch: &str) -> Option<&PositionRecord> {
        self.by_epoch.get(epoch).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SightingDataset {
    records: Vec<SightingRecord>,
    index: SightingIndex,
}

impl SightingDataset {
    pub fn new(records: Vec<SightingRecord>) -> Self {
        let index = SightingIndex::build(&records);
        Self { records, index }
    }

    pub fn records(&self) -> &[SightingRecord] {
        &self.records
    }

    pub fn index(&self) -> &SightingIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One generation of both datasets. Immutable once built; a reload produces a new one.
#[derive(Debug, Default)]
pub struct Datasets {
    pub positions: PositionDataset,
    pub sightings: SightingDataset,
}

impl Datasets {
    pub fn new(positions: Vec<PositionRecord>, sightings: Vec<SightingRecord>) -> Self {
        Self {
            positions: PositionDataset::new(positions),
            sightings: SightingDataset::new(sightings),
        }
    }
}
