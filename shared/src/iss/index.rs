//! Country → region → city grouping over the sighting records, built once per load.
//!
//! Groups are kept in first-seen order and hold record positions in ingest order,
//! so every listing derived from the index matches a linear scan of the dataset.

use crate::iss::model::SightingRecord;
use std::collections::HashMap;

#[derive(Debug)]
pub struct Groups<T> {
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
}

impl<T> Default for Groups<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Default> Groups<T> {
    fn entry(&mut self, key: &str) -> &mut T {
        let i = match self.positions.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push((key.to_string(), T::default()));
                let i = self.entries.len() - 1;
                self.positions.insert(key.to_string(), i);
                i
            }
        };
        &mut self.entries[i].1
    }
}

impl<T> Groups<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CityGroup {
    pub records: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct RegionGroup {
    pub records: Vec<usize>,
    pub cities: Groups<CityGroup>,
}

#[derive(Debug, Default)]
pub struct CountryGroup {
    pub records: Vec<usize>,
    pub regions: Groups<RegionGroup>,
}

#[derive(Debug, Default)]
pub struct SightingIndex {
    countries: Groups<CountryGroup>,
}

impl SightingIndex {
    pub fn build(records: &[SightingRecord]) -> Self {
        let mut countries = Groups::<CountryGroup>::default();
        for (i, record) in records.iter().enumerate() {
            let country = countries.entry(&record.country);
            country.records.push(i);
            let region = country.regions.entry(&record.region);
            region.records.push(i);
            region.cities.entry(&record.city).records.push(i);
        }
        Self { countries }
    }

    pub fn countries(&self) -> &Groups<CountryGroup> {
        &self.countries
    }

    pub fn country(&self, country: &str) -> Option<&CountryGroup> {
        self.countries.get(country)
    }

    pub fn region(&self, country: &str, region: &str) -> Option<&RegionGroup> {
        self.country(country)?.regions.get(region)
    }

    pub fn city(&self, country: &str, region: &str, city: &str) -> Option<&CityGroup> {
        self.region(country, region)?.cities.get(city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sighting(country: &str, region: &str, city: &str) -> SightingRecord {
        SightingRecord {
            country: country.into(),
            region: region.into(),
            city: city.into(),
            ..Default::default()
        }
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let records = vec![
            sighting("US", "TX", "Austin"),
            sighting("Canada", "Ontario", "Toronto"),
            sighting("US", "CA", "LA"),
            sighting("US", "TX", "Austin"),
        ];
        let index = SightingIndex::build(&records);

        let countries: Vec<_> = index.countries().iter().map(|(k, _)| k).collect();
        assert_eq!(countries, vec!["US", "Canada"]);

        let us = index.country("US").unwrap();
        assert_eq!(us.records, vec![0, 2, 3]);
        let regions: Vec<_> = us.regions.iter().map(|(k, _)| k).collect();
        assert_eq!(regions, vec!["TX", "CA"]);

        assert_eq!(index.city("US", "TX", "Austin").unwrap().records, vec![0, 3]);
    }

    #[test]
    fn same_region_name_in_different_countries_is_separate() {
        let records = vec![
            sighting("US", "None", "Springfield"),
            sighting("Algeria", "None", "Adrar"),
        ];
        let index = SightingIndex::build(&records);
        assert_eq!(index.region("US", "None").unwrap().records, vec![0]);
        assert_eq!(index.region("Algeria", "None").unwrap().records, vec![1]);
        assert!(index.city("US", "None", "Adrar").is_none());
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let index = SightingIndex::build(&[sighting("US", "CA", "LA")]);
        assert!(index.country("us").is_none());
        assert!(index.region("US", "ca").is_none());
    }
}
