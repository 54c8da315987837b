//! Builtin city catalog.
//!
//! The dashboard offers a small fixed set of cities; configuration can
//! append or override entries. Lookup is by display name.

use chrono_tz::{America, Asia, Australia, Europe};

use crate::types::CityEntry;

/// Catalog of selectable cities, in menu order.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    entries: Vec<CityEntry>,
}

impl CityCatalog {
    /// The builtin seven-city catalog.
    pub fn builtin() -> Self {
        let city = |name: &str, latitude: f64, longitude: f64, time_zone| CityEntry {
            name: name.to_string(),
            latitude,
            longitude,
            time_zone,
        };

        Self {
            entries: vec![
                city("Cambridge, UK", 52.2053, 0.1218, Europe::London),
                city("Hamburg, Germany", 53.5511, 9.9937, Europe::Berlin),
                city("New York City, US", 40.7128, -74.0060, America::New_York),
                city("Mumbai, India", 19.0760, 72.8777, Asia::Kolkata),
                city("Owase, Japan", 34.0710, 136.1903, Asia::Tokyo),
                city("Sydney, Australia", -33.8688, 151.2093, Australia::Sydney),
                city("Rio de Janeiro, Brazil", -22.9068, -43.1729, America::Sao_Paulo),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&CityEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Display names in stable menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// First catalog entry, used when no city was selected yet.
    pub fn default_city(&self) -> Option<&CityEntry> {
        self.entries.first()
    }

    /// Append entries; a same-name entry replaces the builtin one.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = CityEntry>) {
        for entry in entries {
            match self.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    #[test]
    fn builtin_catalog_has_the_expected_cities() {
        let catalog = CityCatalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.default_city().map(|c| c.name.as_str()), Some("Cambridge, UK"));

        let mumbai = catalog.get("Mumbai, India").unwrap();
        assert_eq!(mumbai.time_zone, Asia::Kolkata);
        assert!((mumbai.latitude - 19.0760).abs() < 1e-9);
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(CityCatalog::builtin().get("Atlantis").is_none());
    }

    #[test]
    fn extend_appends_and_overrides_by_name() {
        let mut catalog = CityCatalog::builtin();
        catalog.extend(vec![
            CityEntry {
                name: "Paris, France".to_string(),
                latitude: 48.8566,
                longitude: 2.3522,
                time_zone: Paris,
            },
            CityEntry {
                name: "Cambridge, UK".to_string(),
                latitude: 52.2,
                longitude: 0.12,
                time_zone: Europe::London,
            },
        ]);

        assert_eq!(catalog.len(), 8);
        assert!(catalog.get("Paris, France").is_some());
        // Override replaced the builtin coordinates, not duplicated the entry.
        let cambridge = catalog.get("Cambridge, UK").unwrap();
        assert_eq!(cambridge.latitude, 52.2);
        assert_eq!(catalog.names().filter(|n| *n == "Cambridge, UK").count(), 1);
    }
}
