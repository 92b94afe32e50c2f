//! Built-in mock data and the bin sources that serve it.

use async_trait::async_trait;

use crate::model::{BinCategory, BinId, BinLocation, BinRecord, FillLevel, GeoPoint, LastUpdated};
use crate::ports::{BinSource, SourceError};

/// The five demo bins every fresh session starts with.
#[must_use]
pub fn seed_bins() -> Vec<BinRecord> {
    [
        ("BIN-001", BinCategory::TinyParticle, 25, "North Wing", 2),
        ("BIN-002", BinCategory::Plastic, 78, "Main Entrance", 1),
        ("BIN-003", BinCategory::Metal, 92, "Cafeteria", 3),
        ("BIN-004", BinCategory::SolidWaste, 45, "South Parking", 5),
        ("BIN-005", BinCategory::SanitaryWaste, 67, "Medical Wing", 4),
    ]
    .into_iter()
    .map(|(id, category, fill, location, minutes)| {
        BinRecord::new(
            id,
            category,
            FillLevel::clamped(fill),
            location,
            LastUpdated::MinutesAgo(minutes),
        )
    })
    .collect()
}

/// Mock GPS positions of the demo bins.
#[must_use]
pub fn bin_locations() -> Vec<BinLocation> {
    [
        ("BIN-001", 40.7128, -74.0060),
        ("BIN-002", 40.7614, -73.9776),
        ("BIN-003", 40.7505, -73.9934),
        ("BIN-004", 40.7282, -73.7949),
        ("BIN-005", 40.6892, -74.0445),
    ]
    .into_iter()
    .map(|(id, lat, lng)| BinLocation {
        id: BinId::from(id),
        position: GeoPoint { lat, lng },
    })
    .collect()
}

/// Serves the built-in demo bins.
#[derive(Debug, Default)]
pub struct SeedSource;

#[async_trait]
impl BinSource for SeedSource {
    fn name(&self) -> &str {
        "seed"
    }

    async fn load(&self) -> Result<Vec<BinRecord>, SourceError> {
        Ok(seed_bins())
    }
}

/// Serves bins listed by the operator, e.g. in a configuration file.
#[derive(Debug, Clone)]
pub struct ConfiguredSource {
    bins: Vec<BinRecord>,
}

impl ConfiguredSource {
    /// Wrap an operator-provided list of bins.
    #[must_use]
    pub fn new(bins: Vec<BinRecord>) -> Self {
        Self { bins }
    }
}

#[async_trait]
impl BinSource for ConfiguredSource {
    fn name(&self) -> &str {
        "configured"
    }

    async fn load(&self) -> Result<Vec<BinRecord>, SourceError> {
        if self.bins.is_empty() {
            return Err(SourceError::Empty(self.name().to_owned()));
        }
        Ok(self.bins.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusTier;

    #[test]
    fn seed_matches_demo_readings() {
        let bins = seed_bins();
        let summary: Vec<(&str, u8, StatusTier)> = bins
            .iter()
            .map(|bin| (bin.id().0.as_str(), bin.fill_level().percent(), bin.status()))
            .collect();

        assert_eq!(
            summary,
            [
                ("BIN-001", 25, StatusTier::Low),
                ("BIN-002", 78, StatusTier::Medium),
                ("BIN-003", 92, StatusTier::High),
                ("BIN-004", 45, StatusTier::Low),
                ("BIN-005", 67, StatusTier::Medium),
            ]
        );
    }

    #[test]
    fn every_seed_bin_has_a_location() {
        let locations = bin_locations();
        for bin in seed_bins() {
            assert!(
                locations.iter().any(|location| &location.id == bin.id()),
                "{} has no location",
                bin.id()
            );
        }
    }

    #[tokio::test]
    async fn configured_source_rejects_empty_list() {
        let source = ConfiguredSource::new(Vec::new());
        assert_eq!(
            source.load().await,
            Err(SourceError::Empty("configured".to_owned()))
        );
    }

    #[tokio::test]
    async fn seed_source_serves_five_bins() {
        let bins = SeedSource.load().await;
        assert_eq!(bins.map(|bins| bins.len()), Ok(5));
    }
}
