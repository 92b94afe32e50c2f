//! Domain data structures for bins, fill levels, and their derived status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::classify;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Operator-assigned identifier of a bin, e.g. `BIN-001`.
pub struct BinId(pub String);

impl fmt::Display for BinId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for BinId {
    fn from(id: &str) -> Self {
        BinId(id.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Kind of waste a bin accepts.
pub enum BinCategory {
    /// Fine particles and dust.
    TinyParticle,
    /// Plastics and packaging.
    Plastic,
    /// Metal scrap and cans.
    Metal,
    /// General solid waste.
    SolidWaste,
    /// Sanitary and medical waste.
    SanitaryWaste,
}

impl BinCategory {
    /// Every category, in the order the dashboard lists them.
    pub const ALL: [BinCategory; 5] = [
        BinCategory::TinyParticle,
        BinCategory::Plastic,
        BinCategory::Metal,
        BinCategory::SolidWaste,
        BinCategory::SanitaryWaste,
    ];

    /// Stable slug used in configuration files.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            BinCategory::TinyParticle => "tiny-particle",
            BinCategory::Plastic => "plastic",
            BinCategory::Metal => "metal",
            BinCategory::SolidWaste => "solid-waste",
            BinCategory::SanitaryWaste => "sanitary-waste",
        }
    }

    /// Card title for bins of this category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            BinCategory::TinyParticle => "Tiny Particle Bin",
            BinCategory::Plastic => "Plastic Bin",
            BinCategory::Metal => "Metal Bin",
            BinCategory::SolidWaste => "Solid Waste Bin",
            BinCategory::SanitaryWaste => "Sanitary Waste Bin",
        }
    }
}

impl fmt::Display for BinCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.slug())
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("fill level {0} is outside 0..=100")]
/// A fill level was rejected because it is not a percentage.
pub struct FillLevelOutOfRange(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u8")]
/// Fill percentage of a bin, always within `0..=100`.
pub struct FillLevel(u8);

impl FillLevel {
    /// An empty bin.
    pub const EMPTY: FillLevel = FillLevel(0);
    /// A bin filled to the brim.
    pub const FULL: FillLevel = FillLevel(100);

    /// Clamp an arbitrary integer into a valid fill level.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        let bounded = value.clamp(0, 100);
        // 0..=100 always fits
        FillLevel(u8::try_from(bounded).unwrap_or(100))
    }

    /// Percentage value.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Move the level by `delta` points, saturating at the bounds.
    #[must_use]
    pub fn shifted(self, delta: i32) -> Self {
        Self::clamped(i32::from(self.0).saturating_add(delta))
    }

    /// Status tier derived from this level.
    #[must_use]
    pub fn status(self) -> StatusTier {
        classify(i32::from(self.0))
    }
}

impl TryFrom<i32> for FillLevel {
    type Error = FillLevelOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(FillLevel)
            .ok_or(FillLevelOutOfRange(value))
    }
}

impl From<FillLevel> for u8 {
    fn from(level: FillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FillLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Recency marker shown next to a reading.
pub enum LastUpdated {
    /// Reading taken the given number of minutes ago.
    MinutesAgo(u32),
    /// Reading produced by the most recent refresh.
    #[default]
    JustNow,
}

impl fmt::Display for LastUpdated {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastUpdated::MinutesAgo(minutes) => write!(formatter, "{minutes} min ago"),
            LastUpdated::JustNow => formatter.write_str("Just now"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// One tracked waste container and its latest reading.
///
/// Identity and category are fixed at creation; only a refresh produces
/// records with a new fill level and recency marker.
pub struct BinRecord {
    id: BinId,
    category: BinCategory,
    fill_level: FillLevel,
    location: String,
    #[serde(default)]
    last_updated: LastUpdated,
}

impl BinRecord {
    /// Create a record from its parts.
    #[must_use]
    pub fn new<I: Into<BinId>, L: Into<String>>(
        id: I,
        category: BinCategory,
        fill_level: FillLevel,
        location: L,
        last_updated: LastUpdated,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            fill_level,
            location: location.into(),
            last_updated,
        }
    }

    /// Identifier of the bin.
    #[must_use]
    pub fn id(&self) -> &BinId {
        &self.id
    }

    /// Waste category of the bin.
    #[must_use]
    pub fn category(&self) -> BinCategory {
        self.category
    }

    /// Current fill level.
    #[must_use]
    pub fn fill_level(&self) -> FillLevel {
        self.fill_level
    }

    /// Free-text location label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Recency of the current reading.
    #[must_use]
    pub fn last_updated(&self) -> LastUpdated {
        self.last_updated
    }

    /// Status tier of the current reading.
    #[must_use]
    pub fn status(&self) -> StatusTier {
        self.fill_level.status()
    }

    pub(crate) fn with_reading(&self, fill_level: FillLevel, last_updated: LastUpdated) -> Self {
        Self {
            fill_level,
            last_updated,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Discrete classification of a fill level.
pub enum StatusTier {
    /// Below 60%.
    Low,
    /// From 60% up to 84%.
    Medium,
    /// 85% and above, collection due.
    High,
}

impl fmt::Display for StatusTier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusTier::Low => "Low",
            StatusTier::Medium => "Medium",
            StatusTier::High => "High",
        };
        formatter.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Latitude/longitude pair in decimal degrees.
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Mock position of a bin shown on the map screen.
pub struct BinLocation {
    /// Bin this position belongs to.
    pub id: BinId,
    /// Where the bin stands.
    pub position: GeoPoint,
}
