use serde::{Deserialize, Serialize};

/// A single geotagged, timestamped observation
///
/// Every numeric field is optional: the host may hand over rows where an
/// attribute could not be resolved. Lookups report such fields as missing
/// and the distance metrics decide what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Caller-supplied identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Timestamp in caller-defined units (expected: milliseconds since an epoch)
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl Record {
    /// Create a fully populated record without an id
    pub fn new(longitude: f64, latitude: f64, timestamp: f64) -> Self {
        Self {
            id: None,
            longitude: Some(longitude),
            latitude: Some(latitude),
            timestamp: Some(timestamp),
        }
    }

    /// Attach an identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Longitude, or `None` if absent or not a finite number
    pub fn longitude(&self) -> Option<f64> {
        finite(self.longitude)
    }

    /// Latitude, or `None` if absent or not a finite number
    pub fn latitude(&self) -> Option<f64> {
        finite(self.latitude)
    }

    /// Timestamp, or `None` if absent or not a finite number
    ///
    /// A NaN or infinite timestamp is treated as missing, so the record sits
    /// at temporal distance 0 from every other record instead of failing
    /// every neighbor comparison.
    pub fn timestamp(&self) -> Option<f64> {
        finite(self.timestamp)
    }

    /// `(longitude, latitude)` if both are present
    ///
    /// Non-finite coordinates count as missing, which puts the record at
    /// spatial distance 0 from every other record.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.longitude()?, self.latitude()?))
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
