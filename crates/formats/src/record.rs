use foundation::GeoPoint;
use serde::{Deserialize, Serialize};

/// One row of the volcano table, projected to the columns the dashboard uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoRecord {
    pub country: String,
    pub name: String,
    pub primary_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl VolcanoRecord {
    pub fn new(
        country: impl Into<String>,
        name: impl Into<String>,
        primary_type: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            country: country.into(),
            name: name.into(),
            primary_type: primary_type.into(),
            elevation_m: None,
            location,
            link: None,
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = Some(elevation_m);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sort key: (country, name), byte-wise and case-sensitive.
    pub fn sort_key(&self) -> (&str, &str) {
        (self.country.as_str(), self.name.as_str())
    }
}
