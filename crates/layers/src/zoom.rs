use serde::Serialize;

/// Marker radius (metres) per zoom level. Only levels 3..=8 are defined.
const RADIUS_BY_ZOOM_M: [(u8, f64); 6] = [
    (3, 60_000.0),
    (4, 40_000.0),
    (5, 20_000.0),
    (6, 10_000.0),
    (7, 5_000.0),
    (8, 2_500.0),
];

/// Fixed marker radius for country-wide maps.
pub const COUNTRY_RADIUS_M: f64 = 15_000.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ZoomOutOfRange {
    pub zoom: u8,
    pub min: u8,
    pub max: u8,
}

impl std::fmt::Display for ZoomOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "zoom {} outside radius table range {}..={}",
            self.zoom, self.min, self.max
        )
    }
}

impl std::error::Error for ZoomOutOfRange {}

/// Step function from zoom level to marker radius.
pub struct RadiusByZoom;

impl RadiusByZoom {
    pub const MIN_ZOOM: u8 = RADIUS_BY_ZOOM_M[0].0;
    pub const MAX_ZOOM: u8 = RADIUS_BY_ZOOM_M[RADIUS_BY_ZOOM_M.len() - 1].0;

    /// Zoom levels outside the table clamp to the nearest defined level.
    pub fn radius_m(zoom: u8) -> f64 {
        let z = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        // The clamped zoom is always in the table.
        Self::radius_m_strict(z).unwrap_or(COUNTRY_RADIUS_M)
    }

    pub fn radius_m_strict(zoom: u8) -> Result<f64, ZoomOutOfRange> {
        RADIUS_BY_ZOOM_M
            .iter()
            .find(|(z, _)| *z == zoom)
            .map(|(_, r)| *r)
            .ok_or(ZoomOutOfRange {
                zoom,
                min: Self::MIN_ZOOM,
                max: Self::MAX_ZOOM,
            })
    }
}

/// How marker radius is chosen for a map.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum RadiusPolicy {
    Fixed { radius_m: f64 },
    ByZoom,
}

impl RadiusPolicy {
    pub fn resolve(&self, zoom: u8) -> f64 {
        match self {
            RadiusPolicy::Fixed { radius_m } => *radius_m,
            RadiusPolicy::ByZoom => RadiusByZoom::radius_m(zoom),
        }
    }
}

/// Integer zoom slider bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ZoomControl {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl ZoomControl {
    /// Default sits at the midpoint of the range. `min > max` is swapped.
    pub fn new(min: u8, max: u8) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let default = min + (max - min) / 2;
        Self { min, max, default }
    }

    pub fn resolve(&self, requested: Option<u8>) -> u8 {
        requested
            .map(|z| z.clamp(self.min, self.max))
            .unwrap_or(self.default)
    }
}

impl Default for ZoomControl {
    fn default() -> Self {
        Self::new(RadiusByZoom::MIN_ZOOM, RadiusByZoom::MAX_ZOOM)
    }
}
