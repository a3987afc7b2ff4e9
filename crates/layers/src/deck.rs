use foundation::GeoPoint;
use serde::Serialize;

use crate::scatter::ScatterplotSnapshot;
use crate::tooltip::TooltipStyle;

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/outdoors-v11";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl ViewState {
    pub fn centered(center: GeoPoint, zoom: u8) -> Self {
        Self {
            latitude: center.lat_deg,
            longitude: center.lon_deg,
            zoom,
        }
    }
}

/// Everything a deck-style map renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckSnapshot {
    pub map_style: String,
    pub initial_view_state: ViewState,
    pub layers: Vec<ScatterplotSnapshot>,
    pub tooltip_style: TooltipStyle,
}

impl DeckSnapshot {
    pub fn new(view: ViewState, layers: Vec<ScatterplotSnapshot>) -> Self {
        Self {
            map_style: DEFAULT_MAP_STYLE.to_string(),
            initial_view_state: view,
            layers,
            tooltip_style: TooltipStyle::default(),
        }
    }
}
