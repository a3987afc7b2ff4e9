use formats::VolcanoRecord;
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;
use crate::tooltip::{TooltipMode, render_tooltip};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScatterplotLayer {
    id: LayerId,
    pub style: LayerStyle,
    pub tooltip: TooltipMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub primary_type: String,
    /// [lon, lat]
    pub position: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    pub tooltip_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterplotSnapshot {
    pub id: LayerId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub pickable: bool,
    pub opacity: f32,
    pub color: [u8; 3],
    pub radius_m: f64,
    pub points: Vec<ScatterPoint>,
}

impl ScatterplotLayer {
    pub fn new(id: u64, tooltip: TooltipMode) -> Self {
        Self {
            id: LayerId(id),
            style: LayerStyle::default(),
            tooltip,
        }
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn extract<'a>(
        &self,
        records: impl IntoIterator<Item = &'a VolcanoRecord>,
        radius_m: f64,
    ) -> ScatterplotSnapshot {
        let points = if self.style.visible {
            records
                .into_iter()
                .map(|r| ScatterPoint {
                    name: r.name.clone(),
                    primary_type: r.primary_type.clone(),
                    position: r.location.lon_lat(),
                    elevation_m: r.elevation_m,
                    tooltip_html: render_tooltip(r, self.tooltip),
                })
                .collect()
        } else {
            Vec::new()
        };

        ScatterplotSnapshot {
            id: self.id,
            kind: self.kind(),
            pickable: self.style.pickable,
            opacity: self.style.opacity,
            color: self.style.color,
            radius_m,
            points,
        }
    }
}

impl Layer for ScatterplotLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "ScatterplotLayer"
    }
}

#[cfg(test)]
mod tests {
    use super::ScatterplotLayer;
    use crate::symbology::{LayerStyle, VOLCANO_ORANGE};
    use crate::tooltip::TooltipMode;
    use formats::VolcanoRecord;
    use foundation::GeoPoint;

    fn records() -> Vec<VolcanoRecord> {
        vec![
            VolcanoRecord::new("Indonesia", "Krakatau", "Caldera", GeoPoint::new(-6.102, 105.423)),
            VolcanoRecord::new("Indonesia", "Merapi", "Stratovolcano", GeoPoint::new(-7.54, 110.446)),
        ]
    }

    #[test]
    fn extracts_one_point_per_record() {
        let layer = ScatterplotLayer::new(1, TooltipMode::Coordinates);
        let snap = layer.extract(&records(), 15_000.0);
        assert_eq!(snap.kind, "ScatterplotLayer");
        assert_eq!(snap.points.len(), 2);
        assert_eq!(snap.points[0].position, [105.423, -6.102]);
        assert_eq!(snap.color, VOLCANO_ORANGE);
        assert!((snap.opacity - 0.10).abs() < 1e-6);
        assert!(snap.pickable);
        assert_eq!(snap.radius_m, 15_000.0);
    }

    #[test]
    fn hidden_layer_has_no_points() {
        let layer = ScatterplotLayer::new(1, TooltipMode::Coordinates).with_style(LayerStyle {
            visible: false,
            ..LayerStyle::default()
        });
        assert!(layer.extract(&records(), 1.0).points.is_empty());
    }

    #[test]
    fn serializes_layer_type_tag() {
        let layer = ScatterplotLayer::new(7, TooltipMode::Elevation);
        let v = serde_json::to_value(layer.extract(&records(), 20_000.0)).unwrap();
        assert_eq!(v["type"], "ScatterplotLayer");
        assert_eq!(v["id"], 7);
        assert!(v["points"][0].get("elevation_m").is_none());
    }
}
