use serde::Serialize;

/// Orange used for volcano markers.
pub const VOLCANO_ORANGE: [u8; 3] = [255, 119, 51];

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    pub visible: bool,
    pub pickable: bool,
    /// RGB, 0-255.
    pub color: [u8; 3],
    pub opacity: f32,
}

impl LayerStyle {
    pub const fn new(visible: bool, pickable: bool, color: [u8; 3], opacity: f32) -> Self {
        Self {
            visible,
            pickable,
            color,
            opacity,
        }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::new(true, true, VOLCANO_ORANGE, 0.10)
    }
}
