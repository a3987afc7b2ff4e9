pub mod chart;
pub mod deck;
pub mod layer;
pub mod scatter;
pub mod symbology;
pub mod tooltip;
pub mod zoom;

pub use layer::*;
