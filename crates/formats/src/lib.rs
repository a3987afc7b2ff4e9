pub mod dataset;
pub mod geojson;
pub mod record;

pub use dataset::*;
pub use geojson::*;
pub use record::*;
