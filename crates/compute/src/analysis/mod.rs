pub mod distribution;
pub mod statistics;

pub use distribution::*;
pub use statistics::*;
