pub mod analysis;
pub mod dashboard;
pub mod facts;
pub mod random;
pub mod selection;

pub use dashboard::*;
pub use facts::*;
pub use random::*;
pub use selection::*;
