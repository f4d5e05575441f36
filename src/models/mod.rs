pub mod chart;
pub mod ordered;
pub mod price;
pub mod search;
pub mod stats;

pub use chart::*;
pub use ordered::*;
pub use price::*;
pub use search::*;
pub use stats::*;
