//! Domain types: validated bars and the series built from them.

pub mod bar;
pub mod series;

pub use bar::{BarError, PriceBar};
pub use series::TimeSeries;
