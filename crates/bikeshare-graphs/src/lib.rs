//! # Bikeshare Graphs
//!
//! Aggregation and chart rendering for hourly bike rental observations.
//!
//! Observations are loaded once into a date-sorted table. Each request
//! selects a date range, runs the weekday, month and hour aggregators over
//! the selection and renders the results as SVG charts using plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod data_loader;
pub mod manager;
pub mod observation;
pub mod range_filter;
pub mod traits;
pub mod types;
pub mod utils;

// Chart implementations
pub mod rent_by_dayofweek;
pub mod rent_by_hourofday;
pub mod rent_by_month;

pub use data_loader::*;
pub use manager::*;
pub use observation::*;
pub use range_filter::*;
pub use rent_by_dayofweek::*;
pub use rent_by_hourofday::*;
pub use rent_by_month::*;
pub use traits::*;
pub use types::*;
pub use utils::*;
