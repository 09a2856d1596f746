//! # Bikeshare Dashboard
//!
//! Local web dashboard for the hourly bike rental dataset.
//!
//! This is the binary crate that loads configuration and data at startup and
//! serves the date-range page and its three charts over axum.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

pub use error::*;
pub use router::create_router;
pub use state::AppState;
