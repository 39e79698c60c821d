//! Motor installation sizing.
//!
//! Given a three-phase induction motor from the [`catalog`], the
//! [`dimensioning`] rules pick its branch cable, overcurrent protection,
//! contactor and starting device, and roll a whole project up into one
//! service-entrance recommendation. [`report`] shapes those results for a
//! document renderer.

pub mod catalog;
pub mod config;
pub mod dimensioning;
pub mod error;
pub mod report;
pub mod telemetry;
pub mod utils;

pub use catalog::{all_ratings, by_power, resolve, MotorRating};
pub use dimensioning::{
    dimension, summarize, summarize_default, try_dimension, try_summarize, DimensioningResult,
    InstallationParams, ProjectSummary, SummaryPolicy,
};
pub use error::SizingError;
