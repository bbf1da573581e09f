//! The statistics engine: five independent blocks computed over a
//! [`FilteredDataset`](crate::model::FilteredDataset).
//!
//! Each block is a pure constructor plus a `lines()` renderer producing
//! a fixed-order list of display lines. Values that are undefined on an
//! empty dataset render the [`NO_DATA`] sentinel instead of failing.

pub mod age;
pub mod freq;
pub mod station;
pub mod time;
pub mod trip;
pub mod user;

/// Sentinel line shown wherever a statistic is undefined because the
/// filtered dataset is empty.
pub const NO_DATA: &str = "No data";
