//! Core valuation types and logic. No I/O.

pub mod financials;
pub mod sector;
pub mod valuation;
pub mod quality;
pub mod assessment;
pub mod analysis;
pub mod scoring;
pub mod recommender;
pub mod report;
pub mod universe;
pub mod config_validation;
pub mod error;
