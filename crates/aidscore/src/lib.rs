//! Vulnerability scoring and aggregate analytics for aid-program beneficiaries.
//!
//! The crate turns validated household records into bounded, explainable
//! vulnerability scores and derives area-level resource-need forecasts,
//! health-pattern alerts, and migration-trend classifications from sets of
//! scored records. All components are stateless; records and scores are
//! supplied and returned in full on every call.

pub mod analytics;
pub mod config;
pub mod error;
pub mod intake;
pub mod scoring;
pub mod telemetry;
