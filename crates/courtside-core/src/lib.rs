//! courtside-core — Assessment lifecycle engine.
//!
//! This crate defines the data model, validation, scoring, access-code, and
//! batch-aggregation rules for the tournament portal's certification
//! assessments, plus the trait boundary to the portal's persistence API.

pub mod batch;
pub mod codes;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod service;
pub mod submission;
pub mod traits;
