//! Domain logic for the GreenThreads design studio.
//!
//! Everything here is pure: option catalogs and form resolution, prompt
//! and fallback catalogs, score extraction, dashboard aggregation, and
//! the trait seams the generative adapters implement.

pub mod advisory;
pub mod care;
pub mod catalog;
pub mod dashboard;
pub mod design;
pub mod error;
pub mod fabric;
pub mod generation;
pub mod production;
pub mod scoring;
pub mod textile;
pub mod types;
