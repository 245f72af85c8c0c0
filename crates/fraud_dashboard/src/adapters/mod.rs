// Rust guideline compliant 2026-02-23

//! Adapters (secondary ports) for the fraud-dashboard binary.
//!
//! Each sub-module implements the `ScoringService` hexagonal port defined in
//! the `domain` crate. Adapters are intentionally isolated from encoder and
//! dashboard logic.

pub mod demo_scoring;
pub mod http_scoring;
