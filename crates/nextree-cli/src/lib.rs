//! Nextree CLI internals.
//!
//! The binary is a thin wrapper over [`pipeline::run`]; the pieces live
//! here so the integration tests can drive the full
//! cache → extract → classify → enrich → export path without a network.

pub mod export;
pub mod fetch;
pub mod pipeline;
pub mod report;
