//! Shut down bench service processes listening on the configured port family.
//!
//! The bench runs five services whose ports share a common suffix digit,
//! taken from the Redis cache configuration. This crate reads that suffix,
//! probes each target port, and stops whatever still listens there with a
//! graceful shutdown directive followed by a best-effort forceful reclaim.

pub mod cli;
pub mod config;
pub mod error;
pub mod ports;
pub mod reclaim;
pub mod stopper;
