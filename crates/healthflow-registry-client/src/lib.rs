//! HTTP client for the upstream FHIR registry.
//!
//! Wraps a process-wide `reqwest::Client` with the two outbound surfaces
//! the proxy needs: bundle collection fetches for the sync path, and
//! single-resource pass-throughs for forward-proxy mode.

pub mod client;
pub mod error;

pub use client::RegistryClient;
pub use error::{RegistryClientError, RegistryClientResult};
