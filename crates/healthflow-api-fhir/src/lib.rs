//! Proxy and sync HTTP API for the HealthFlow FHIR service.
//!
//! Two routers: [`proxy_router`] is the CRUD surface over the local
//! resource store (or, in forward mode, a transparent pass-through to the
//! upstream registry), and [`sync_router`] triggers and inspects registry
//! synchronization.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

pub use error::{ApiFhirError, ProblemDetails};
pub use router::{proxy_router, sync_router, FhirApiState, ProxyMode};
