//! Shared domain vocabulary for the HealthFlow FHIR proxy.
//!
//! This crate holds the types every other crate agrees on: the set of FHIR
//! resource kinds the proxy handles, and the defensive projections extracted
//! from loosely-typed resource payloads.

pub mod kind;
pub mod projection;

pub use kind::{ParseResourceKindError, ResourceKind};
pub use projection::{extract_subject_patient_id, PatientFields};
