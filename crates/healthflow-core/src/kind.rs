//! FHIR resource kinds known to the local store.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A FHIR resource kind handled by the proxy.
///
/// The variant names match the FHIR resource type strings exactly, which is
/// also how kinds appear in URL path segments and upstream bundle requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Patient,
    Encounter,
    Observation,
    Condition,
    Bundle,
}

impl ResourceKind {
    /// The kinds pulled from the upstream registry on every sync cycle.
    /// Bundles are only ever created locally and are never synced.
    pub const SYNCED: [ResourceKind; 4] = [
        ResourceKind::Patient,
        ResourceKind::Encounter,
        ResourceKind::Observation,
        ResourceKind::Condition,
    ];

    /// The FHIR resource type string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Encounter => "Encounter",
            Self::Observation => "Observation",
            Self::Condition => "Condition",
            Self::Bundle => "Bundle",
        }
    }

    /// Whether resources of this kind carry a `subject.reference` pointing
    /// at a Patient.
    #[must_use]
    pub fn has_patient_reference(&self) -> bool {
        matches!(self, Self::Encounter | Self::Observation | Self::Condition)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource kind string.
#[derive(Debug, Clone, Error)]
#[error("Unknown resource kind: {0}")]
pub struct ParseResourceKindError(pub String);

impl std::str::FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Self::Patient),
            "Encounter" => Ok(Self::Encounter),
            "Observation" => Ok(Self::Observation),
            "Condition" => Ok(Self::Condition),
            "Bundle" => Ok(Self::Bundle),
            other => Err(ParseResourceKindError(other.to_string())),
        }
    }
}
