//! Defensive projections over loosely-typed FHIR payloads.
//!
//! Resource bodies are stored verbatim as semi-structured JSON; the store
//! additionally keeps a few typed scalar columns extracted here. Missing or
//! mistyped fields always resolve to absence, never to an error.

use serde_json::Value;

/// Extract the Patient external id from a clinical resource's
/// `subject.reference` field.
///
/// Only references of the form `"Patient/<id>"` produce a value; a missing
/// `subject`, a reference to any other kind (`"Group/g1"`), or a non-string
/// reference all yield `None`.
#[must_use]
pub fn extract_subject_patient_id(payload: &Value) -> Option<String> {
    payload
        .get("subject")?
        .get("reference")?
        .as_str()?
        .strip_prefix("Patient/")
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Patient-specific scalar fields projected out of the raw payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFields {
    /// Administrative gender, as the payload spells it.
    pub gender: Option<String>,
    /// Raw FHIR date string; stored as-is, never parsed into a date type.
    pub birth_date: Option<String>,
    /// Whether the patient record is in active use. `None` when the payload
    /// does not carry a boolean `active` field.
    pub active: Option<bool>,
}

impl PatientFields {
    /// Extract the projected fields from a Patient payload.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            gender: payload
                .get("gender")
                .and_then(Value::as_str)
                .map(str::to_string),
            birth_date: payload
                .get("birthDate")
                .and_then(Value::as_str)
                .map(str::to_string),
            active: payload.get("active").and_then(Value::as_bool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_reference_extracted() {
        let payload = json!({"subject": {"reference": "Patient/p1"}});
        assert_eq!(extract_subject_patient_id(&payload), Some("p1".to_string()));
    }

    #[test]
    fn test_non_patient_reference_ignored() {
        let payload = json!({"subject": {"reference": "Group/g1"}});
        assert_eq!(extract_subject_patient_id(&payload), None);
    }

    #[test]
    fn test_missing_subject_ignored() {
        let payload = json!({"id": "obs-1", "status": "final"});
        assert_eq!(extract_subject_patient_id(&payload), None);
    }

    #[test]
    fn test_mistyped_reference_ignored() {
        let payload = json!({"subject": {"reference": 42}});
        assert_eq!(extract_subject_patient_id(&payload), None);

        let payload = json!({"subject": "Patient/p1"});
        assert_eq!(extract_subject_patient_id(&payload), None);
    }

    #[test]
    fn test_empty_patient_id_ignored() {
        let payload = json!({"subject": {"reference": "Patient/"}});
        assert_eq!(extract_subject_patient_id(&payload), None);
    }

    #[test]
    fn test_patient_fields_full() {
        let payload = json!({
            "gender": "female",
            "birthDate": "1984-07-12",
            "active": false,
        });
        let fields = PatientFields::from_payload(&payload);
        assert_eq!(fields.gender.as_deref(), Some("female"));
        assert_eq!(fields.birth_date.as_deref(), Some("1984-07-12"));
        assert_eq!(fields.active, Some(false));
    }

    #[test]
    fn test_patient_fields_mistyped_resolve_to_absence() {
        let payload = json!({
            "gender": {"coding": []},
            "birthDate": 1984,
            "active": "yes",
        });
        assert_eq!(PatientFields::from_payload(&payload), PatientFields::default());
    }
}
