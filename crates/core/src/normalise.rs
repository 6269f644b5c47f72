//! Row normalisation.
//!
//! Turns raw storage rows into response records. Every function here is total: a row always
//! produces a record, and bad stored chat history degrades to an empty list with a warning.

use crate::rows::{DiagnosisRow, PatientRow};
use api_shared::{DiagnosisRecord, PatientRecord};
use serde_json::Value;

pub fn normalise_patient(row: PatientRow) -> PatientRecord {
    PatientRecord {
        patient_id: row.patient_id.into_string(),
        gender: row.gender,
        age: row.age,
        practitioner_id: row.practitioner_id.into_string(),
        created_at: row.created_at,
    }
}

pub fn normalise_diagnosis(row: DiagnosisRow) -> DiagnosisRecord {
    let diagnosis_id = row.diagnosis_id.into_string();
    let chat_history = parse_chat_history(&diagnosis_id, row.chat_history.as_deref());

    DiagnosisRecord {
        diagnosis_id,
        patient_id: row.patient_id.into_string(),
        practitioner_id: row.practitioner_id.into_string(),
        age: row.age,
        gender: row.gender,
        respiratory_rate: row.respiratory_rate,
        oxygen_saturation: row.oxygen_saturation,
        height: row.height,
        weight: row.weight,
        heart_rate: row.heart_rate,
        temperature: row.temperature,
        lung_sound: row.lung_sound,
        presenting_symptoms: row.presenting_symptoms,
        diagnosis_summary: row.diagnosis_summary,
        doctor_notes: row.doctor_notes,
        chat_history,
        status: row.status,
        diagnosis_date: row.diagnosis_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Decode stored chat history into its ordered messages.
///
/// Null or blank text yields an empty list. A JSON string holding a JSON array (history that
/// was encoded twice on the way in) is decoded one more time. Anything else that is not a JSON
/// array is logged against `diagnosis_id` and replaced with an empty list.
pub fn parse_chat_history(diagnosis_id: &str, raw: Option<&str>) -> Vec<Value> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(Value::String(inner)) => serde_json::from_str::<Value>(&inner),
        other => other,
    };

    match parsed {
        Ok(Value::Array(messages)) => messages,
        Ok(other) => {
            tracing::warn!(
                "chat history for diagnosis {} is a JSON {}, not an array; returning empty history",
                diagnosis_id,
                json_kind(&other)
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(
                "failed to parse chat history for diagnosis {}: {}; returning empty history",
                diagnosis_id,
                e
            );
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RawId;
    use serde_json::json;
    use uuid::Uuid;

    fn diagnosis_row(chat_history: Option<&str>) -> DiagnosisRow {
        DiagnosisRow {
            diagnosis_id: RawId::from("d1"),
            patient_id: RawId::from("p1"),
            practitioner_id: RawId::from("pr1"),
            age: Some(34),
            gender: Some("female".into()),
            respiratory_rate: Some(18.0),
            oxygen_saturation: Some(97.5),
            height: None,
            weight: None,
            heart_rate: Some(72.0),
            temperature: Some(37.1),
            lung_sound: Some("clear".into()),
            presenting_symptoms: Some("cough".into()),
            diagnosis_summary: None,
            doctor_notes: None,
            chat_history: chat_history.map(str::to_string),
            status: Some("complete".into()),
            diagnosis_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_chat_history_array_is_decoded_in_order() {
        let history = parse_chat_history(
            "d1",
            Some(r#"[{"role":"user","content":"hi"},{"role":"assistant"}]"#),
        );
        assert_eq!(
            history,
            vec![json!({"role": "user", "content": "hi"}), json!({"role": "assistant"})]
        );
    }

    #[test]
    fn test_chat_history_missing_or_blank_is_empty() {
        assert!(parse_chat_history("d1", None).is_empty());
        assert!(parse_chat_history("d1", Some("")).is_empty());
        assert!(parse_chat_history("d1", Some("   ")).is_empty());
    }

    #[test]
    fn test_chat_history_unparsable_is_empty() {
        assert!(parse_chat_history("d1", Some("[{\"role\":")).is_empty());
        assert!(parse_chat_history("d1", Some("not json at all")).is_empty());
    }

    #[test]
    fn test_chat_history_non_array_json_is_empty() {
        assert!(parse_chat_history("d1", Some(r#"{"role":"user"}"#)).is_empty());
        assert!(parse_chat_history("d1", Some("null")).is_empty());
        assert!(parse_chat_history("d1", Some("42")).is_empty());
    }

    #[test]
    fn test_chat_history_double_encoded_is_decoded_once_more() {
        let stored = serde_json::to_string(r#"[{"role":"user"}]"#).unwrap();
        assert_eq!(
            parse_chat_history("d1", Some(&stored)),
            vec![json!({"role": "user"})]
        );
    }

    #[test]
    fn test_normalise_diagnosis_decodes_history_and_keeps_fields() {
        let record = normalise_diagnosis(diagnosis_row(Some(r#"[{"role":"user"}]"#)));
        assert_eq!(record.diagnosis_id, "d1");
        assert_eq!(record.chat_history, vec![json!({"role": "user"})]);
        assert_eq!(record.status.as_deref(), Some("complete"));
        assert_eq!(record.oxygen_saturation, Some(97.5));
        assert_eq!(record.lung_sound.as_deref(), Some("clear"));
    }

    #[test]
    fn test_normalise_diagnosis_coerces_uuid_identifiers() {
        let diagnosis_id = Uuid::new_v4();
        let patient_id = Uuid::new_v4();
        let mut row = diagnosis_row(None);
        row.diagnosis_id = RawId::from(diagnosis_id);
        row.patient_id = RawId::from(patient_id);

        let record = normalise_diagnosis(row);
        assert_eq!(record.diagnosis_id, diagnosis_id.to_string());
        assert_eq!(record.patient_id, patient_id.to_string());
        assert!(record.chat_history.is_empty());

        let value = serde_json::to_value(&record).unwrap();
        assert!(value["diagnosis_id"].is_string());
        assert!(value["chat_history"].is_array());
    }

    #[test]
    fn test_normalise_patient_passes_fields_through() {
        let patient_id = Uuid::new_v4();
        let record = normalise_patient(PatientRow {
            patient_id: RawId::from(patient_id),
            gender: Some("male".into()),
            age: Some(61),
            practitioner_id: RawId::from("pr1"),
            created_at: None,
        });
        assert_eq!(record.patient_id, patient_id.to_string());
        assert_eq!(record.practitioner_id, "pr1");
        assert_eq!(record.age, Some(61));
        assert_eq!(record.gender.as_deref(), Some("male"));
    }
}
