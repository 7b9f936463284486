//! Wire contract with the prediction service

use serde::{Deserialize, Deserializer, Serialize};

/// Request body for `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub user_input: String,
}

/// Successful prediction response.
///
/// `probabilities` keeps the document order of the JSON object so the chart
/// renders labels in the order the service emitted them.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResult {
    pub predicted_disease: String,
    pub advice: String,
    #[serde(deserialize_with = "ordered_map")]
    pub probabilities: Vec<(String, f64)>,
    /// Symptom tokens the service matched in the input.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Server-rendered PDF report, relative to the service base URL.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Deserialize a JSON object as ordered (label, value) pairs.
///
/// Going through a map type would lose insertion order; a visitor sees the
/// entries in document order.
fn ordered_map<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedMap;

    impl<'de> serde::de::Visitor<'de> for OrderedMap {
        type Value = Vec<(String, f64)>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of label to number")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, f64>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedMap)
}

/// Whether an `error` field marks the response body as a failure.
///
/// The service signals application errors with `{"error": ...}` where the
/// value is anything truthy in the JavaScript sense; `false`, `null`, `0`,
/// `""` and `NaN` do not count.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn probabilities_keep_document_order() {
        let body = r#"{
            "predicted_disease": "Flu",
            "advice": "Rest and hydrate",
            "probabilities": {"Flu": 0.8, "Cold": 0.15, "Allergy": 0.05}
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        let labels: Vec<&str> = result.probabilities.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Flu", "Cold", "Allergy"]);
        assert_eq!(result.probabilities[0].1, 0.8);
        assert!(result.symptoms.is_empty());
        assert!(result.pdf_url.is_none());
    }

    #[test]
    fn optional_fields_are_parsed_when_present() {
        let body = r#"{
            "predicted_disease": "Flu",
            "advice": "Rest",
            "probabilities": {"Flu": 80.0},
            "symptoms": ["fever", "cough"],
            "pdf_url": "/static/report.pdf"
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.symptoms, ["fever", "cough"]);
        assert_eq!(result.pdf_url.as_deref(), Some("/static/report.pdf"));
    }

    #[test]
    fn truthiness_follows_javascript_rules() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("No recognizable symptoms found.")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({"code": 500})));
        assert!(is_truthy(&json!([])));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
    }
}
