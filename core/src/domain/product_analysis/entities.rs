use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// One product as sent by the caller. The known keys are exposed as loosely
/// typed views; `fields` keeps the object exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ProductRecord {
    pub title: Option<Value>,
    pub product_title: Option<Value>,
    pub product_name: Option<Value>,
    pub brand: Option<Value>,
    pub rating: Option<Value>,
    pub product_star_rating: Option<Value>,
    pub reviews: Option<Value>,
    pub ratings: Option<Value>,
    pub features: Option<Value>,
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(fields: Map<String, Value>) -> Self {
        // `null` reads as absent in the views but stays in `fields`.
        let known = |key: &str| fields.get(key).filter(|value| !value.is_null()).cloned();

        Self {
            title: known("title"),
            product_title: known("product_title"),
            product_name: known("product_name"),
            brand: known("brand"),
            rating: known("rating"),
            product_star_rating: known("product_star_rating"),
            reviews: known("reviews"),
            ratings: known("ratings"),
            features: known("features"),
            fields,
        }
    }
}

/// A single review as found in the `reviews` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReviewEntry {
    Text(String),
    Structured(Map<String, Value>),
    Other(Value),
}

impl ReviewEntry {
    /// Keys tried, in order, on structured reviews.
    pub const COMMENT_KEYS: [&'static str; 2] = ["review_comment", "review_text"];

    pub fn text(&self) -> String {
        match self {
            ReviewEntry::Text(text) => text.clone(),
            ReviewEntry::Structured(fields) => Self::COMMENT_KEYS
                .iter()
                .find_map(|key| fields.get(*key))
                .map(value_text)
                .unwrap_or_else(|| Value::Object(fields.clone()).to_string()),
            ReviewEntry::Other(value) => value_text(value),
        }
    }
}

impl ProductRecord {
    /// Decodes a raw request body. The body must be UTF-8 JSON holding an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        let text = std::str::from_utf8(body)
            .map_err(|e| CoreError::RequestBodyInvalid(format!("invalid UTF-8: {}", e)))?;

        let value: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::RequestBodyInvalid(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(fields.into()),
            other => Err(CoreError::RequestBodyInvalid(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Top-level keys in the order they were sent, for diagnostics.
    pub fn keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn reviews(&self) -> Vec<ReviewEntry> {
        match &self.reviews {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| {
                    serde_json::from_value(entry.clone())
                        .unwrap_or_else(|_| ReviewEntry::Other(entry.clone()))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Numeric entries of `ratings`; anything else is skipped.
    pub fn ratings(&self) -> Vec<f64> {
        match &self.ratings {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_f64).collect(),
            _ => Vec::new(),
        }
    }

    pub fn features(&self) -> Vec<String> {
        match &self.features {
            Some(Value::Array(values)) => values.iter().map(value_text).collect(),
            _ => Vec::new(),
        }
    }

    /// Compact JSON text of the record as received.
    pub fn to_json_text(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// The analysis shape requested from the model. Responses are passed through
/// as received; this type documents and reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub sentiment_score: f64,
    pub feature_quality_score: f64,
    pub brand_reliability_score: f64,
    pub rating_review_score: f64,
    pub consistency_score: f64,
    pub overall_score: f64,
    pub decision: Decision,
    pub reason: String,
    pub key_features: HashMap<String, String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Decision {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "NOT BUY")]
    NotBuy,
}

/// Plain text of a JSON value: strings unquoted, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Python-style truthiness, used by the field fallback chains.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(values) => !values.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_slice_keeps_unknown_fields() {
        let record =
            ProductRecord::from_slice(br#"{"title":"Phone X","price":"$199","color":"red"}"#)
                .unwrap();
        assert_eq!(record.title, Some(json!("Phone X")));
        assert_eq!(record.get("price"), Some(&json!("$199")));
        assert_eq!(record.get("color"), Some(&json!("red")));
    }

    #[test]
    fn test_from_slice_rejects_malformed_json() {
        let err = ProductRecord::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, CoreError::RequestBodyInvalid(_)));
        assert!(err.to_string().starts_with("Failed to parse request body as JSON"));
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        let err = ProductRecord::from_slice(b"[1, 2, 3]").unwrap_err();
        assert_eq!(
            err,
            CoreError::RequestBodyInvalid("expected a JSON object, found an array".to_string())
        );
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = ProductRecord::from_slice(&[0xff, 0xfe, b'{']).unwrap_err();
        assert!(matches!(err, CoreError::RequestBodyInvalid(_)));
    }

    #[test]
    fn test_from_slice_tolerates_odd_field_types() {
        let record = ProductRecord::from_slice(
            br#"{"reviews":"great","ratings":{"a":1},"features":"none","rating":4.5}"#,
        )
        .unwrap();
        assert!(record.reviews().is_empty());
        assert!(record.ratings().is_empty());
        assert!(record.features().is_empty());
        assert_eq!(record.rating, Some(json!(4.5)));
    }

    #[test]
    fn test_review_entry_text() {
        let record: ProductRecord = serde_json::from_value(json!({
            "reviews": [
                "Plain review",
                {"review_comment": "Comment field", "review_text": "ignored"},
                {"review_text": "Text field"},
                {"stars": 5},
                42
            ]
        }))
        .unwrap();
        let texts: Vec<String> = record.reviews().iter().map(ReviewEntry::text).collect();
        assert_eq!(
            texts,
            vec![
                "Plain review".to_string(),
                "Comment field".to_string(),
                "Text field".to_string(),
                r#"{"stars":5}"#.to_string(),
                "42".to_string(),
            ]
        );
    }

    #[test]
    fn test_ratings_skip_non_numeric() {
        let record: ProductRecord =
            serde_json::from_value(json!({"ratings": [4, "five", 3.5, null]})).unwrap();
        assert_eq!(record.ratings(), vec![4.0, 3.5]);
    }

    #[test]
    fn test_keys_follow_request_order() {
        let record = ProductRecord::from_slice(br#"{"zeta":1,"brand":"Acme","title":"X"}"#)
            .unwrap();
        assert_eq!(record.keys(), vec!["zeta", "brand", "title"]);
    }

    #[test]
    fn test_null_known_fields_stay_in_record() {
        let record =
            ProductRecord::from_slice(br#"{"brand":null,"title":null,"price":null}"#).unwrap();

        assert_eq!(record.brand, None);
        assert_eq!(record.title, None);
        assert_eq!(record.keys(), vec!["brand", "title", "price"]);
        assert_eq!(
            record.to_json_text(),
            r#"{"brand":null,"title":null,"price":null}"#
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(4.2)));
    }

    #[test]
    fn test_analysis_result_decision_labels() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "sentiment_score": 0.8,
            "feature_quality_score": 0.9,
            "brand_reliability_score": 0.85,
            "rating_review_score": 0.88,
            "consistency_score": 0.82,
            "overall_score": 0.85,
            "decision": "NOT BUY",
            "reason": "Mixed reviews.",
            "key_features": {"RAM": "8GB"},
            "pros": ["Cheap"],
            "cons": ["Slow"]
        }))
        .unwrap();
        assert_eq!(result.decision, Decision::NotBuy);
        assert_eq!(serde_json::to_value(Decision::Buy).unwrap(), json!("BUY"));
    }
}
