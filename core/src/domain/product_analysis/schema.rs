use serde_json::json;

/// Returns the JSON schema for product analysis LLM responses
pub fn get_product_analysis_schema() -> serde_json::Value {
    let score = json!({ "type": "number", "minimum": 0, "maximum": 1 });

    json!({
        "type": "object",
        "properties": {
            "sentiment_score": score,
            "feature_quality_score": score,
            "brand_reliability_score": score,
            "rating_review_score": score,
            "consistency_score": score,
            "overall_score": score,
            "decision": {
                "type": "string",
                "enum": ["BUY", "NOT BUY"]
            },
            "reason": { "type": "string" },
            "key_features": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "pros": {
                "type": "array",
                "items": { "type": "string" }
            },
            "cons": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": [
            "sentiment_score", "feature_quality_score", "brand_reliability_score",
            "rating_review_score", "consistency_score", "overall_score",
            "decision", "reason", "key_features", "pros", "cons"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_analysis_fields() {
        let schema = get_product_analysis_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 11);
        for field in required {
            let name = field.as_str().unwrap();
            assert!(schema["properties"].get(name).is_some(), "{} not described", name);
        }
    }
}
