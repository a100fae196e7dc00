use serde_json::Value;

use crate::domain::product_analysis::{
    entities::{ProductRecord, ReviewEntry, is_truthy, value_text},
    helpers::truncate_chars,
};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNKNOWN_BRAND: &str = "Unknown Brand";
pub const NO_RATING: &str = "No rating";
pub const NO_REVIEWS: &str = "No reviews available";
pub const NO_FEATURES: &str = "No features listed";

pub const MAX_REVIEWS: usize = 10;
pub const MAX_REVIEW_CHARS: usize = 200;

/// Builds the analysis instruction for one product. Never fails: missing
/// fields are replaced by their fallback text.
pub fn build_prompt(record: &ProductRecord) -> String {
    let product_name = product_name(record);
    let brand = brand(record);
    let rating = rating(record);
    let avg_rating = average_rating(&record.ratings());
    let reviews_text = reviews_text(&record.reviews());
    let features_text = features_text(&record.features());
    let raw_data = record.to_json_text();

    format!(
        r#"
You are an AI product analyst for an e-commerce platform.

Analyze the following Amazon product data and return a JSON response with these exact fields:
- sentiment_score (0–1): Based on customer reviews sentiment
- feature_quality_score (0–1): Based on product features and specifications
- brand_reliability_score (0–1): Based on brand reputation
- rating_review_score (0–1): Based on ratings and review quality
- consistency_score (0–1): How consistent are the reviews (detect fake reviews)
- overall_score (0–1): Weighted average of all scores
- decision (either "BUY" or "NOT BUY")
- reason (concise 2-3 sentence explanation)
- key_features (object/dict): Extract 4-6 key specifications like {{"RAM": "8GB", "Storage": "128GB", "Battery": "5000mAh", "Display": "6.5 inch"}}
- pros (array): List 3-5 positive points about the product
- cons (array): List 2-4 negative points or concerns about the product

Product Information:
===================
Product Name: {product_name}
Brand: {brand}
Rating: {rating}
Average Rating from Reviews: {avg_rating:.2}/5.0

Customer Reviews:
{reviews_text}

Features:
{features_text}

Additional Product Data:
{raw_data}

IMPORTANT: Return ONLY valid JSON, without any markdown code fences, explanations, or additional text.

Example format:
{{
  "sentiment_score": 0.8,
  "feature_quality_score": 0.9,
  "brand_reliability_score": 0.85,
  "rating_review_score": 0.88,
  "consistency_score": 0.82,
  "overall_score": 0.85,
  "decision": "BUY",
  "reason": "Product has excellent reviews and strong features. Brand is reliable with consistent positive feedback.",
  "key_features": {{
    "RAM": "8GB",
    "Storage": "256GB",
    "Battery": "5000mAh",
    "Display": "6.5 inch AMOLED",
    "Camera": "48MP Triple Camera",
    "Processor": "Snapdragon 8 Gen 2"
  }},
  "pros": [
    "Excellent battery life with 5000mAh capacity",
    "High-quality AMOLED display with vibrant colors",
    "Powerful processor for smooth performance",
    "Great value for money compared to competitors"
  ],
  "cons": [
    "Camera quality could be better in low light",
    "No wireless charging support",
    "Slightly heavy at 200g"
  ]
}}
"#
    )
}

fn first_truthy<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.as_ref())
        .find(|value| is_truthy(value))
}

fn product_name(record: &ProductRecord) -> String {
    first_truthy(&[&record.title, &record.product_title, &record.product_name])
        .map(value_text)
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
}

fn brand(record: &ProductRecord) -> String {
    record
        .brand
        .as_ref()
        .map(value_text)
        .unwrap_or_else(|| UNKNOWN_BRAND.to_string())
}

fn rating(record: &ProductRecord) -> String {
    first_truthy(&[&record.rating])
        .or(record.product_star_rating.as_ref())
        .map(value_text)
        .unwrap_or_else(|| NO_RATING.to_string())
}

/// Arithmetic mean, 0 for an empty list.
pub fn average_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

fn reviews_text(reviews: &[ReviewEntry]) -> String {
    if reviews.is_empty() {
        return NO_REVIEWS.to_string();
    }

    reviews
        .iter()
        .take(MAX_REVIEWS)
        .map(|review| format!("- {}", truncate_chars(&review.text(), MAX_REVIEW_CHARS)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn features_text(features: &[String]) -> String {
    if features.is_empty() {
        return NO_FEATURES.to_string();
    }

    features
        .iter()
        .map(|feature| format!("- {}", feature))
        .collect::<Vec<_>>()
        .join("\n")
}
