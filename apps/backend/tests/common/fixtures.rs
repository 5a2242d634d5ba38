//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Create a flashcard request body.
pub fn create_flashcard_request(question: &str, answer: &str) -> serde_json::Value {
    json!({ "question": question, "answer": answer })
}

/// Create a submit review request body.
pub fn submit_review_request(quality: i32, time_spent: Option<i32>) -> serde_json::Value {
    match time_spent {
        Some(secs) => json!({ "quality": quality, "timeSpent": secs }),
        None => json!({ "quality": quality }),
    }
}

/// Create a register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}
