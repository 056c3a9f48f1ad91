//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the PUT operation (POST /cache)
///
/// Missing fields deserialize as empty strings so they are reported through
/// the same validation path as explicitly empty ones.
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    #[serde(default)]
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: String,
}

impl PutRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() || self.value.is_empty() {
            return Some("Both key and value are required.".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_put_request_missing_value() {
        let json = r#"{"key": "test"}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert!(req.value.is_empty());
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_key() {
        let req = PutRequest {
            key: "".to_string(),
            value: "test".to_string(),
        };
        assert_eq!(
            req.validate().as_deref(),
            Some("Both key and value are required.")
        );
    }
}
