//! Response Envelope
//!
//! Every endpoint answers with `{success, data?, message?, count?}`.
//! Absent fields are omitted from the JSON body.

use serde::Serialize;

/// JSON response envelope
///
/// ## Examples
/// ```rust
/// use kernel::envelope::ApiResponse;
///
/// let body = ApiResponse::ok(vec![1, 2, 3]).with_count(3);
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["count"], 3);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
        }
    }

    /// Successful list response; `count` is the number of items returned
    pub fn list(items: Vec<T>) -> ApiResponse<Vec<T>> {
        let count = items.len();
        ApiResponse::ok(items).with_count(count)
    }

    /// Failed response with a message and no data
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::ok("x")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "x");
        assert!(json.get("message").is_none());
        assert!(json.get("count").is_none());
    }

    #[test]
    fn test_list_sets_count() {
        let json = serde_json::to_value(ApiResponse::<u8>::list(vec![1, 2])).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_failure() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("Donation not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Donation not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_with_message() {
        let body = ApiResponse::ok(1).with_message("Donation created successfully");
        assert_eq!(body.message.as_deref(), Some("Donation created successfully"));
    }
}
