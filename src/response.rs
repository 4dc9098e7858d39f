use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope. `response` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub response: Value,
}

/// Provider-reported error or warning. Warnings (`warn_*`) arrive with
/// `success: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ApiError {
    pub fn is_warning(&self) -> bool {
        self.code.starts_with("warn_")
    }
}

/// `response` of a batch call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchBody {
    #[serde(default)]
    pub responses: Vec<SubResponse>,
}

/// One entry of a batch response, in the order the requests were queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubResponse {
    /// The queued `path?query` string this entry answers.
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub response: Value,
}

impl Envelope {
    /// Interpret `response` as a batch body.
    pub fn batch(&self) -> serde_json::Result<BatchBody> {
        BatchBody::deserialize(&self.response)
    }

    /// True when the call succeeded and the provider reported no error or warning.
    pub fn is_clean(&self) -> bool {
        self.success && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_data_warning_is_a_successful_envelope() {
        let env: Envelope = serde_json::from_value(json!({
            "success": true,
            "error": {"code": "warn_no_data", "description": "No data was returned for the request."},
            "response": []
        }))
        .unwrap();
        assert!(env.success);
        assert!(!env.is_clean());
        let err = env.error.unwrap();
        assert!(err.is_warning());
        assert_eq!(err.description, "No data was returned for the request.");
    }

    #[test]
    fn batch_responses_keep_order() {
        let env: Envelope = serde_json::from_value(json!({
            "success": true,
            "error": null,
            "response": {"responses": [
                {"request": "/forecasts/closest?limit=7&filter=day", "success": true, "error": null,
                 "response": [{"interval": "day"}]},
                {"request": "/forecasts/closest?limit=169&filter=1hr", "success": true, "error": null,
                 "response": [{"interval": "1hr"}]}
            ]}
        }))
        .unwrap();
        assert!(env.is_clean());
        let batch = env.batch().unwrap();
        assert_eq!(batch.responses.len(), 2);
        assert_eq!(batch.responses[0].request, "/forecasts/closest?limit=7&filter=day");
        assert_eq!(batch.responses[1].response[0]["interval"], "1hr");
    }

    #[test]
    fn provider_errors_are_not_warnings() {
        let env: Envelope = serde_json::from_value(json!({
            "success": false,
            "error": {"code": "invalid_client", "description": "The client provided is invalid."}
        }))
        .unwrap();
        assert!(!env.error.unwrap().is_warning());
        assert_eq!(env.response, Value::Null);
    }
}
