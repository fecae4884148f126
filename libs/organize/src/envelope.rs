use oneplatform_core::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Wrapper every business endpoint puts around its payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub data: Value,
    #[serde(rename = "errorMessage", default)]
    pub error_message: Value,
    #[serde(default)]
    pub code: i64,
}

impl Envelope {
    pub fn error_message(&self) -> Option<String> {
        match &self.error_message {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// A `result` other than `Success`, or an error message with no data, marks a failed call.
    /// An empty `result` is accepted.
    pub fn is_success(&self) -> bool {
        let result_ok = self.result.is_empty() || self.result.eq_ignore_ascii_case("success");
        result_ok && !(self.data.is_null() && self.error_message().is_some())
    }

    pub fn into_data(self, endpoint: &'static str) -> ApiResult<Value> {
        if self.is_success() {
            return Ok(self.data);
        }
        let message = self
            .error_message()
            .unwrap_or_else(|| format!("result {}", self.result));
        warn!(
            endpoint,
            result = %self.result,
            code = self.code,
            message = %message,
            "directory rejected request"
        );
        Err(ApiError::Rejected {
            endpoint,
            code: self.code,
            message,
        })
    }
}

/// Body sent with every GET; the directory is scoped by company tax id.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TaxScope<'a> {
    pub tax_id: &'a str,
}
