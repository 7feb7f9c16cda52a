use relay_models::email::EmailId;
use serde::Serialize;

pub mod contact;

/// Uniform response body of all endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ApiEmailSent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiFieldError>>,
}

impl ApiResponse {
    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            data: None,
            errors: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiEmailSent {
    pub id: EmailId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFieldError {
    /// Dotted path of the offending field, empty for the body itself.
    pub field: String,
    pub message: String,
}
