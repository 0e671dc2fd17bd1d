//! Request DTOs with validation.
//!
//! Field names follow the form editor's camelCase JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use formhub_core::error::AppError;
use formhub_core::types::FolderId;

/// Run `validator` rules, reporting the first failure as a validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::validation(message)
    })
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
    /// Password confirmation.
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub confirm_password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Email availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckEmailRequest {
    /// Email to look up.
    #[serde(default)]
    pub email: String,
}

/// Profile update; absent or blank fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    /// New password.
    #[serde(default)]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Create or rename a folder or typebot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NameRequest {
    /// The name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Replace a typebot's fields. Sanitized by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFieldsRequest {
    /// Raw field list from the editor.
    #[serde(default)]
    pub fields: Value,
}

/// Move a typebot; `null` or missing unfiles it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFormRequest {
    /// Target folder.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

/// Anonymous submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    /// Answers keyed by field id.
    #[serde(default)]
    pub responses: Map<String, Value>,
}
