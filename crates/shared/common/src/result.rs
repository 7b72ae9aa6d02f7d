//! Operation outcome returned by service entry points.

use serde::Serialize;

use crate::error::AppError;

/// Why an operation failed. Not serialized; transports use it to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Conflict,
    Internal,
}

/// Outcome of a service operation.
///
/// On success `value` holds the payload and `errors` is empty. On failure
/// `value` is `None` and `errors` lists at least one message.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult<T> {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    pub message: String,
    pub errors: Vec<String>,
    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl<T> OperationResult<T> {
    /// Successful outcome carrying `value`.
    pub fn success(value: T, message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            value: Some(value),
            message: message.into(),
            errors: Vec::new(),
            failure: None,
        }
    }

    /// Failed outcome. When `errors` is empty the message is used as the
    /// single error entry.
    pub fn failure(kind: FailureKind, message: impl Into<String>, errors: Vec<String>) -> Self {
        let message = message.into();
        let errors = if errors.is_empty() {
            vec![message.clone()]
        } else {
            errors
        };

        Self {
            succeeded: false,
            value: None,
            message,
            errors,
            failure: Some(kind),
        }
    }

    /// Failure kind, `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }
}

impl From<&AppError> for FailureKind {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Validation(_) | AppError::BusinessRule(_) | AppError::BadRequest(_) => {
                FailureKind::Validation
            }
            AppError::Conflict(_) => FailureKind::Conflict,
            AppError::NotFound | AppError::Timeout(_) | AppError::Internal(_) => {
                FailureKind::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let result = OperationResult::success(7, "done");

        assert!(result.succeeded);
        assert_eq!(result.value, Some(7));
        assert!(result.errors.is_empty());
        assert_eq!(result.failure_kind(), None);
    }

    #[test]
    fn test_failure_defaults_errors_to_message() {
        let result: OperationResult<()> =
            OperationResult::failure(FailureKind::Conflict, "Email already exists", vec![]);

        assert!(!result.succeeded);
        assert!(result.value.is_none());
        assert_eq!(result.errors, vec!["Email already exists".to_string()]);
        assert_eq!(result.failure_kind(), Some(FailureKind::Conflict));
    }

    #[test]
    fn test_serialized_form_hides_kind() {
        let result: OperationResult<u8> = OperationResult::failure(
            FailureKind::Validation,
            "Validation failed",
            vec!["Invalid email format".to_string()],
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["succeeded"], false);
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["errors"][0], "Invalid email format");
        assert!(json.get("value").is_none());
        assert!(json.get("failure").is_none());
    }

    #[test]
    fn test_kind_from_app_error() {
        assert_eq!(
            FailureKind::from(&AppError::validation("x")),
            FailureKind::Validation
        );
        assert_eq!(
            FailureKind::from(&AppError::conflict("Email")),
            FailureKind::Conflict
        );
        assert_eq!(
            FailureKind::from(&AppError::timeout("x")),
            FailureKind::Internal
        );
    }
}
