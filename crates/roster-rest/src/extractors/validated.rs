//! JSON body extractor that runs `validator` rules before the handler.
//!
//! Malformed bodies are rejected with 400 `INVALID_JSON`; bodies that parse
//! but break a rule are rejected with 422 `VALIDATION_ERROR` and one
//! [`FieldError`] per violated rule.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{ErrorResponse, FieldError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// A `Json<T>` whose contents passed `T::validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection produced by [`ValidatedJson`].
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// The body was missing, not JSON, or did not match `T`.
    Json(JsonRejection),
    /// The body parsed but failed validation.
    Invalid(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {}", rejection.body_text()),
                    details: None,
                },
            ),
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Request validation failed".to_string(),
                    details: Some(field_errors(&errors)),
                },
            ),
        };
        (status, Json(ApiResponse::error(error))).into_response()
    }
}

/// Flattens validator output, prefixing nested fields with their path.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                    out.push(FieldError {
                        field: field.to_string(),
                        message,
                        code: err.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                out.extend(field_errors(nested).into_iter().map(|e| FieldError {
                    field: format!("{}.{}", field, e.field),
                    ..e
                }));
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    out.extend(field_errors(nested).into_iter().map(|e| FieldError {
                        field: format!("{}[{}].{}", field, index, e.field),
                        ..e
                    }));
                }
            }
        }
    }

    out
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;

        value.validate().map_err(ValidatedJsonRejection::Invalid)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_service::UserRequest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Team {
        #[validate(length(min = 1))]
        title: String,
        #[validate(nested)]
        lead: UserRequest,
    }

    fn request(name: &str, email: &str) -> UserRequest {
        UserRequest {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_single_field_error() {
        let errors = request("", "ann@example.com").validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "name");
        assert_eq!(fields[0].message, "Name must be 1-255 characters");
        assert_eq!(fields[0].code, "length");
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let errors = request("", "nope").validate().unwrap_err();
        let fields = field_errors(&errors);

        let names: Vec<&str> = fields.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields.len(), 2);
        assert!(names.contains(&"name"));
        assert!(names.contains(&"email"));
    }

    #[test]
    fn test_nested_field_path() {
        let team = Team {
            title: "Platform".to_string(),
            lead: request("Lee", "lee-at-example"),
        };
        let fields = field_errors(&team.validate().unwrap_err());

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "lead.email");
    }
}
