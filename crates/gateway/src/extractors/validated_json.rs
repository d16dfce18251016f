//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use common::AppError;

/// JSON extractor that validates the payload before the handler runs.
///
/// Malformed JSON becomes `BadRequest`; failed field rules become
/// `Validation` with the first message per field, ordered by field name.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// `deserialize_with` helper: drop surrounding whitespace before the field
/// rules see the value.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .filter_map(|(field, errors)| {
            errors
                .first()
                .and_then(|error| error.message.as_ref())
                .map(|msg| format!("{}: {}", field, msg))
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[serde(deserialize_with = "trimmed")]
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 1, message = "Password is required"))]
        password: String,
    }

    #[test]
    fn test_padded_email_is_trimmed_before_validation() {
        let payload: Signup =
            serde_json::from_str(r#"{"email":"  a@x.com ","password":"pw1"}"#).unwrap();

        assert_eq!(payload.email, "a@x.com");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_describe_orders_fields() {
        let payload = Signup {
            email: "nope".to_string(),
            password: String::new(),
        };
        let errors = payload.validate().unwrap_err();

        assert_eq!(
            describe(&errors),
            "email: Invalid email format; password: Password is required"
        );
    }
}
