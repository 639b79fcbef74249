//! Path, query and body extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, RawQuery, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::query::QueryParams;

/// Maximum length of a register code in a path
pub const MAX_REGISTER_CODE_LENGTH: usize = 20;

/// Register codes are short printable tokens such as `4041-0`.
/// Length is counted in characters, matching the create-body rule.
pub fn is_valid_register_code(code: &str) -> bool {
    !code.is_empty()
        && code.chars().count() <= MAX_REGISTER_CODE_LENGTH
        && code.chars().all(|c| !c.is_control())
}

#[derive(Debug, Deserialize)]
struct RegisterCodePathRaw {
    register_code: String,
}

/// Validated `{register_code}` path extractor.
///
/// Returns a 400 Bad Request if the code is empty, too long or contains
/// control characters.
#[derive(Debug)]
pub struct RegisterCodePath {
    pub register_code: String,
}

impl<S> FromRequestParts<S> for RegisterCodePath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RegisterCodePathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        if !is_valid_register_code(&raw.register_code) {
            return Err(ValidationRejection::InvalidRegisterCode);
        }

        Ok(Self {
            register_code: raw.register_code,
        })
    }
}

/// Query string decoded into every key with all of its values, in order.
///
/// Unlike `Query<T>` nothing is dropped or rejected here; deciding which keys
/// are allowed is left to the binder.
#[derive(Debug, Default)]
pub struct QueryParamsExtractor(pub QueryParams);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(RawQuery(raw)) = RawQuery::from_request_parts(parts, state).await;
        let Some(raw) = raw else {
            return Ok(Self::default());
        };

        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(&raw).map_err(ValidationRejection::Query)?;

        let mut params = QueryParams::new();
        for (key, value) in pairs {
            params.entry(key).or_default().push(value);
        }
        Ok(Self(params))
    }
}

/// Validation rejection with structured error response
#[derive(Debug)]
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    InvalidRegisterCode,
    /// Failed to decode the query string
    Query(serde_urlencoded::de::Error),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Path(rejection) => ("PATH_PARSE_ERROR", rejection.body_text()),
            Self::InvalidRegisterCode => (
                "INVALID_REGISTER_CODE",
                format!(
                    "Invalid register code: must be 1-{} printable characters",
                    MAX_REGISTER_CODE_LENGTH
                ),
            ),
            Self::Query(e) => ("QUERY_PARSE_ERROR", e.to_string()),
            Self::Json(rejection) => ("JSON_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Messages sorted by field name so responses are stable
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn extract(uri: &str) -> Result<QueryParams, ValidationRejection> {
        let (mut parts, _) = HttpRequest::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        QueryParamsExtractor::from_request_parts(&mut parts, &())
            .await
            .map(|q| q.0)
    }

    #[test]
    fn test_register_code_validation() {
        assert!(is_valid_register_code("4041-0"));
        assert!(is_valid_register_code("1234567890abcdefghij"));
        assert!(!is_valid_register_code(""));
        assert!(!is_valid_register_code("1234567890abcdefghijk"));
        assert!(!is_valid_register_code("40\n41"));

        assert!(is_valid_register_code(&"Ç".repeat(20)));
        assert!(!is_valid_register_code(&"Ç".repeat(21)));
    }

    #[tokio::test]
    async fn test_query_params_keep_repeated_keys() {
        let params = extract("/markets?bairro=VL%20FORMOSA&bairro=MOOCA&coddist=87")
            .await
            .unwrap();
        assert_eq!(params["bairro"], vec!["VL FORMOSA", "MOOCA"]);
        assert_eq!(params["coddist"], vec!["87"]);
    }

    #[tokio::test]
    async fn test_query_params_empty() {
        assert!(extract("/markets").await.unwrap().is_empty());
        assert!(extract("/markets?").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_params_plus_is_space() {
        let params = extract("/markets?nome=VILA+FORMOSA").await.unwrap();
        assert_eq!(params["nome"], vec!["VILA FORMOSA"]);
    }
}
