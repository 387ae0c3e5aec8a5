use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::AppError;

/// Extractor for the optional `{ "secret": "..." }` request body.
///
/// An empty body, a missing or `null` secret and an empty string all mean
/// an anonymous requester. Anything that is not JSON, or a secret that is
/// not a string, is rejected with 400.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecretBody(pub Option<String>);

impl SecretBody {
    pub fn secret(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Parses a raw request body.
    pub fn parse(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest("Request body must be JSON".to_string()))?;

        let secret = match value {
            Value::Null => None,
            Value::Object(mut fields) => match fields.remove("secret") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(Value::String(s)) => Some(s),
                // Falsy non-strings (`false`, `0`) are rejected too.
                Some(_) => return Err(AppError::BadRequest("Invalid secret".to_string())),
            },
            _ => {
                return Err(AppError::BadRequest(
                    "Request body must be a JSON object".to_string(),
                ));
            },
        };

        Ok(Self(secret))
    }
}

impl<S> FromRequest<S> for SecretBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Self::parse(&body)
    }
}
