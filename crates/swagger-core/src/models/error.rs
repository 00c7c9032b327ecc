use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[cfg(feature = "actix")]
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Error surfaced by registry resolution, lookups and document generation.
///
/// Serialized as the JSON body of failed documentation requests.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SwaggerError {
    pub error: String,
    pub error_description: Option<String>,
}

impl SwaggerError {
    pub fn new(error: &str, description: Option<&str>) -> Self {
        Self {
            error: error.to_string(),
            error_description: description.map(|s| s.to_string()),
        }
    }

    /// Missing or malformed settings, unresolved registry paths, wrong object type.
    pub fn improperly_configured(description: &str) -> Self {
        Self::new("improperly_configured", Some(description))
    }

    /// Requested registry or resource is not registered.
    pub fn not_found(description: &str) -> Self {
        Self::new("not_found", Some(description))
    }

    pub fn server_error(description: &str) -> Self {
        Self::new("server_error", Some(description))
    }

    pub fn is_not_found(&self) -> bool {
        self.error == "not_found"
    }

    pub fn is_improperly_configured(&self) -> bool {
        self.error == "improperly_configured"
    }
}

impl fmt::Display for SwaggerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for SwaggerError {}

impl From<serde_json::Error> for SwaggerError {
    fn from(err: serde_json::Error) -> Self {
        Self::server_error(&err.to_string())
    }
}

#[cfg(feature = "actix")]
impl ResponseError for SwaggerError {
    fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_description() {
        let err = SwaggerError::not_found("no resource named 'entry'");
        assert_eq!(err.to_string(), "not_found: no resource named 'entry'");
        assert!(err.is_not_found());
        assert!(!err.is_improperly_configured());
    }

    #[test]
    fn serializes_as_error_body() {
        let err = SwaggerError::improperly_configured("bad path");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["error"], "improperly_configured");
        assert_eq!(value["error_description"], "bad path");
    }
}
