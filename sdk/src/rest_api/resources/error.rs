// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error;
use std::fmt;

use super::validation::{FieldError, ValidationError};

/// Generic error designed with the expectation that it may be converted into an HTTP response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// A corresponding HTTP status code for the error
    status_code: u16,

    /// The message that would be returned in an HTTP response
    message: String,

    /// Per-field problems found while validating a request body
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,

    /// Wrapped error that is not exposed in the HTTP response
    #[serde(skip_serializing)]
    source: Option<Box<dyn error::Error>>,
}

impl ErrorResponse {
    /// Create a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status_code` - Corresponding HTTP status code
    /// * `message` - External message to display to the user
    ///
    /// # Examples
    /// ```
    /// use agrosakhi_sdk::rest_api::resources::error::ErrorResponse;
    ///
    /// let response = ErrorResponse::new(404, "User not found");
    ///
    /// assert_eq!(404, response.status_code());
    /// assert_eq!("User not found", response.message());
    /// ```
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            errors: vec![],
            source: None,
        }
    }

    /// Create a new ErrorResponse that does not expose the underlying error
    ///
    /// # Arguments
    ///
    /// * `source` - Underlying internal error
    ///
    /// # Examples
    /// ```
    /// use agrosakhi_sdk::rest_api::resources::error::ErrorResponse;
    ///
    /// // Mock an internal error
    /// let error = "NaN".parse::<u32>().unwrap_err();
    ///
    /// let response = ErrorResponse::internal_error(Box::new(error));
    ///
    /// assert_eq!(500, response.status_code());
    /// assert_eq!("An internal error occurred", response.message());
    /// ```
    pub fn internal_error(source: Box<dyn error::Error>) -> Self {
        error!("{}", source);
        Self {
            status_code: 500,
            message: "An internal error occurred".to_string(),
            errors: vec![],
            source: Some(source),
        }
    }

    /// Create a 400 ErrorResponse listing the fields that failed validation
    pub fn invalid_request(err: ValidationError) -> Self {
        Self {
            status_code: 400,
            message: err.to_string(),
            errors: err.into_field_errors(),
            source: None,
        }
    }

    /// Create a 400 ErrorResponse for a path segment that is not a valid id
    pub fn invalid_id(entity: &str) -> Self {
        Self::new(400, &format!("Invalid {} ID", entity))
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl error::Error for ErrorResponse {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref src) = self.source {
            write!(f, "{}", src)
        } else {
            write!(
                f,
                "Status Code {}: Message {}",
                self.status_code, self.message
            )
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        ErrorResponse::invalid_request(err)
    }
}

/// Parses a numeric path segment, naming the entity in the error when it is not a number.
pub fn parse_id(value: &str, entity: &str) -> Result<i64, ErrorResponse> {
    value
        .parse::<i64>()
        .map_err(|_| ErrorResponse::invalid_id(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use serde_json::Result;

    // Deny any unknown fields so we can test for data leaks
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Response {
        status_code: u16,
        message: String,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ValidationResponse {
        status_code: u16,
        message: String,
        errors: Vec<FieldErrorResponse>,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct FieldErrorResponse {
        field: String,
        message: String,
    }

    #[test]
    fn test_error_response_internal_error_display() {
        let error = "NaN".parse::<u32>().unwrap_err();
        let response = ErrorResponse::internal_error(Box::new(error));
        assert_eq!(response.to_string(), "invalid digit found in string");
    }

    #[test]
    fn test_error_response_new_display() {
        let response = ErrorResponse::new(404, "User not found");
        assert_eq!(response.to_string(), "Status Code 404: Message User not found");
    }

    #[test]
    fn test_error_response_new_json_serialization() -> Result<()> {
        let response = ErrorResponse::new(404, "User not found");
        let json = serde_json::to_string(&response)?;
        let deserialized: Response = serde_json::from_str(&json)?;

        assert_eq!(deserialized.status_code, 404);
        assert_eq!(deserialized.message, "User not found");

        Ok(())
    }

    #[test]
    fn test_error_response_internal_error_json_serialization() -> Result<()> {
        let err = "NaN".parse::<u32>().unwrap_err();
        let response = ErrorResponse::internal_error(Box::new(err));
        let json = serde_json::to_string(&response)?;
        let deserialized: Response = serde_json::from_str(&json)?;

        assert_eq!(deserialized.status_code, 500);
        assert_eq!(deserialized.message, "An internal error occurred");

        Ok(())
    }

    #[test]
    fn test_error_response_invalid_request_lists_fields() -> Result<()> {
        let err = ValidationError::new(vec![FieldError::new("username", "is required")]);
        let response = ErrorResponse::from(err);
        let json = serde_json::to_string(&response)?;
        let deserialized: ValidationResponse = serde_json::from_str(&json)?;

        assert_eq!(deserialized.status_code, 400);
        assert_eq!(deserialized.message, "Invalid request body");
        assert_eq!(deserialized.errors.len(), 1);
        assert_eq!(deserialized.errors[0].field, "username");
        assert_eq!(deserialized.errors[0].message, "is required");

        Ok(())
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "user").ok(), Some(42));

        let err = parse_id("abc", "user").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid user ID");
    }
}
