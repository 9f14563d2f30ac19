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

/// The kind of constraint a write ran into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintViolationType {
    Unique,
    ForeignKey,
    NotFound,
    Other,
}

impl fmt::Display for ConstraintViolationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintViolationType::Unique => f.write_str("Unique"),
            ConstraintViolationType::ForeignKey => f.write_str("ForeignKey"),
            ConstraintViolationType::NotFound => f.write_str("NotFound"),
            ConstraintViolationType::Other => f.write_str("Other"),
        }
    }
}

/// Returned when a write would break a storage constraint, for example a second user with an
/// existing username.
#[derive(Debug)]
pub struct ConstraintViolationError {
    violation_type: ConstraintViolationType,
    message: Option<String>,
    source: Option<Box<dyn error::Error>>,
}

impl ConstraintViolationError {
    /// A violation described only by its type.
    pub fn with_violation_type(violation_type: ConstraintViolationType) -> Self {
        Self {
            violation_type,
            message: None,
            source: None,
        }
    }

    /// A violation raised by the database; the display string is the source's.
    pub fn from_source_with_violation_type(
        violation_type: ConstraintViolationType,
        source: Box<dyn error::Error>,
    ) -> Self {
        Self {
            violation_type,
            message: None,
            source: Some(source),
        }
    }

    /// A violation detected before reaching the database.
    ///
    /// ```
    /// use agrosakhi_sdk::error::{ConstraintViolationError, ConstraintViolationType};
    ///
    /// let err = ConstraintViolationError::with_violation_type_and_message(
    ///     ConstraintViolationType::Unique,
    ///     "Username priya is already taken".to_string(),
    /// );
    /// assert_eq!(err.to_string(), "Username priya is already taken");
    /// ```
    pub fn with_violation_type_and_message(
        violation_type: ConstraintViolationType,
        message: String,
    ) -> Self {
        Self {
            violation_type,
            message: Some(message),
            source: None,
        }
    }

    pub fn violation_type(&self) -> &ConstraintViolationType {
        &self.violation_type
    }
}

impl error::Error for ConstraintViolationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => f.write_str(message),
            (None, Some(source)) => write!(f, "{}", source),
            (None, None) => write!(f, "{} constraint violated", self.violation_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InternalError;

    #[test]
    fn test_display() {
        let err = ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique);
        assert_eq!(err.to_string(), "Unique constraint violated");

        let err = ConstraintViolationError::from_source_with_violation_type(
            ConstraintViolationType::ForeignKey,
            Box::new(InternalError::with_message("farm 9 does not exist".to_string())),
        );
        assert_eq!(err.to_string(), "farm 9 does not exist");
        assert_eq!(err.violation_type(), &ConstraintViolationType::ForeignKey);
    }
}
