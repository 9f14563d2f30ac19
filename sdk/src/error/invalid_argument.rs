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

/// Returned when a value handed to a function is not in an accepted form, such as an unknown
/// device status string.
#[derive(Debug)]
pub struct InvalidArgumentError {
    argument: String,
    message: String,
}

impl InvalidArgumentError {
    /// `argument` names the offending argument; `message` says what is wrong with it and should
    /// not repeat the name.
    ///
    /// ```
    /// use agrosakhi_sdk::error::InvalidArgumentError;
    ///
    /// let err = InvalidArgumentError::new(
    ///     "status".to_string(),
    ///     "unknown value 'asleep'".to_string(),
    /// );
    /// assert_eq!(err.to_string(), "unknown value 'asleep' (status)");
    /// ```
    pub fn new(argument: String, message: String) -> Self {
        Self { argument, message }
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for InvalidArgumentError {}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", &self.message, &self.argument)
    }
}
