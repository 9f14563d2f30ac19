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
use std::time::Duration;

/// Returned when a backing resource, usually a database connection, cannot be reached right now.
///
/// The request may succeed if it is retried later.
#[derive(Debug)]
pub struct ResourceTemporarilyUnavailableError {
    source: Box<dyn error::Error>,
    retry_duration_hint: Option<Duration>,
}

impl ResourceTemporarilyUnavailableError {
    /// Wraps `source`; the display string is the source's display string.
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            source,
            retry_duration_hint: None,
        }
    }

    /// Wraps `source` along with a suggested delay before the next attempt.
    pub fn from_source_with_hint(
        source: Box<dyn error::Error>,
        retry_duration_hint: Duration,
    ) -> Self {
        Self {
            source,
            retry_duration_hint: Some(retry_duration_hint),
        }
    }

    pub fn retry_duration_hint(&self) -> Option<Duration> {
        self.retry_duration_hint
    }
}

impl error::Error for ResourceTemporarilyUnavailableError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl fmt::Display for ResourceTemporarilyUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::InternalError;

    use super::*;

    #[test]
    fn test_display_and_hint() {
        let err = ResourceTemporarilyUnavailableError::from_source(Box::new(
            InternalError::with_message("timed out waiting for connection".to_string()),
        ));
        assert_eq!(err.to_string(), "timed out waiting for connection");
        assert_eq!(err.retry_duration_hint(), None);

        let err = ResourceTemporarilyUnavailableError::from_source_with_hint(
            Box::new(InternalError::with_message("database restarting".to_string())),
            Duration::from_secs(5),
        );
        assert_eq!(err.to_string(), "database restarting");
        assert_eq!(err.retry_duration_hint(), Some(Duration::from_secs(5)));
    }
}
