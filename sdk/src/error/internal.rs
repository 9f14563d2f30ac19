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

struct Source {
    prefix: Option<String>,
    source: Box<dyn error::Error>,
}

/// Returned when an operation fails for a reason the caller cannot act on.
///
/// A lost database connection halfway through a query, a poisoned lock around the in-memory
/// store or a row that no longer decodes are all reported this way.
pub struct InternalError {
    message: Option<String>,
    source: Option<Source>,
}

impl InternalError {
    /// Wraps `source`; the display string is the source's display string.
    ///
    /// ```
    /// use agrosakhi_sdk::error::InternalError;
    ///
    /// let err = "x".parse::<i64>().unwrap_err();
    /// let internal = InternalError::from_source(Box::new(err));
    /// assert_eq!(internal.to_string(), "invalid digit found in string");
    /// ```
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Wraps `source` but displays `message` instead of the source.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            source: Some(Source {
                prefix: None,
                source,
            }),
        }
    }

    /// Wraps `source`, displayed as `"{prefix}: {source}"`.
    ///
    /// ```
    /// use agrosakhi_sdk::error::InternalError;
    ///
    /// let err = "x".parse::<i64>().unwrap_err();
    /// let internal =
    ///     InternalError::from_source_with_prefix(Box::new(err), "Bad battery level".to_string());
    /// assert_eq!(internal.to_string(), "Bad battery level: invalid digit found in string");
    /// ```
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            source: Some(Source {
                prefix: Some(prefix),
                source,
            }),
        }
    }

    /// An error carrying only a message.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
        }
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|s| s.source.as_ref())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => f.write_str(message),
            (None, Some(Source {
                prefix: Some(prefix),
                source,
            })) => write!(f, "{}: {}", prefix, source),
            (None, Some(Source { prefix: None, source })) => write!(f, "{}", source),
            (None, None) => f.write_str("InternalError"),
        }
    }
}

impl fmt::Debug for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("InternalError");
        if let Some(message) = &self.message {
            debug.field("message", message);
        }
        if let Some(source) = &self.source {
            if let Some(prefix) = &source.prefix {
                debug.field("prefix", prefix);
            }
            debug.field("source", &source.source);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = InternalError::from_source(Box::new(InternalError::with_message(
            "pool closed".to_string(),
        )));
        assert_eq!(err.to_string(), "pool closed");

        let err = InternalError::from_source_with_message(
            Box::new(InternalError::with_message("hidden".to_string())),
            "Unable to load crops".to_string(),
        );
        assert_eq!(err.to_string(), "Unable to load crops");

        let err = InternalError::from_source_with_prefix(
            Box::new(InternalError::with_message("pool closed".to_string())),
            "Unable to load crops".to_string(),
        );
        assert_eq!(err.to_string(), "Unable to load crops: pool closed");
    }

    #[test]
    fn test_debug() {
        let err = InternalError::with_message("lock poisoned".to_string());
        assert_eq!(
            format!("{:?}", err),
            "InternalError { message: \"lock poisoned\" }"
        );

        let err = InternalError::from_source_with_prefix(
            Box::new(InternalError::with_message("lock poisoned".to_string())),
            "devices".to_string(),
        );
        assert_eq!(
            format!("{:?}", err),
            "InternalError { prefix: \"devices\", source: InternalError { message: \"lock poisoned\" } }"
        );
    }

    #[test]
    fn test_source() {
        use std::error::Error;

        assert!(InternalError::with_message("no source".to_string())
            .source()
            .is_none());
        assert!(InternalError::from_source(Box::new(InternalError::with_message(
            "inner".to_string()
        )))
        .source()
        .is_some());
    }
}
