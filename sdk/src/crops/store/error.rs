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

use std::error::Error;
use std::fmt;

use crate::error::{ConstraintViolationError, InternalError, ResourceTemporarilyUnavailableError};
#[cfg(feature = "diesel")]
use crate::error::ConstraintViolationType;

/// Represents CropStore errors
#[derive(Debug)]
pub enum CropStoreError {
    InternalError(InternalError),
    ConstraintViolationError(ConstraintViolationError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
    NotFoundError(String),
}

impl Error for CropStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CropStoreError::InternalError(err) => Some(err),
            CropStoreError::ConstraintViolationError(err) => Some(err),
            CropStoreError::ResourceTemporarilyUnavailableError(err) => Some(err),
            CropStoreError::NotFoundError(_) => None,
        }
    }
}

impl fmt::Display for CropStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CropStoreError::InternalError(err) => err.fmt(f),
            CropStoreError::ConstraintViolationError(err) => err.fmt(f),
            CropStoreError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
            CropStoreError::NotFoundError(ref s) => write!(f, "Resource not found: {}", s),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::result::Error> for CropStoreError {
    fn from(err: diesel::result::Error) -> CropStoreError {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => CropStoreError::ConstraintViolationError(
                ConstraintViolationError::from_source_with_violation_type(
                    ConstraintViolationType::Unique,
                    Box::new(err),
                ),
            ),
            _ => CropStoreError::InternalError(InternalError::from_source(Box::new(err))),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for CropStoreError {
    fn from(err: diesel::r2d2::PoolError) -> CropStoreError {
        CropStoreError::ResourceTemporarilyUnavailableError(
            ResourceTemporarilyUnavailableError::from_source(Box::new(err)),
        )
    }
}
