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

use crate::error::{InternalError, ResourceTemporarilyUnavailableError};

/// Represents errors raised while migrating or clearing a database
#[derive(Debug)]
pub enum MigrationsError {
    InternalError(InternalError),
    ResourceTemporarilyUnavailableError(ResourceTemporarilyUnavailableError),
}

impl Error for MigrationsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MigrationsError::InternalError(err) => Some(err),
            MigrationsError::ResourceTemporarilyUnavailableError(err) => Some(err),
        }
    }
}

impl fmt::Display for MigrationsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MigrationsError::InternalError(err) => err.fmt(f),
            MigrationsError::ResourceTemporarilyUnavailableError(err) => err.fmt(f),
        }
    }
}

impl From<diesel::result::Error> for MigrationsError {
    fn from(err: diesel::result::Error) -> Self {
        MigrationsError::InternalError(InternalError::from_source(Box::new(err)))
    }
}
