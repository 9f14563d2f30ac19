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

//! Basic error types shared by the stores, the migrations and the REST API.
//!
//! Each type can be returned on its own or wrapped by a larger error `enum`, the way every
//! `*StoreError` in this crate wraps them.
//!
//! ```
//! use std::fmt;
//!
//! use agrosakhi_sdk::error::InternalError;
//!
//! #[derive(Debug)]
//! enum HarvestError {
//!     Internal(InternalError),
//!     NoCrop,
//! }
//!
//! impl std::error::Error for HarvestError {}
//!
//! impl fmt::Display for HarvestError {
//!     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
//!         match self {
//!             HarvestError::Internal(err) => write!(f, "{}", err),
//!             HarvestError::NoCrop => f.write_str("No crop to harvest"),
//!         }
//!     }
//! }
//!
//! fn parse_yield(value: &str) -> Result<f64, HarvestError> {
//!     if value.is_empty() {
//!         return Err(HarvestError::NoCrop);
//!     }
//!     value
//!         .parse::<f64>()
//!         .map_err(|err| HarvestError::Internal(InternalError::from_source(Box::new(err))))
//! }
//!
//! assert!(parse_yield("12.5").is_ok());
//! assert!(parse_yield("").is_err());
//! ```

mod constraint_violation;
mod internal;
mod invalid_argument;
mod unavailable;

pub use constraint_violation::{ConstraintViolationError, ConstraintViolationType};
pub use internal::InternalError;
pub use invalid_argument::InvalidArgumentError;
pub use unavailable::ResourceTemporarilyUnavailableError;
