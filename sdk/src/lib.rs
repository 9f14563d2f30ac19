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

//! Storage contract, REST API and crop advisor for the AgroSakhi farm-management service.
//!
//! Every entity family lives in its own module with a `store` submodule holding the domain
//! types, the `*Store` trait and its in-memory and diesel implementations. The
//! [`store::StoreFactory`] hands out stores that share one backend.

#[macro_use]
extern crate serde_derive;
#[cfg(feature = "diesel")]
#[macro_use]
extern crate diesel;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate log;

#[cfg(feature = "rest-api")]
pub mod advisor;
pub mod crops;
pub mod devices;
pub mod error;
pub mod farms;
pub mod learning;
pub mod marketplace;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub mod migrations;
pub mod recommendations;
#[cfg(feature = "rest-api")]
pub mod rest_api;
pub mod seed;
pub mod store;
pub mod tasks;
pub mod users;
pub mod weather;
