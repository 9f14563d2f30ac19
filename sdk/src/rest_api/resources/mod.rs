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

//! Framework-independent request handling: body validation, response payloads and the
//! mapping of store errors to HTTP errors. Each resource has a `v1` module with `payloads` and
//! `handler` submodules.

pub mod advisor;
pub mod crops;
pub mod devices;
pub mod error;
pub mod farms;
pub mod learning;
pub mod marketplace;
pub mod recommendations;
pub mod tasks;
pub mod users;
pub mod validation;
pub mod weather;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Attaches the UTC zone to a stored timestamp so it serializes in RFC 3339 form.
pub(crate) fn utc(timestamp: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&timestamp)
}
