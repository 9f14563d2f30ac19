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

//! The AgroSakhi REST API.
//!
//! `resources` holds the framework-independent request handling: payload validation, slices and
//! the mapping of store errors onto HTTP statuses. `actix_web_4` binds those handlers to routes.

pub mod actix_web_4;
pub mod resources;
