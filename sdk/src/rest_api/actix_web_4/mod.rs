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

mod routes;
mod run;

use std::sync::Arc;

use crate::advisor::Advisor;
use crate::store::StoreFactory;

pub use run::{configure, run};

/// Application state giving every route access to the configured backend.
#[derive(Clone)]
pub struct StoreState {
    pub store_factory: Arc<dyn StoreFactory>,
}

impl StoreState {
    pub fn new(store_factory: Arc<dyn StoreFactory>) -> Self {
        Self { store_factory }
    }
}

/// Application state for the AI routes; `None` when no completion API key was configured.
#[derive(Clone, Default)]
pub struct AdvisorState {
    pub advisor: Option<Advisor>,
}

impl AdvisorState {
    pub fn new(advisor: Option<Advisor>) -> Self {
        Self { advisor }
    }
}
