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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;

use super::{Farm, FarmStore, FarmStoreError, NewFarm};

#[derive(Default)]
struct FarmTable {
    last_id: i64,
    farms: BTreeMap<i64, Farm>,
}

#[derive(Clone, Default)]
pub struct MemoryFarmStore {
    inner: Arc<Mutex<FarmTable>>,
}

impl MemoryFarmStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> FarmStoreError {
    FarmStoreError::InternalError(InternalError::with_message(
        "Cannot access farms: mutex lock poisoned".to_string(),
    ))
}

impl FarmStore for MemoryFarmStore {
    fn get_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.farms.get(&id).cloned())
    }

    fn list_farms_by_user(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .farms
            .values()
            .filter(|farm| farm.user_id == user_id)
            .cloned()
            .collect())
    }

    fn create_farm(&self, farm: NewFarm) -> Result<Farm, FarmStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_id += 1;
        let farm = farm.into_farm(inner.last_id);
        inner.farms.insert(farm.id, farm.clone());

        Ok(farm)
    }
}
