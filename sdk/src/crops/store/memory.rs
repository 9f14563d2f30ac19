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

use super::{Crop, CropStore, CropStoreError, HealthStatus, NewCrop};

#[derive(Default)]
struct CropTable {
    last_id: i64,
    crops: BTreeMap<i64, Crop>,
}

#[derive(Clone, Default)]
pub struct MemoryCropStore {
    inner: Arc<Mutex<CropTable>>,
}

impl MemoryCropStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_where<F>(&self, predicate: F) -> Result<Vec<Crop>, CropStoreError>
    where
        F: Fn(&Crop) -> bool,
    {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .crops
            .values()
            .filter(|crop| predicate(crop))
            .cloned()
            .collect())
    }
}

fn poisoned() -> CropStoreError {
    CropStoreError::InternalError(InternalError::with_message(
        "Cannot access crops: mutex lock poisoned".to_string(),
    ))
}

impl CropStore for MemoryCropStore {
    fn get_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.crops.get(&id).cloned())
    }

    fn list_crops_by_user(&self, user_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        self.list_where(|crop| crop.user_id == user_id)
    }

    fn list_crops_by_farm(&self, farm_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        self.list_where(|crop| crop.farm_id == Some(farm_id))
    }

    fn create_crop(&self, crop: NewCrop) -> Result<Crop, CropStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_id += 1;
        let crop = crop.into_crop(inner.last_id);
        inner.crops.insert(crop.id, crop.clone());

        Ok(crop)
    }

    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let crop = inner
            .crops
            .get_mut(&id)
            .ok_or_else(|| CropStoreError::NotFoundError(format!("crop {}", id)))?;

        crop.status = status.to_string();
        if let Some(health_status) = health_status {
            crop.health_status = health_status;
        }

        Ok(crop.clone())
    }
}
