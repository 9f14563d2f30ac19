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

use serde_json::Value;

use crate::crops::store::{CropStore, CropStoreError, NewCrop};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::{CropSlice, CropStatusUpdate};

fn store_error(err: CropStoreError) -> ErrorResponse {
    match err {
        CropStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        CropStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        CropStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        CropStoreError::NotFoundError(_) => ErrorResponse::new(404, "Crop not found"),
    }
}

pub fn get_crop<'a>(store: Box<dyn CropStore + 'a>, id: &str) -> Result<CropSlice, ErrorResponse> {
    let id = parse_id(id, "crop")?;
    store
        .get_crop(id)
        .map_err(store_error)?
        .map(CropSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "Crop not found"))
}

pub fn list_crops_by_user<'a>(
    store: Box<dyn CropStore + 'a>,
    user_id: &str,
) -> Result<Vec<CropSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_crops_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(CropSlice::from)
        .collect())
}

pub fn create_crop<'a>(
    store: Box<dyn CropStore + 'a>,
    body: &Value,
) -> Result<CropSlice, ErrorResponse> {
    let new_crop = NewCrop::from_json(body)?;
    store
        .create_crop(new_crop)
        .map(CropSlice::from)
        .map_err(store_error)
}

pub fn update_crop_status<'a>(
    store: Box<dyn CropStore + 'a>,
    id: &str,
    body: &Value,
) -> Result<CropSlice, ErrorResponse> {
    let id = parse_id(id, "crop")?;
    let update = CropStatusUpdate::from_json(body)?;
    store
        .update_crop_status(id, &update.status, update.health_status)
        .map(CropSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::crops::store::memory::MemoryCropStore;
    use crate::crops::store::HealthStatus;

    #[test]
    fn test_crop_lifecycle() {
        let store = MemoryCropStore::new();
        let crop = create_crop(
            Box::new(store.clone()),
            &json!({
                "userId": 1,
                "farmId": 1,
                "name": "Wheat",
                "variety": "HD-2967",
                "plantingDate": "2023-11-15",
                "area": 2.5,
            }),
        )
        .expect("Failed to create crop");
        assert_eq!(crop.status, "active");
        assert_eq!(crop.health_status, HealthStatus::Good);

        let updated = update_crop_status(
            Box::new(store.clone()),
            &crop.id.to_string(),
            &json!({ "status": "harvested", "healthStatus": "needs_attention" }),
        )
        .expect("Failed to update crop");
        assert_eq!(updated.status, "harvested");
        assert_eq!(updated.health_status, HealthStatus::NeedsAttention);
        assert_eq!(updated.planting_date, crop.planting_date);

        let fetched = get_crop(Box::new(store.clone()), &crop.id.to_string())
            .expect("Failed to get crop");
        assert_eq!(fetched, updated);

        let err = get_crop(Box::new(store.clone()), "42").unwrap_err();
        assert_eq!(err.message(), "Crop not found");

        let err = update_crop_status(Box::new(store), "42", &json!({ "status": "active" }))
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
