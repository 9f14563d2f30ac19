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

use crate::farms::store::{FarmStore, FarmStoreError, NewFarm};
use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;

use super::payloads::FarmSlice;

fn store_error(err: FarmStoreError) -> ErrorResponse {
    match err {
        FarmStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        FarmStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        FarmStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        FarmStoreError::NotFoundError(_) => ErrorResponse::new(404, "Farm not found"),
    }
}

pub fn list_farms_by_user<'a>(
    store: Box<dyn FarmStore + 'a>,
    user_id: &str,
) -> Result<Vec<FarmSlice>, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    Ok(store
        .list_farms_by_user(user_id)
        .map_err(store_error)?
        .into_iter()
        .map(FarmSlice::from)
        .collect())
}

pub fn create_farm<'a>(
    store: Box<dyn FarmStore + 'a>,
    body: &Value,
) -> Result<FarmSlice, ErrorResponse> {
    let new_farm = NewFarm::from_json(body)?;
    store
        .create_farm(new_farm)
        .map(FarmSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::farms::store::memory::MemoryFarmStore;

    #[test]
    fn test_create_and_list_farms() {
        let store = MemoryFarmStore::new();
        let farm = create_farm(
            Box::new(store.clone()),
            &json!({ "userId": 1, "name": "North field", "size": 2.5 }),
        )
        .expect("Failed to create farm");
        assert_eq!(farm.size, Some(2.5));

        let farms = list_farms_by_user(Box::new(store.clone()), "1").expect("Failed to list");
        assert_eq!(farms, vec![farm]);

        let err = list_farms_by_user(Box::new(store), "one").unwrap_err();
        assert_eq!(err.message(), "Invalid user ID");
    }

    #[test]
    fn test_create_farm_requires_name() {
        let err = create_farm(Box::new(MemoryFarmStore::new()), &json!({ "userId": 1 }))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.errors()[0].field, "name");
    }
}
