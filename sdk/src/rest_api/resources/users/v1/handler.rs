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

use crate::rest_api::resources::error::{parse_id, ErrorResponse};
use crate::rest_api::resources::validation::FromJson;
use crate::users::store::{NewUser, UserStore, UserStoreError};

use super::payloads::{LoginRequest, UserSlice};

fn store_error(err: UserStoreError) -> ErrorResponse {
    match err {
        UserStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        UserStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        UserStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        UserStoreError::NotFoundError(_) => ErrorResponse::new(404, "User not found"),
    }
}

pub fn get_user<'a>(store: Box<dyn UserStore + 'a>, id: &str) -> Result<UserSlice, ErrorResponse> {
    let id = parse_id(id, "user")?;
    store
        .get_user(id)
        .map_err(store_error)?
        .map(UserSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "User not found"))
}

pub fn create_user<'a>(
    store: Box<dyn UserStore + 'a>,
    body: &Value,
) -> Result<UserSlice, ErrorResponse> {
    let new_user = NewUser::from_json(body)?;
    store
        .create_user(new_user)
        .map(UserSlice::from)
        .map_err(store_error)
}

/// Checks a username and password pair, returning the matching user.
pub fn login<'a>(store: Box<dyn UserStore + 'a>, body: &Value) -> Result<UserSlice, ErrorResponse> {
    let request = LoginRequest::from_json(body)?;
    match store
        .get_user_by_username(&request.username)
        .map_err(store_error)?
    {
        Some(user) if user.password == request.password => Ok(UserSlice::from(user)),
        _ => Err(ErrorResponse::new(401, "Invalid credentials")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::users::store::memory::MemoryUserStore;

    #[test]
    fn test_login() {
        let store = MemoryUserStore::new();
        create_user(
            Box::new(store.clone()),
            &json!({ "username": "a", "password": "p", "displayName": "A" }),
        )
        .expect("Failed to create user");

        let user = login(
            Box::new(store.clone()),
            &json!({ "username": "a", "password": "p" }),
        )
        .expect("Failed to log in");
        assert_eq!(user.username, "a");

        let err = login(
            Box::new(store.clone()),
            &json!({ "username": "a", "password": "wrong" }),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Invalid credentials");

        let err = login(Box::new(store), &json!({ "username": "a" })).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_get_user_errors() {
        let store = MemoryUserStore::new();

        let err = get_user(Box::new(store.clone()), "abc").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid user ID");

        let err = get_user(Box::new(store), "7").unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found");
    }
}
