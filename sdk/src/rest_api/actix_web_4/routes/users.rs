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

use actix_web_4::{http::StatusCode, web, HttpResponse};
use serde_json::Value;

use crate::rest_api::{actix_web_4::StoreState, resources::users::v1};

use super::respond;

/// Provides the ability to fetch a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `id` - The identifier of the user
pub async fn get_user(store_state: web::Data<StoreState>, id: web::Path<String>) -> HttpResponse {
    let store = store_state.store_factory.get_user_store();
    respond(StatusCode::OK, v1::get_user(store, &id))
}

/// Provides the ability to register a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_user(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_user_store();
    respond(StatusCode::CREATED, v1::create_user(store, &body))
}

/// Provides the ability to look up a user by username and password
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn login(store_state: web::Data<StoreState>, body: web::Json<Value>) -> HttpResponse {
    let store = store_state.store_factory.get_user_store();
    respond(StatusCode::OK, v1::login(store, &body))
}
