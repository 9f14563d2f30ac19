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

use crate::rest_api::{actix_web_4::StoreState, resources::learning::v1};

use super::respond;

/// Provides the ability to list all learning modules
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
pub async fn list_modules(store_state: web::Data<StoreState>) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    respond(StatusCode::OK, v1::list_modules(store))
}

/// Provides the ability to fetch a learning module
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `id` - The identifier of the learning module
pub async fn get_module(store_state: web::Data<StoreState>, id: web::Path<String>) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    respond(StatusCode::OK, v1::get_module(store, &id))
}

/// Provides the ability to create a learning module
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_module(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    respond(StatusCode::CREATED, v1::create_module(store, &body))
}

/// Provides the ability to list the learning progress of a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `user_id` - The identifier of the user
pub async fn list_progress_by_user(
    store_state: web::Data<StoreState>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    respond(StatusCode::OK, v1::list_progress_by_user(store, &user_id))
}

/// Provides the ability to fetch a user's progress on one module
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `path` - The user ID and the module ID
pub async fn get_progress(
    store_state: web::Data<StoreState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    let (user_id, module_id) = path.into_inner();
    respond(StatusCode::OK, v1::get_progress(store, &user_id, &module_id))
}

/// Provides the ability to start tracking progress on a module
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_progress(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    respond(StatusCode::CREATED, v1::create_progress(store, &body))
}

/// Provides the ability to update a user's progress on one module
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `path` - The user ID and the module ID
/// `body` - JSON request body
pub async fn update_progress(
    store_state: web::Data<StoreState>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_learning_store();
    let (user_id, module_id) = path.into_inner();
    respond(
        StatusCode::OK,
        v1::update_progress(store, &user_id, &module_id, &body),
    )
}
