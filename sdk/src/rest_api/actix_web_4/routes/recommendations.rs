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

use crate::rest_api::{actix_web_4::StoreState, resources::recommendations::v1};

use super::respond;

/// Provides the ability to list the recommendations made for a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `user_id` - The identifier of the user
pub async fn list_recommendations_by_user(
    store_state: web::Data<StoreState>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_recommendation_store();
    respond(
        StatusCode::OK,
        v1::list_recommendations_by_user(store, &user_id),
    )
}

/// Provides the ability to list the recommendations made for a location
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `location` - The location name
pub async fn list_recommendations_by_location(
    store_state: web::Data<StoreState>,
    location: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_recommendation_store();
    respond(
        StatusCode::OK,
        v1::list_recommendations_by_location(store, &location),
    )
}

/// Provides the ability to store a recommendation
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_recommendation(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_recommendation_store();
    respond(StatusCode::CREATED, v1::create_recommendation(store, &body))
}
