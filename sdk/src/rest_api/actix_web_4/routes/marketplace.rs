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

//! Marketplace listings and the traceability transactions recorded against them.

use actix_web_4::{http::StatusCode, web, HttpResponse};
use serde_json::Value;

use crate::rest_api::{actix_web_4::StoreState, resources::marketplace::v1};

use super::respond;

/// Provides the ability to list every active marketplace listing
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
pub async fn list_listings(store_state: web::Data<StoreState>) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(StatusCode::OK, v1::list_listings(store))
}

/// Provides the ability to list the marketplace listings of a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `user_id` - The identifier of the user
pub async fn list_listings_by_user(
    store_state: web::Data<StoreState>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(StatusCode::OK, v1::list_listings_by_user(store, &user_id))
}

/// Provides the ability to create a marketplace listing
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_listing(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(StatusCode::CREATED, v1::create_listing(store, &body))
}

/// Provides the ability to list the supply chain transactions of a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `user_id` - The identifier of the user
pub async fn list_transactions_by_user(
    store_state: web::Data<StoreState>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(StatusCode::OK, v1::list_transactions_by_user(store, &user_id))
}

/// Provides the ability to list the supply chain transactions of a listing
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `listing_id` - The identifier of the listing
pub async fn list_transactions_by_listing(
    store_state: web::Data<StoreState>,
    listing_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(
        StatusCode::OK,
        v1::list_transactions_by_listing(store, &listing_id),
    )
}

/// Provides the ability to record a supply chain transaction
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_transaction(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_marketplace_store();
    respond(StatusCode::CREATED, v1::create_transaction(store, &body))
}
