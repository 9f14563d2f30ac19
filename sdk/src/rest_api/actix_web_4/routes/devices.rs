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

use crate::rest_api::{actix_web_4::StoreState, resources::devices::v1};

use super::respond;

/// Represents a `limit` passed to the sensor reading endpoint in the query string
#[derive(Debug, Deserialize)]
pub struct QueryLimit {
    pub limit: Option<String>,
}

/// Provides the ability to list the devices owned by a user
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `user_id` - The identifier of the user
pub async fn list_devices_by_user(
    store_state: web::Data<StoreState>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    respond(StatusCode::OK, v1::list_devices_by_user(store, &user_id))
}

/// Provides the ability to register a device
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_device(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    respond(StatusCode::CREATED, v1::create_device(store, &body))
}

/// Provides the ability to update the status and battery level of a device
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `id` - The identifier of the device
/// `body` - JSON request body
pub async fn update_device_status(
    store_state: web::Data<StoreState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    respond(StatusCode::OK, v1::update_device_status(store, &id, &body))
}

/// Provides the ability to list recent readings of one sensor, newest first
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `path` - The device ID and the sensor type
/// `query` - Optional maximum number of readings to return
pub async fn list_sensor_readings(
    store_state: web::Data<StoreState>,
    path: web::Path<(String, String)>,
    query: web::Query<QueryLimit>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    let (device_id, sensor_type) = path.into_inner();
    respond(
        StatusCode::OK,
        v1::list_sensor_readings(store, &device_id, &sensor_type, query.limit.as_deref()),
    )
}

/// Provides the ability to fetch the newest reading of one sensor
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `path` - The device ID and the sensor type
pub async fn get_latest_sensor_reading(
    store_state: web::Data<StoreState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    let (device_id, sensor_type) = path.into_inner();
    respond(
        StatusCode::OK,
        v1::get_latest_sensor_reading(store, &device_id, &sensor_type),
    )
}

/// Provides the ability to summarize the readings of one sensor
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `path` - The device ID and the sensor type
pub async fn get_sensor_statistics(
    store_state: web::Data<StoreState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    let (device_id, sensor_type) = path.into_inner();
    respond(
        StatusCode::OK,
        v1::get_sensor_statistics(store, &device_id, &sensor_type),
    )
}

/// Provides the ability to record a sensor reading
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_sensor_reading(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_device_store();
    respond(StatusCode::CREATED, v1::create_sensor_reading(store, &body))
}
