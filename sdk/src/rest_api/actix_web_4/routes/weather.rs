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
use chrono::Utc;
use serde_json::Value;

use crate::rest_api::{actix_web_4::StoreState, resources::weather::v1};

use super::respond;

/// Represents a `days` window passed to the forecast endpoints in the query string
#[derive(Debug, Deserialize)]
pub struct QueryDays {
    pub days: Option<String>,
}

/// Represents a `date` (`YYYY-MM-DD`) passed to the forecast endpoint in the query string
#[derive(Debug, Deserialize)]
pub struct QueryDate {
    pub date: Option<String>,
}

/// Provides the ability to list the forecasts for a location
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `location` - The location name
/// `query` - Optional number of days to cover
pub async fn list_forecasts(
    store_state: web::Data<StoreState>,
    location: web::Path<String>,
    query: web::Query<QueryDays>,
) -> HttpResponse {
    let store = store_state.store_factory.get_weather_store();
    respond(
        StatusCode::OK,
        v1::list_forecasts(
            store,
            &location,
            query.days.as_deref(),
            Utc::now().date_naive(),
        ),
    )
}

/// Provides the ability to fetch today's forecast for a location
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `location` - The location name
pub async fn get_current_weather(
    store_state: web::Data<StoreState>,
    location: web::Path<String>,
) -> HttpResponse {
    let store = store_state.store_factory.get_weather_store();
    respond(
        StatusCode::OK,
        v1::get_current_weather(store, &location, Utc::now().date_naive()),
    )
}

/// Provides the ability to list the rainfall history of a location
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `location` - The location name
/// `query` - Optional number of days to cover
pub async fn list_rainfall(
    store_state: web::Data<StoreState>,
    location: web::Path<String>,
    query: web::Query<QueryDays>,
) -> HttpResponse {
    let store = store_state.store_factory.get_weather_store();
    respond(
        StatusCode::OK,
        v1::list_rainfall(
            store,
            &location,
            query.days.as_deref(),
            Utc::now().date_naive(),
        ),
    )
}

/// Provides the ability to fetch the forecast for a location on one date
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `location` - The location name
/// `query` - The date of the forecast
pub async fn get_forecast(
    store_state: web::Data<StoreState>,
    location: web::Path<String>,
    query: web::Query<QueryDate>,
) -> HttpResponse {
    let store = store_state.store_factory.get_weather_store();
    respond(
        StatusCode::OK,
        v1::get_forecast(store, &location, query.date.as_deref()),
    )
}

/// Provides the ability to store a forecast
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `body` - JSON request body
pub async fn create_forecast(
    store_state: web::Data<StoreState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_weather_store();
    respond(StatusCode::CREATED, v1::create_forecast(store, &body))
}
