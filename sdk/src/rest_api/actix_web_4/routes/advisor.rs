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

//! Routes answered by the crop advisor. Each replies 503 while no completion client is
//! configured.

use actix_web_4::{http::StatusCode, web, HttpResponse};
use serde_json::Value;

use crate::rest_api::{
    actix_web_4::{AdvisorState, StoreState},
    resources::advisor::v1::{self, CropRecommendations},
};

use super::{error_response, respond};

/// Provides the ability to generate crop recommendations for a farm and store them
///
/// # Arguments
///
/// `store_state` - Provides a `store_factory` to access the stores
/// `advisor_state` - Provides the configured advisor, if any
/// `body` - JSON request body
pub async fn generate_crop_recommendations(
    store_state: web::Data<StoreState>,
    advisor_state: web::Data<AdvisorState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let store = store_state.store_factory.get_recommendation_store();
    match v1::generate_crop_recommendations(advisor_state.advisor.as_ref(), store, &body).await {
        Ok(CropRecommendations::Suggested(suggestions)) => HttpResponse::Ok().json(suggestions),
        Ok(CropRecommendations::Saved(saved)) => HttpResponse::Created().json(saved),
        Err(err) => error_response(err),
    }
}

/// Provides the ability to answer a transcribed voice query
///
/// # Arguments
///
/// `advisor_state` - Provides the configured advisor, if any
/// `body` - JSON request body
pub async fn process_voice_query(
    advisor_state: web::Data<AdvisorState>,
    body: web::Json<Value>,
) -> HttpResponse {
    respond(
        StatusCode::OK,
        v1::process_voice_query(advisor_state.advisor.as_ref(), &body).await,
    )
}

/// Provides the ability to request farming advice on a topic
///
/// # Arguments
///
/// `advisor_state` - Provides the configured advisor, if any
/// `body` - JSON request body
pub async fn generate_farming_advice(
    advisor_state: web::Data<AdvisorState>,
    body: web::Json<Value>,
) -> HttpResponse {
    respond(
        StatusCode::OK,
        v1::generate_farming_advice(advisor_state.advisor.as_ref(), &body).await,
    )
}

/// Provides the ability to assess how a forecast affects a crop
///
/// # Arguments
///
/// `advisor_state` - Provides the configured advisor, if any
/// `body` - JSON request body
pub async fn analyze_weather_impact(
    advisor_state: web::Data<AdvisorState>,
    body: web::Json<Value>,
) -> HttpResponse {
    respond(
        StatusCode::OK,
        v1::analyze_weather_impact(advisor_state.advisor.as_ref(), &body).await,
    )
}
