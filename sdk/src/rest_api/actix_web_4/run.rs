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

use actix_web_4::error::InternalError as ActixInternalError;
use actix_web_4::{web, web::Data, App, HttpResponse, HttpServer};

use crate::error::InternalError;
use crate::rest_api::actix_web_4::routes::{
    advisor, crops, devices, farms, learning, marketplace, recommendations, tasks, users, weather,
};
use crate::rest_api::actix_web_4::{AdvisorState, StoreState};
use crate::rest_api::resources::error::ErrorResponse;

/// Registers every `/api` route on `cfg`.
///
/// The routes expect `StoreState` and `AdvisorState` to be available as application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/api/users/{id}", web::get().to(users::get_user))
        .route("/api/users", web::post().to(users::create_user))
        .route("/api/login", web::post().to(users::login))
        .route("/api/farms/{user_id}", web::get().to(farms::list_farms_by_user))
        .route("/api/farms", web::post().to(farms::create_farm))
        .route(
            "/api/devices/{user_id}",
            web::get().to(devices::list_devices_by_user),
        )
        .route("/api/devices", web::post().to(devices::create_device))
        .route(
            "/api/devices/{id}/status",
            web::patch().to(devices::update_device_status),
        )
        .route(
            "/api/sensors/{device_id}/{sensor_type}",
            web::get().to(devices::list_sensor_readings),
        )
        .route(
            "/api/sensors/{device_id}/{sensor_type}/latest",
            web::get().to(devices::get_latest_sensor_reading),
        )
        .route(
            "/api/sensors/{device_id}/{sensor_type}/statistics",
            web::get().to(devices::get_sensor_statistics),
        )
        .route("/api/sensors", web::post().to(devices::create_sensor_reading))
        .route("/api/crops/detail/{id}", web::get().to(crops::get_crop))
        .route("/api/crops/{user_id}", web::get().to(crops::list_crops_by_user))
        .route("/api/crops", web::post().to(crops::create_crop))
        .route(
            "/api/crops/{id}/status",
            web::patch().to(crops::update_crop_status),
        )
        .route("/api/tasks/{user_id}", web::get().to(tasks::list_tasks_by_user))
        .route("/api/tasks", web::post().to(tasks::create_task))
        .route(
            "/api/tasks/{id}/complete",
            web::patch().to(tasks::update_task_completion),
        )
        .service(
            web::resource("/api/marketplace")
                .route(web::get().to(marketplace::list_listings))
                .route(web::post().to(marketplace::create_listing)),
        )
        .route(
            "/api/marketplace/{user_id}",
            web::get().to(marketplace::list_listings_by_user),
        )
        .route(
            "/api/blockchain/listing/{listing_id}",
            web::get().to(marketplace::list_transactions_by_listing),
        )
        .route(
            "/api/blockchain/{user_id}",
            web::get().to(marketplace::list_transactions_by_user),
        )
        .route(
            "/api/blockchain",
            web::post().to(marketplace::create_transaction),
        )
        .service(
            web::resource("/api/learning/modules")
                .route(web::get().to(learning::list_modules))
                .route(web::post().to(learning::create_module)),
        )
        .route(
            "/api/learning/modules/{id}",
            web::get().to(learning::get_module),
        )
        .route(
            "/api/learning/progress",
            web::post().to(learning::create_progress),
        )
        .route(
            "/api/learning/progress/{user_id}",
            web::get().to(learning::list_progress_by_user),
        )
        .service(
            web::resource("/api/learning/progress/{user_id}/{module_id}")
                .route(web::get().to(learning::get_progress))
                .route(web::patch().to(learning::update_progress)),
        )
        .route("/api/weather", web::post().to(weather::create_forecast))
        .route(
            "/api/weather/{location}",
            web::get().to(weather::list_forecasts),
        )
        .route(
            "/api/weather/{location}/current",
            web::get().to(weather::get_current_weather),
        )
        .route(
            "/api/weather/{location}/rainfall",
            web::get().to(weather::list_rainfall),
        )
        .route(
            "/api/weather/{location}/forecast",
            web::get().to(weather::get_forecast),
        )
        .route(
            "/api/recommendations/location/{location}",
            web::get().to(recommendations::list_recommendations_by_location),
        )
        .route(
            "/api/recommendations/{user_id}",
            web::get().to(recommendations::list_recommendations_by_user),
        )
        .route(
            "/api/recommendations",
            web::post().to(recommendations::create_recommendation),
        )
        .route(
            "/api/ai/recommendations",
            web::post().to(advisor::generate_crop_recommendations),
        )
        .route(
            "/api/ai/voice-query",
            web::post().to(advisor::process_voice_query),
        )
        .route(
            "/api/ai/farming-advice",
            web::post().to(advisor::generate_farming_advice),
        )
        .route(
            "/api/ai/weather-impact",
            web::post().to(advisor::analyze_weather_impact),
        );
}

/// Malformed or non-JSON bodies are answered with the same error body as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            &format!("Invalid JSON body: {}", err),
        ));
        ActixInternalError::from_response(err, response).into()
    })
}

pub async fn run(
    bind: &str,
    store_state: StoreState,
    advisor_state: AdvisorState,
) -> Result<(), InternalError> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(store_state.clone()))
            .app_data(Data::new(advisor_state.clone()))
            .configure(configure)
    })
    .bind(bind)
    .map_err(|err| InternalError::from_source(Box::new(err)))?;

    info!("AgroSakhi REST API listening on {}", bind);

    server
        .run()
        .await
        .map_err(|err| InternalError::from_source(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use actix_web_4::{http::StatusCode, test};
    use chrono::Utc;
    use futures::{future, FutureExt};
    use serde_json::{json, Value};

    use crate::advisor::{
        Advisor, CompletionClient, CompletionError, CompletionFuture, CompletionRequest,
    };
    use crate::store::memory::MemoryStoreFactory;

    #[derive(Clone)]
    struct FixedClient(Result<String, CompletionError>);

    impl CompletionClient for FixedClient {
        fn complete(&self, _: CompletionRequest) -> CompletionFuture {
            future::ready(self.0.clone()).boxed()
        }

        fn cloned_box(&self) -> Box<dyn CompletionClient> {
            Box::new(self.clone())
        }
    }

    fn store_state() -> StoreState {
        StoreState::new(Arc::new(MemoryStoreFactory::new()))
    }

    fn advisor_state(reply: &str) -> AdvisorState {
        AdvisorState::new(Some(Advisor::new(
            Box::new(FixedClient(Ok(reply.to_string()))),
            "gpt-4o",
        )))
    }

    macro_rules! app {
        ($store_state:expr, $advisor_state:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new($store_state))
                    .app_data(Data::new($advisor_state))
                    .configure(configure),
            )
            .await
        };
    }

    fn farmer() -> Value {
        json!({
            "username": "priya",
            "password": "password123",
            "displayName": "Priya Singh",
            "location": "Barabanki, Uttar Pradesh"
        })
    }

    /// Verifies that a user can be registered, fetched back without a password, and logged in.
    #[actix_rt::test]
    async fn test_user_registration_and_login() {
        let app = app!(store_state(), AdvisorState::default());

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(&farmer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["username"], "priya");
        assert!(created.get("password").is_none());

        let uri = format!("/api/users/{}", created["id"]);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Value = test::read_body_json(resp).await;
        assert_eq!(fetched["displayName"], "Priya Singh");

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(&json!({"username": "priya", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(&json!({"username": "priya", "password": "wrong"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid credentials");

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(&farmer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    /// Verifies the error bodies for unknown ids, malformed ids, malformed JSON and invalid
    /// payloads.
    #[actix_rt::test]
    async fn test_error_responses() {
        let app = app!(store_state(), AdvisorState::default());

        let req = test::TestRequest::get().uri("/api/users/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User not found");

        let req = test::TestRequest::get().uri("/api/users/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid user ID");

        let req = test::TestRequest::post()
            .uri("/api/farms")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .map(|message| message.starts_with("Invalid JSON body"))
            .unwrap_or(false));

        let req = test::TestRequest::post()
            .uri("/api/farms")
            .set_json(&json!({"name": "North field"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "userId");
    }

    /// Verifies the sensor routes: readings, latest reading and statistics for a device.
    #[actix_rt::test]
    async fn test_sensor_routes() {
        let app = app!(store_state(), AdvisorState::default());

        let req = test::TestRequest::post()
            .uri("/api/devices")
            .set_json(&json!({"userId": 1, "name": "Soil sensor", "type": "soil_sensor"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let device: Value = test::read_body_json(resp).await;
        let device_id = device["id"].as_i64().unwrap_or_default();

        for (value, timestamp) in &[(30.0, "2024-06-01T06:00:00Z"), (40.0, "2024-06-01T07:00:00Z")]
        {
            let req = test::TestRequest::post()
                .uri("/api/sensors")
                .set_json(&json!({
                    "deviceId": device_id,
                    "type": "soil_moisture",
                    "value": value,
                    "unit": "%",
                    "timestamp": timestamp
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let uri = format!("/api/sensors/{}/soil_moisture?limit=1", device_id);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let readings: Value = test::read_body_json(resp).await;
        assert_eq!(readings.as_array().map(Vec::len), Some(1));

        let uri = format!("/api/sensors/{}/soil_moisture/latest", device_id);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let latest: Value = test::read_body_json(resp).await;
        assert_eq!(latest["value"], 40.0);

        let uri = format!("/api/sensors/{}/soil_moisture/statistics", device_id);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let stats: Value = test::read_body_json(resp).await;
        assert_eq!(stats["avg"], 35.0);
        assert_eq!(stats["count"], 2);

        let uri = format!("/api/sensors/{}/soil_ph/latest", device_id);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let uri = format!("/api/devices/{}/status", device_id);
        let req = test::TestRequest::patch()
            .uri(&uri)
            .set_json(&json!({"status": "low_signal", "batteryLevel": 12}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(resp).await;
        assert_eq!(updated["status"], "low_signal");
    }

    /// Verifies that crop details and per-user crop lists are routed separately.
    #[actix_rt::test]
    async fn test_crop_routes() {
        let app = app!(store_state(), AdvisorState::default());

        let req = test::TestRequest::post()
            .uri("/api/crops")
            .set_json(&json!({"userId": 3, "name": "Wheat", "status": "growing"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let crop: Value = test::read_body_json(resp).await;

        let uri = format!("/api/crops/detail/{}", crop["id"]);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let detail: Value = test::read_body_json(resp).await;
        assert_eq!(detail["name"], "Wheat");

        let req = test::TestRequest::get().uri("/api/crops/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let crops: Value = test::read_body_json(resp).await;
        assert_eq!(crops.as_array().map(Vec::len), Some(1));
    }

    /// Verifies that patching learning progress inserts the record and then updates it.
    #[actix_rt::test]
    async fn test_learning_progress_upsert() {
        let app = app!(store_state(), AdvisorState::default());

        let req = test::TestRequest::get()
            .uri("/api/learning/progress/1/2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        for progress in &[40, 100] {
            let req = test::TestRequest::patch()
                .uri("/api/learning/progress/1/2")
                .set_json(&json!({"progress": progress, "completed": *progress == 100}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/api/learning/progress/1/2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["progress"], 100);
        assert_eq!(body["completed"], true);

        let req = test::TestRequest::get()
            .uri("/api/learning/progress/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let all: Value = test::read_body_json(resp).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));
    }

    /// Verifies that today's forecast is served as the current weather and that duplicate
    /// forecasts are rejected.
    #[actix_rt::test]
    async fn test_weather_routes() {
        let app = app!(store_state(), AdvisorState::default());
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let forecast = json!({
            "location": "Barabanki",
            "forecastDate": today,
            "temperature": 31.5,
            "condition": "sunny"
        });

        let req = test::TestRequest::get()
            .uri("/api/weather/Barabanki/current")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/weather")
            .set_json(&forecast)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/weather")
            .set_json(&forecast)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/weather/Barabanki/current")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let current: Value = test::read_body_json(resp).await;
        assert_eq!(current["forecastDate"], today.as_str());

        let req = test::TestRequest::get()
            .uri("/api/weather/Barabanki/rainfall")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let rainfall: Value = test::read_body_json(resp).await;
        assert_eq!(rainfall[0]["value"], 0.0);

        let req = test::TestRequest::get()
            .uri("/api/weather/Barabanki?days=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    /// Verifies that the AI routes answer 503 without an advisor, and otherwise return or save
    /// suggestions depending on whether a user id is supplied.
    #[actix_rt::test]
    async fn test_ai_routes() {
        let app = app!(store_state(), AdvisorState::default());
        let req = test::TestRequest::post()
            .uri("/api/ai/voice-query")
            .set_json(&json!({"query": "When should I sow wheat?"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let reply = r#"{"recommendations": [{"cropName": "Rice", "variety": "Swarna",
            "reason": "Heavy monsoon rain", "matchPercentage": 91}]}"#;
        let app = app!(store_state(), advisor_state(reply));

        let req = test::TestRequest::post()
            .uri("/api/ai/recommendations")
            .set_json(&json!({"location": "Barabanki"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let suggestions: Value = test::read_body_json(resp).await;
        assert_eq!(suggestions[0]["cropName"], "Rice");

        let req = test::TestRequest::post()
            .uri("/api/ai/recommendations")
            .set_json(&json!({"location": "Barabanki", "userId": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/recommendations/location/Barabanki")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let saved: Value = test::read_body_json(resp).await;
        assert_eq!(saved.as_array().map(Vec::len), Some(1));
        assert_eq!(saved[0]["userId"], 1);

        let req = test::TestRequest::post()
            .uri("/api/ai/farming-advice")
            .set_json(&json!({"cropName": "Rice", "growthStage": "tillering"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let advice: Value = test::read_body_json(resp).await;
        assert_eq!(advice["advice"], reply);
    }
}
