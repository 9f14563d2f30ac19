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

use chrono::NaiveDate;
use serde_json::Value;

use crate::rest_api::resources::error::ErrorResponse;
use crate::rest_api::resources::validation::FromJson;
use crate::weather::store::{Forecast, NewForecast, WeatherStore, WeatherStoreError};

use super::payloads::{ForecastSlice, RainfallSlice};

pub const DEFAULT_FORECAST_DAYS: i64 = 7;
pub const DEFAULT_RAINFALL_DAYS: i64 = 10;

fn store_error(err: WeatherStoreError) -> ErrorResponse {
    match err {
        WeatherStoreError::InternalError(err) => ErrorResponse::internal_error(Box::new(err)),
        WeatherStoreError::ConstraintViolationError(err) => {
            ErrorResponse::new(400, &format!("{}", err))
        }
        WeatherStoreError::ResourceTemporarilyUnavailableError(_) => {
            ErrorResponse::new(503, "Service Unavailable")
        }
        WeatherStoreError::NotFoundError(msg) => ErrorResponse::new(404, &msg),
    }
}

fn parse_days(days: Option<&str>, default: i64) -> Result<i64, ErrorResponse> {
    match days {
        None => Ok(default),
        Some(days) => days
            .parse::<i64>()
            .map_err(|_| ErrorResponse::new(400, "Invalid days")),
    }
}

fn forecasts<'a>(
    store: Box<dyn WeatherStore + 'a>,
    location: &str,
    today: NaiveDate,
    days: i64,
) -> Result<Vec<Forecast>, ErrorResponse> {
    store
        .list_forecasts(location, today, days)
        .map_err(store_error)
}

/// Lists the forecasts for the `days` days starting `today`, seven by default.
pub fn list_forecasts<'a>(
    store: Box<dyn WeatherStore + 'a>,
    location: &str,
    days: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<ForecastSlice>, ErrorResponse> {
    let days = parse_days(days, DEFAULT_FORECAST_DAYS)?;
    Ok(forecasts(store, location, today, days)?
        .into_iter()
        .map(ForecastSlice::from)
        .collect())
}

pub fn get_current_weather<'a>(
    store: Box<dyn WeatherStore + 'a>,
    location: &str,
    today: NaiveDate,
) -> Result<ForecastSlice, ErrorResponse> {
    store
        .get_forecast(location, Some(today))
        .map_err(store_error)?
        .map(ForecastSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "No weather data found for this location"))
}

pub fn list_rainfall<'a>(
    store: Box<dyn WeatherStore + 'a>,
    location: &str,
    days: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<RainfallSlice>, ErrorResponse> {
    let days = parse_days(days, DEFAULT_RAINFALL_DAYS)?;
    Ok(forecasts(store, location, today, days)?
        .into_iter()
        .map(RainfallSlice::from)
        .collect())
}

/// Returns the forecast for `date`, or the latest-dated forecast when no date is given.
pub fn get_forecast<'a>(
    store: Box<dyn WeatherStore + 'a>,
    location: &str,
    date: Option<&str>,
) -> Result<ForecastSlice, ErrorResponse> {
    let date = date
        .map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| ErrorResponse::new(400, "Invalid date"))?;
    store
        .get_forecast(location, date)
        .map_err(store_error)?
        .map(ForecastSlice::from)
        .ok_or_else(|| ErrorResponse::new(404, "Weather forecast not found"))
}

pub fn create_forecast<'a>(
    store: Box<dyn WeatherStore + 'a>,
    body: &Value,
) -> Result<ForecastSlice, ErrorResponse> {
    let new_forecast = NewForecast::from_json(body)?;
    store
        .create_forecast(new_forecast)
        .map(ForecastSlice::from)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::weather::store::memory::MemoryWeatherStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date")
    }

    fn seed(store: &MemoryWeatherStore) {
        for offset in 0..12 {
            let date = today() + Duration::days(offset);
            let mut body = json!({
                "location": "Barabanki",
                "forecastDate": date.format("%Y-%m-%d").to_string(),
                "temperature": 30.0,
                "condition": "sunny",
            });
            if offset % 2 == 0 {
                body["rainfall"] = json!(4.5);
            }
            create_forecast(Box::new(store.clone()), &body).expect("Failed to create forecast");
        }
    }

    #[test]
    fn test_forecast_windows() {
        let store = MemoryWeatherStore::new();
        seed(&store);

        let week = list_forecasts(Box::new(store.clone()), "Barabanki", None, today())
            .expect("Failed to list forecasts");
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].forecast_date, today());

        let rainfall = list_rainfall(Box::new(store.clone()), "Barabanki", None, today())
            .expect("Failed to list rainfall");
        assert_eq!(rainfall.len(), 10);
        assert_eq!(rainfall[0].value, 4.5);
        assert_eq!(rainfall[1].value, 0.0);

        let none = list_forecasts(Box::new(store.clone()), "Barabanki", Some("0"), today())
            .expect("Failed to list forecasts");
        assert!(none.is_empty());

        let err = list_forecasts(Box::new(store), "Barabanki", Some("seven"), today())
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_current_and_dated_forecasts() {
        let store = MemoryWeatherStore::new();
        seed(&store);

        let current = get_current_weather(Box::new(store.clone()), "Barabanki", today())
            .expect("Failed to get current weather");
        assert_eq!(current.forecast_date, today());

        let latest = get_forecast(Box::new(store.clone()), "Barabanki", None)
            .expect("Failed to get forecast");
        assert_eq!(latest.forecast_date, today() + Duration::days(11));

        let dated = get_forecast(Box::new(store.clone()), "Barabanki", Some("2024-07-03"))
            .expect("Failed to get forecast");
        assert_eq!(dated.forecast_date, today() + Duration::days(2));

        let err = get_current_weather(Box::new(store.clone()), "Lucknow", today()).unwrap_err();
        assert_eq!(err.message(), "No weather data found for this location");

        let err = create_forecast(
            Box::new(store),
            &json!({ "location": "Barabanki", "forecastDate": "2024-07-01T09:00:00Z" }),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
