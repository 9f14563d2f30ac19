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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};

use super::{forecast_window, Forecast, NewForecast, WeatherStore, WeatherStoreError};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ForecastKey {
    location: String,
    date: NaiveDate,
}

impl ForecastKey {
    fn new(location: &str, date: NaiveDate) -> Self {
        ForecastKey {
            location: location.to_string(),
            date,
        }
    }
}

#[derive(Default)]
struct ForecastTable {
    last_id: i64,
    forecasts: BTreeMap<ForecastKey, Forecast>,
}

#[derive(Clone, Default)]
pub struct MemoryWeatherStore {
    inner: Arc<Mutex<ForecastTable>>,
}

impl MemoryWeatherStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> WeatherStoreError {
    WeatherStoreError::InternalError(InternalError::with_message(
        "Cannot access weather forecasts: mutex lock poisoned".to_string(),
    ))
}

impl WeatherStore for MemoryWeatherStore {
    fn get_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        let forecast = match date {
            Some(date) => inner.forecasts.get(&ForecastKey::new(location, date)),
            None => inner
                .forecasts
                .range(ForecastKey::new(location, NaiveDate::MIN)..)
                .take_while(|(key, _)| key.location == location)
                .last()
                .map(|(_, forecast)| forecast),
        };

        Ok(forecast.cloned())
    }

    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        days: i64,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        let (start, end) = match forecast_window(start, days) {
            Some(window) => window,
            None => return Ok(vec![]),
        };

        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .forecasts
            .range(ForecastKey::new(location, start)..)
            .take_while(|(key, _)| {
                key.location == location && end.map(|end| key.date < end).unwrap_or(true)
            })
            .map(|(_, forecast)| forecast.clone())
            .collect())
    }

    fn create_forecast(&self, forecast: NewForecast) -> Result<Forecast, WeatherStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let key = ForecastKey::new(&forecast.location, forecast.forecast_date);
        if inner.forecasts.contains_key(&key) {
            return Err(WeatherStoreError::ConstraintViolationError(
                ConstraintViolationError::with_violation_type_and_message(
                    ConstraintViolationType::Unique,
                    format!(
                        "A forecast for {} on {} already exists",
                        key.location, key.date
                    ),
                ),
            ));
        }

        inner.last_id += 1;
        let forecast = forecast.into_forecast(inner.last_id);
        inner.forecasts.insert(key, forecast.clone());

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_forecast(location: &str, date: NaiveDate) -> NewForecast {
        NewForecast {
            location: location.to_string(),
            forecast_date: date,
            temperature: Some(31.0),
            min_temperature: None,
            max_temperature: None,
            humidity: None,
            rainfall: None,
            condition: None,
        }
    }

    #[test]
    fn test_locations_do_not_bleed_into_each_other() {
        let store = MemoryWeatherStore::new();
        let day = |d| NaiveDate::from_ymd(2024, 8, d);

        for d in 1..=3 {
            store
                .create_forecast(new_forecast("Lucknow", day(d)))
                .expect("Failed to create forecast");
        }
        // "Lucknow East" sorts directly after "Lucknow" in the key order
        store
            .create_forecast(new_forecast("Lucknow East", day(9)))
            .expect("Failed to create forecast");

        let latest = store
            .get_forecast("Lucknow", None)
            .expect("Failed to get forecast")
            .expect("Forecast missing");
        assert_eq!(latest.forecast_date, day(3));

        let dates = store
            .list_forecasts("Lucknow", day(2), 30)
            .expect("Failed to list forecasts")
            .into_iter()
            .map(|forecast| forecast.forecast_date)
            .collect::<Vec<_>>();
        assert_eq!(dates, vec![day(2), day(3)]);

        assert_eq!(
            store
                .get_forecast("Kanpur", None)
                .expect("Failed to get forecast"),
            None
        );
    }
}
