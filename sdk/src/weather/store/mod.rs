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

#[cfg(feature = "diesel")]
pub mod diesel;
mod error;
pub mod memory;

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::error::InvalidArgumentError;

pub use error::WeatherStoreError;

const MAX_FORECAST_DAYS: i64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::PartlyCloudy => "partly_cloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(WeatherCondition::Sunny),
            "partly_cloudy" => Ok(WeatherCondition::PartlyCloudy),
            "cloudy" => Ok(WeatherCondition::Cloudy),
            "rainy" => Ok(WeatherCondition::Rainy),
            _ => Err(InvalidArgumentError::new(
                "condition".to_string(),
                format!("unknown weather condition '{}'", s),
            )),
        }
    }
}

/// The forecast for one location on one day. Temperatures are in degrees Celsius, humidity in
/// percent and rainfall in millimetres.
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    pub id: i64,
    pub location: String,
    pub forecast_date: NaiveDate,
    pub temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub condition: Option<WeatherCondition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewForecast {
    pub location: String,
    pub forecast_date: NaiveDate,
    pub temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub condition: Option<WeatherCondition>,
}

impl NewForecast {
    pub(crate) fn into_forecast(self, id: i64) -> Forecast {
        Forecast {
            id,
            location: self.location,
            forecast_date: self.forecast_date,
            temperature: self.temperature,
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
            humidity: self.humidity,
            rainfall: self.rainfall,
            condition: self.condition,
        }
    }
}

/// The half-open date range `[start, end)` covered by `days` days from `start`.
///
/// Returns `None` when the range is empty. An end past the last representable date is returned
/// as `Some((start, None))`.
pub(crate) fn forecast_window(
    start: NaiveDate,
    days: i64,
) -> Option<(NaiveDate, Option<NaiveDate>)> {
    if days <= 0 {
        return None;
    }

    let end = start.checked_add_signed(Duration::days(days.min(MAX_FORECAST_DAYS)));
    Some((start, end))
}

pub trait WeatherStore: Send + Sync {
    /// Returns the forecast for `location` on `date`, or the forecast with the latest date when
    /// no date is given.
    fn get_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError>;

    /// Lists the forecasts for `location` dated within `days` days of `start`, earliest first.
    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        days: i64,
    ) -> Result<Vec<Forecast>, WeatherStoreError>;

    /// Returns a `ConstraintViolationError` if the location already has a forecast for that date.
    fn create_forecast(&self, forecast: NewForecast) -> Result<Forecast, WeatherStoreError>;
}

impl<WS> WeatherStore for Box<WS>
where
    WS: WeatherStore + ?Sized,
{
    fn get_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        (**self).get_forecast(location, date)
    }

    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        days: i64,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        (**self).list_forecasts(location, start, days)
    }

    fn create_forecast(&self, forecast: NewForecast) -> Result<Forecast, WeatherStoreError> {
        (**self).create_forecast(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_window() {
        let start = NaiveDate::from_ymd(2024, 12, 30);

        assert_eq!(forecast_window(start, 0), None);
        assert_eq!(forecast_window(start, -3), None);
        assert_eq!(
            forecast_window(start, 3),
            Some((start, Some(NaiveDate::from_ymd(2025, 1, 2))))
        );
        assert!(forecast_window(start, i64::MAX).is_some());
    }
}
