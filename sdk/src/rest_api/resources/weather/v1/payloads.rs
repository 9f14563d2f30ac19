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

use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};
use crate::weather::store::{Forecast, NewForecast, WeatherCondition};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSlice {
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

impl From<Forecast> for ForecastSlice {
    fn from(forecast: Forecast) -> Self {
        Self {
            id: forecast.id,
            location: forecast.location,
            forecast_date: forecast.forecast_date,
            temperature: forecast.temperature,
            min_temperature: forecast.min_temperature,
            max_temperature: forecast.max_temperature,
            humidity: forecast.humidity,
            rainfall: forecast.rainfall,
            condition: forecast.condition,
        }
    }
}

/// Expected rainfall on one day; a forecast without rainfall reads as 0.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RainfallSlice {
    pub date: NaiveDate,
    pub value: f64,
}

impl From<Forecast> for RainfallSlice {
    fn from(forecast: Forecast) -> Self {
        Self {
            date: forecast.forecast_date,
            value: forecast.rainfall.unwrap_or(0.0),
        }
    }
}

impl FromJson for NewForecast {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let forecast = NewForecast {
            location: validator.required_non_empty("location"),
            forecast_date: validator.required_date("forecastDate"),
            temperature: validator.optional_number("temperature"),
            min_temperature: validator.optional_number("minTemperature"),
            max_temperature: validator.optional_number("maxTemperature"),
            humidity: validator.optional_number("humidity"),
            rainfall: validator.optional_number("rainfall"),
            condition: validator.optional_enum("condition"),
        };
        validator.finish()?;
        Ok(forecast)
    }
}
