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

use std::convert::TryFrom;

use chrono::NaiveDate;

use super::schema::weather_forecasts;
use crate::error::InternalError;
use crate::weather::store::{Forecast, NewForecast, WeatherStoreError};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "weather_forecasts"]
pub struct NewForecastModel {
    pub location: String,
    pub forecast_date: NaiveDate,
    pub temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub condition: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct ForecastModel {
    pub id: i64,
    pub location: String,
    pub forecast_date: NaiveDate,
    pub temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub condition: Option<String>,
}

impl From<NewForecast> for NewForecastModel {
    fn from(forecast: NewForecast) -> Self {
        Self {
            location: forecast.location,
            forecast_date: forecast.forecast_date,
            temperature: forecast.temperature,
            min_temperature: forecast.min_temperature,
            max_temperature: forecast.max_temperature,
            humidity: forecast.humidity,
            rainfall: forecast.rainfall,
            condition: forecast.condition.map(|condition| condition.to_string()),
        }
    }
}

impl TryFrom<ForecastModel> for Forecast {
    type Error = WeatherStoreError;

    fn try_from(model: ForecastModel) -> Result<Self, Self::Error> {
        let condition = model
            .condition
            .map(|condition| condition.parse())
            .transpose()
            .map_err(|err| {
                WeatherStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?;

        Ok(Self {
            id: model.id,
            location: model.location,
            forecast_date: model.forecast_date,
            temperature: model.temperature,
            min_temperature: model.min_temperature,
            max_temperature: model.max_temperature,
            humidity: model.humidity,
            rainfall: model.rainfall,
            condition,
        })
    }
}
