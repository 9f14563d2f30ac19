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
use diesel::prelude::*;

use super::WeatherStoreOperations;
use crate::weather::store::diesel::{models::ForecastModel, schema::weather_forecasts};
use crate::weather::store::{Forecast, WeatherStoreError};

pub(in crate::weather::store::diesel) trait WeatherStoreFetchForecastOperation {
    fn fetch_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> WeatherStoreFetchForecastOperation
    for WeatherStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        let mut query = weather_forecasts::table
            .into_boxed()
            .filter(weather_forecasts::location.eq(location));

        query = match date {
            Some(date) => query.filter(weather_forecasts::forecast_date.eq(date)),
            None => query.order(weather_forecasts::forecast_date.desc()),
        };

        query
            .first::<ForecastModel>(self.conn)
            .optional()?
            .map(Forecast::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> WeatherStoreFetchForecastOperation
    for WeatherStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_forecast(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<Forecast>, WeatherStoreError> {
        let mut query = weather_forecasts::table
            .into_boxed()
            .filter(weather_forecasts::location.eq(location));

        query = match date {
            Some(date) => query.filter(weather_forecasts::forecast_date.eq(date)),
            None => query.order(weather_forecasts::forecast_date.desc()),
        };

        query
            .first::<ForecastModel>(self.conn)
            .optional()?
            .map(Forecast::try_from)
            .transpose()
    }
}
