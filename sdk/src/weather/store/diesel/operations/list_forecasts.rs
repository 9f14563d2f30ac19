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

pub(in crate::weather::store::diesel) trait WeatherStoreListForecastsOperation {
    /// Lists forecasts dated from `start` up to, but excluding, `end`.
    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Forecast>, WeatherStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> WeatherStoreListForecastsOperation
    for WeatherStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        let mut query = weather_forecasts::table
            .into_boxed()
            .filter(weather_forecasts::location.eq(location))
            .filter(weather_forecasts::forecast_date.ge(start))
            .order(weather_forecasts::forecast_date.asc());

        if let Some(end) = end {
            query = query.filter(weather_forecasts::forecast_date.lt(end));
        }

        query
            .load::<ForecastModel>(self.conn)?
            .into_iter()
            .map(Forecast::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> WeatherStoreListForecastsOperation
    for WeatherStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_forecasts(
        &self,
        location: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Forecast>, WeatherStoreError> {
        let mut query = weather_forecasts::table
            .into_boxed()
            .filter(weather_forecasts::location.eq(location))
            .filter(weather_forecasts::forecast_date.ge(start))
            .order(weather_forecasts::forecast_date.asc());

        if let Some(end) = end {
            query = query.filter(weather_forecasts::forecast_date.lt(end));
        }

        query
            .load::<ForecastModel>(self.conn)?
            .into_iter()
            .map(Forecast::try_from)
            .collect()
    }
}
