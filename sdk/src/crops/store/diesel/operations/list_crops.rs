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

use diesel::prelude::*;

use super::CropStoreOperations;
use crate::crops::store::diesel::{models::CropModel, schema::crops};
use crate::crops::store::{Crop, CropStoreError};

pub(in crate::crops::store::diesel) enum CropFilter {
    User(i64),
    Farm(i64),
}

pub(in crate::crops::store::diesel) trait CropStoreListCropsOperation {
    fn list_crops(&self, filter: CropFilter) -> Result<Vec<Crop>, CropStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> CropStoreListCropsOperation
    for CropStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_crops(&self, filter: CropFilter) -> Result<Vec<Crop>, CropStoreError> {
        let mut query = crops::table.into_boxed().order(crops::id.asc());

        query = match filter {
            CropFilter::User(user_id) => query.filter(crops::user_id.eq(user_id)),
            CropFilter::Farm(farm_id) => query.filter(crops::farm_id.eq(farm_id)),
        };

        query
            .load::<CropModel>(self.conn)?
            .into_iter()
            .map(Crop::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> CropStoreListCropsOperation
    for CropStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_crops(&self, filter: CropFilter) -> Result<Vec<Crop>, CropStoreError> {
        let mut query = crops::table.into_boxed().order(crops::id.asc());

        query = match filter {
            CropFilter::User(user_id) => query.filter(crops::user_id.eq(user_id)),
            CropFilter::Farm(farm_id) => query.filter(crops::farm_id.eq(farm_id)),
        };

        query
            .load::<CropModel>(self.conn)?
            .into_iter()
            .map(Crop::try_from)
            .collect()
    }
}
