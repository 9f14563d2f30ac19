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

pub(in crate::crops::store::diesel) trait CropStoreFetchCropOperation {
    fn fetch_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> CropStoreFetchCropOperation
    for CropStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        crops::table
            .find(id)
            .first::<CropModel>(self.conn)
            .optional()?
            .map(Crop::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> CropStoreFetchCropOperation
    for CropStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        crops::table
            .find(id)
            .first::<CropModel>(self.conn)
            .optional()?
            .map(Crop::try_from)
            .transpose()
    }
}
