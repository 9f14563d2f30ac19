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

use diesel::{dsl::insert_into, prelude::*};

use super::CropStoreOperations;
use crate::crops::store::diesel::{
    models::{CropModel, NewCropModel},
    schema::crops,
};
use crate::crops::store::{Crop, CropStoreError};

pub(in crate::crops::store::diesel) trait CropStoreAddCropOperation {
    fn add_crop(&self, crop: NewCropModel) -> Result<Crop, CropStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> CropStoreAddCropOperation
    for CropStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_crop(&self, crop: NewCropModel) -> Result<Crop, CropStoreError> {
        let model = insert_into(crops::table)
            .values(&crop)
            .get_result::<CropModel>(self.conn)?;

        Crop::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> CropStoreAddCropOperation
    for CropStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_crop(&self, crop: NewCropModel) -> Result<Crop, CropStoreError> {
        self.conn.transaction::<_, CropStoreError, _>(|| {
            insert_into(crops::table)
                .values(&crop)
                .execute(self.conn)?;

            let model = crops::table
                .order(crops::id.desc())
                .first::<CropModel>(self.conn)?;

            Crop::try_from(model)
        })
    }
}
