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

use chrono::NaiveDateTime;

use super::schema::crops;
use crate::crops::store::{Crop, CropStoreError, NewCrop, DEFAULT_CROP_STATUS};
use crate::error::InternalError;

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "crops"]
pub struct NewCropModel {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDateTime>,
    pub harvest_date: Option<NaiveDateTime>,
    pub status: String,
    pub health_status: String,
    pub area: Option<f64>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct CropModel {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDateTime>,
    pub harvest_date: Option<NaiveDateTime>,
    pub status: String,
    pub health_status: String,
    pub area: Option<f64>,
}

impl From<NewCrop> for NewCropModel {
    fn from(crop: NewCrop) -> Self {
        Self {
            user_id: crop.user_id,
            farm_id: crop.farm_id,
            name: crop.name,
            variety: crop.variety,
            planting_date: crop.planting_date,
            harvest_date: crop.harvest_date,
            status: crop
                .status
                .unwrap_or_else(|| DEFAULT_CROP_STATUS.to_string()),
            health_status: crop.health_status.unwrap_or_default().to_string(),
            area: crop.area,
        }
    }
}

impl TryFrom<CropModel> for Crop {
    type Error = CropStoreError;

    fn try_from(model: CropModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            farm_id: model.farm_id,
            name: model.name,
            variety: model.variety,
            planting_date: model.planting_date,
            harvest_date: model.harvest_date,
            status: model.status,
            health_status: model.health_status.parse().map_err(|err| {
                CropStoreError::InternalError(InternalError::from_source(Box::new(err)))
            })?,
            area: model.area,
        })
    }
}
