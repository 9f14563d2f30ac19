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

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::crops::store::{Crop, HealthStatus, NewCrop};
use crate::rest_api::resources::utc;
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropSlice {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: Option<DateTime<Utc>>,
    pub harvest_date: Option<DateTime<Utc>>,
    pub status: String,
    pub health_status: HealthStatus,
    pub area: Option<f64>,
}

impl From<Crop> for CropSlice {
    fn from(crop: Crop) -> Self {
        Self {
            id: crop.id,
            user_id: crop.user_id,
            farm_id: crop.farm_id,
            name: crop.name,
            variety: crop.variety,
            planting_date: crop.planting_date.map(utc),
            harvest_date: crop.harvest_date.map(utc),
            status: crop.status,
            health_status: crop.health_status,
            area: crop.area,
        }
    }
}

impl FromJson for NewCrop {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let crop = NewCrop {
            user_id: validator.required_integer("userId"),
            farm_id: validator.optional_integer("farmId"),
            name: validator.required_non_empty("name"),
            variety: validator.optional_string("variety"),
            planting_date: validator.optional_timestamp("plantingDate"),
            harvest_date: validator.optional_timestamp("harvestDate"),
            status: validator.optional_string("status"),
            health_status: validator.optional_enum("healthStatus"),
            area: validator.optional_number("area"),
        };
        validator.finish()?;
        Ok(crop)
    }
}

/// Body of a crop status change. The health status is kept when not given.
#[derive(Debug, PartialEq)]
pub struct CropStatusUpdate {
    pub status: String,
    pub health_status: Option<HealthStatus>,
}

impl FromJson for CropStatusUpdate {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let update = CropStatusUpdate {
            status: validator.required_non_empty("status"),
            health_status: validator.optional_enum("healthStatus"),
        };
        validator.finish()?;
        Ok(update)
    }
}
