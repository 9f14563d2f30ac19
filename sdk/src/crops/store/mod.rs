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

use chrono::NaiveDateTime;

use crate::error::InvalidArgumentError;

pub use error::CropStoreError;

pub const DEFAULT_CROP_STATUS: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,
    NeedsAttention,
    Poor,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Good => "good",
            HealthStatus::NeedsAttention => "needs_attention",
            HealthStatus::Poor => "poor",
        }
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        HealthStatus::Good
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(HealthStatus::Good),
            "needs_attention" => Ok(HealthStatus::NeedsAttention),
            "poor" => Ok(HealthStatus::Poor),
            _ => Err(InvalidArgumentError::new(
                "healthStatus".to_string(),
                format!("unknown health status '{}'", s),
            )),
        }
    }
}

/// A crop planted by a user, optionally on one of their farms. `area` is in hectares.
///
/// `status` is free text such as "active" or "harvested".
#[derive(Clone, Debug, PartialEq)]
pub struct Crop {
    pub id: i64,
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDateTime>,
    pub harvest_date: Option<NaiveDateTime>,
    pub status: String,
    pub health_status: HealthStatus,
    pub area: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCrop {
    pub user_id: i64,
    pub farm_id: Option<i64>,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: Option<NaiveDateTime>,
    pub harvest_date: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub health_status: Option<HealthStatus>,
    pub area: Option<f64>,
}

impl NewCrop {
    pub(crate) fn into_crop(self, id: i64) -> Crop {
        Crop {
            id,
            user_id: self.user_id,
            farm_id: self.farm_id,
            name: self.name,
            variety: self.variety,
            planting_date: self.planting_date,
            harvest_date: self.harvest_date,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_CROP_STATUS.to_string()),
            health_status: self.health_status.unwrap_or_default(),
            area: self.area,
        }
    }
}

pub trait CropStore: Send + Sync {
    fn get_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError>;

    fn list_crops_by_user(&self, user_id: i64) -> Result<Vec<Crop>, CropStoreError>;

    fn list_crops_by_farm(&self, farm_id: i64) -> Result<Vec<Crop>, CropStoreError>;

    fn create_crop(&self, crop: NewCrop) -> Result<Crop, CropStoreError>;

    /// Replaces the status of a crop, and its health status when one is given.
    ///
    /// Returns `NotFoundError` if the crop does not exist.
    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError>;
}

impl<CS> CropStore for Box<CS>
where
    CS: CropStore + ?Sized,
{
    fn get_crop(&self, id: i64) -> Result<Option<Crop>, CropStoreError> {
        (**self).get_crop(id)
    }

    fn list_crops_by_user(&self, user_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        (**self).list_crops_by_user(user_id)
    }

    fn list_crops_by_farm(&self, farm_id: i64) -> Result<Vec<Crop>, CropStoreError> {
        (**self).list_crops_by_farm(farm_id)
    }

    fn create_crop(&self, crop: NewCrop) -> Result<Crop, CropStoreError> {
        (**self).create_crop(crop)
    }

    fn update_crop_status(
        &self,
        id: i64,
        status: &str,
        health_status: Option<HealthStatus>,
    ) -> Result<Crop, CropStoreError> {
        (**self).update_crop_status(id, status, health_status)
    }
}
