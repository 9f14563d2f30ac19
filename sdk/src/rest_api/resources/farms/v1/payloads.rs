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

use serde_json::Value;

use crate::farms::store::{Farm, NewFarm};
use crate::rest_api::resources::validation::{FromJson, PayloadValidator, ValidationError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmSlice {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub description: Option<String>,
}

impl From<Farm> for FarmSlice {
    fn from(farm: Farm) -> Self {
        Self {
            id: farm.id,
            user_id: farm.user_id,
            name: farm.name,
            location: farm.location,
            size: farm.size,
            description: farm.description,
        }
    }
}

impl FromJson for NewFarm {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut validator = PayloadValidator::new(value);
        let farm = NewFarm {
            user_id: validator.required_integer("userId"),
            name: validator.required_non_empty("name"),
            location: validator.optional_string("location"),
            size: validator.optional_number("size"),
            description: validator.optional_string("description"),
        };
        validator.finish()?;
        Ok(farm)
    }
}
