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

use super::schema::farms;
use crate::farms::store::{Farm, NewFarm};

#[derive(Insertable, PartialEq, Debug)]
#[table_name = "farms"]
pub struct NewFarmModel {
    pub user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub description: Option<String>,
}

#[derive(Queryable, PartialEq, Debug)]
pub struct FarmModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub description: Option<String>,
}

impl From<NewFarm> for NewFarmModel {
    fn from(farm: NewFarm) -> Self {
        Self {
            user_id: farm.user_id,
            name: farm.name,
            location: farm.location,
            size: farm.size,
            description: farm.description,
        }
    }
}

impl From<FarmModel> for Farm {
    fn from(model: FarmModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            location: model.location,
            size: model.size,
            description: model.description,
        }
    }
}
