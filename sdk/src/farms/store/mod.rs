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

pub use error::FarmStoreError;

/// A farm; `size` is in hectares.
#[derive(Clone, Debug, PartialEq)]
pub struct Farm {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewFarm {
    pub user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub size: Option<f64>,
    pub description: Option<String>,
}

impl NewFarm {
    pub(crate) fn into_farm(self, id: i64) -> Farm {
        Farm {
            id,
            user_id: self.user_id,
            name: self.name,
            location: self.location,
            size: self.size,
            description: self.description,
        }
    }
}

pub trait FarmStore: Send + Sync {
    fn get_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError>;

    /// Lists the farms owned by `user_id`, ordered by id.
    fn list_farms_by_user(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError>;

    fn create_farm(&self, farm: NewFarm) -> Result<Farm, FarmStoreError>;
}

impl<FS> FarmStore for Box<FS>
where
    FS: FarmStore + ?Sized,
{
    fn get_farm(&self, id: i64) -> Result<Option<Farm>, FarmStoreError> {
        (**self).get_farm(id)
    }

    fn list_farms_by_user(&self, user_id: i64) -> Result<Vec<Farm>, FarmStoreError> {
        (**self).list_farms_by_user(user_id)
    }

    fn create_farm(&self, farm: NewFarm) -> Result<Farm, FarmStoreError> {
        (**self).create_farm(farm)
    }
}
