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

use diesel::prelude::*;

use super::MarketplaceStoreOperations;
use crate::marketplace::store::diesel::{models::ListingModel, schema::marketplace_listings};
use crate::marketplace::store::{Listing, MarketplaceStoreError};

pub(in crate::marketplace::store::diesel) enum ListingFilter {
    All,
    User(i64),
}

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreListListingsOperation {
    fn list_listings(&self, filter: ListingFilter) -> Result<Vec<Listing>, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreListListingsOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_listings(&self, filter: ListingFilter) -> Result<Vec<Listing>, MarketplaceStoreError> {
        let mut query = marketplace_listings::table
            .into_boxed()
            .order(marketplace_listings::id.asc());

        if let ListingFilter::User(user_id) = filter {
            query = query.filter(marketplace_listings::user_id.eq(user_id));
        }

        Ok(query
            .load::<ListingModel>(self.conn)?
            .into_iter()
            .map(Listing::from)
            .collect())
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreListListingsOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_listings(&self, filter: ListingFilter) -> Result<Vec<Listing>, MarketplaceStoreError> {
        let mut query = marketplace_listings::table
            .into_boxed()
            .order(marketplace_listings::id.asc());

        if let ListingFilter::User(user_id) = filter {
            query = query.filter(marketplace_listings::user_id.eq(user_id));
        }

        Ok(query
            .load::<ListingModel>(self.conn)?
            .into_iter()
            .map(Listing::from)
            .collect())
    }
}
