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

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreFetchListingOperation {
    fn fetch_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreFetchListingOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        Ok(marketplace_listings::table
            .find(id)
            .first::<ListingModel>(self.conn)
            .optional()?
            .map(Listing::from))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreFetchListingOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        Ok(marketplace_listings::table
            .find(id)
            .first::<ListingModel>(self.conn)
            .optional()?
            .map(Listing::from))
    }
}
