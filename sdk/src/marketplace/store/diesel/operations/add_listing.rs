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

use diesel::{dsl::insert_into, prelude::*};

use super::MarketplaceStoreOperations;
use crate::marketplace::store::diesel::{
    models::{ListingModel, NewListingModel},
    schema::marketplace_listings,
};
use crate::marketplace::store::{Listing, MarketplaceStoreError};

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreAddListingOperation {
    fn add_listing(&self, listing: NewListingModel) -> Result<Listing, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreAddListingOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_listing(&self, listing: NewListingModel) -> Result<Listing, MarketplaceStoreError> {
        let model = insert_into(marketplace_listings::table)
            .values(&listing)
            .get_result::<ListingModel>(self.conn)?;

        Ok(Listing::from(model))
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreAddListingOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_listing(&self, listing: NewListingModel) -> Result<Listing, MarketplaceStoreError> {
        self.conn.transaction::<_, MarketplaceStoreError, _>(|| {
            insert_into(marketplace_listings::table)
                .values(&listing)
                .execute(self.conn)?;

            let model = marketplace_listings::table
                .order(marketplace_listings::id.desc())
                .first::<ListingModel>(self.conn)?;

            Ok(Listing::from(model))
        })
    }
}
