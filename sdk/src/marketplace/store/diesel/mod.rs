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

pub mod models;
mod operations;
pub(crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{
    Listing, MarketplaceStore, MarketplaceStoreError, NewListing, NewTransaction, Transaction,
};
use operations::add_listing::MarketplaceStoreAddListingOperation as _;
use operations::add_transaction::MarketplaceStoreAddTransactionOperation as _;
use operations::fetch_listing::MarketplaceStoreFetchListingOperation as _;
use operations::fetch_transaction::MarketplaceStoreFetchTransactionOperation as _;
use operations::list_listings::{ListingFilter, MarketplaceStoreListListingsOperation as _};
use operations::list_transactions::{
    MarketplaceStoreListTransactionsOperation as _, TransactionFilter,
};
use operations::MarketplaceStoreOperations;

/// A `MarketplaceStore` backed by a diesel connection pool.
#[derive(Clone)]
pub struct DieselMarketplaceStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselMarketplaceStore<C> {
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselMarketplaceStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl MarketplaceStore for DieselMarketplaceStore<diesel::pg::PgConnection> {
    fn get_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).fetch_listing(id)
    }

    fn list_listings(&self) -> Result<Vec<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_listings(ListingFilter::All)
    }

    fn list_listings_by_user(&self, user_id: i64) -> Result<Vec<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_listings(ListingFilter::User(user_id))
    }

    fn create_listing(&self, listing: NewListing) -> Result<Listing, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).add_listing(listing.into())
    }

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).fetch_transaction(id)
    }

    fn list_transactions_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions(TransactionFilter::User(user_id))
    }

    fn list_transactions_by_listing(
        &self,
        listing_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions(TransactionFilter::Listing(listing_id))
    }

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .add_transaction(transaction.into())
    }
}

#[cfg(feature = "sqlite")]
impl MarketplaceStore for DieselMarketplaceStore<diesel::sqlite::SqliteConnection> {
    fn get_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).fetch_listing(id)
    }

    fn list_listings(&self) -> Result<Vec<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_listings(ListingFilter::All)
    }

    fn list_listings_by_user(&self, user_id: i64) -> Result<Vec<Listing>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_listings(ListingFilter::User(user_id))
    }

    fn create_listing(&self, listing: NewListing) -> Result<Listing, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).add_listing(listing.into())
    }

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?).fetch_transaction(id)
    }

    fn list_transactions_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions(TransactionFilter::User(user_id))
    }

    fn list_transactions_by_listing(
        &self,
        listing_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .list_transactions(TransactionFilter::Listing(listing_id))
    }

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, MarketplaceStoreError> {
        MarketplaceStoreOperations::new(&*self.connection_pool.get()?)
            .add_transaction(transaction.into())
    }
}
