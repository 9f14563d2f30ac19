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

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;

use super::{
    Listing, MarketplaceStore, MarketplaceStoreError, NewListing, NewTransaction, Transaction,
};

#[derive(Default)]
struct MarketplaceTables {
    last_listing_id: i64,
    listings: BTreeMap<i64, Listing>,
    last_transaction_id: i64,
    transactions: BTreeMap<i64, Transaction>,
}

#[derive(Clone, Default)]
pub struct MemoryMarketplaceStore {
    inner: Arc<Mutex<MarketplaceTables>>,
}

impl MemoryMarketplaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> MarketplaceStoreError {
    MarketplaceStoreError::InternalError(InternalError::with_message(
        "Cannot access marketplace: mutex lock poisoned".to_string(),
    ))
}

impl MarketplaceStore for MemoryMarketplaceStore {
    fn get_listing(&self, id: i64) -> Result<Option<Listing>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.listings.get(&id).cloned())
    }

    fn list_listings(&self) -> Result<Vec<Listing>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.listings.values().cloned().collect())
    }

    fn list_listings_by_user(&self, user_id: i64) -> Result<Vec<Listing>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .listings
            .values()
            .filter(|listing| listing.user_id == user_id)
            .cloned()
            .collect())
    }

    fn create_listing(&self, listing: NewListing) -> Result<Listing, MarketplaceStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_listing_id += 1;
        let listing = listing.into_listing(inner.last_listing_id);
        inner.listings.insert(listing.id, listing.clone());

        Ok(listing)
    }

    fn get_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner.transactions.get(&id).cloned())
    }

    fn list_transactions_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .transactions
            .values()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_transactions_by_listing(
        &self,
        listing_id: i64,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;

        Ok(inner
            .transactions
            .values()
            .filter(|transaction| transaction.listing_id == Some(listing_id))
            .cloned()
            .collect())
    }

    fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, MarketplaceStoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        inner.last_transaction_id += 1;
        let transaction = transaction.into_transaction(inner.last_transaction_id);
        inner
            .transactions
            .insert(transaction.id, transaction.clone());

        Ok(transaction)
    }
}
