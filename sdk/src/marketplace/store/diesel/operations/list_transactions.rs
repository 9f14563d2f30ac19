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

use std::convert::TryFrom;

use diesel::prelude::*;

use super::MarketplaceStoreOperations;
use crate::marketplace::store::diesel::{
    models::TransactionModel, schema::blockchain_transactions,
};
use crate::marketplace::store::{MarketplaceStoreError, Transaction};

pub(in crate::marketplace::store::diesel) enum TransactionFilter {
    User(i64),
    Listing(i64),
}

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreListTransactionsOperation {
    fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreListTransactionsOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        let mut query = blockchain_transactions::table
            .into_boxed()
            .order(blockchain_transactions::id.asc());

        query = match filter {
            TransactionFilter::User(user_id) => {
                query.filter(blockchain_transactions::user_id.eq(user_id))
            }
            TransactionFilter::Listing(listing_id) => {
                query.filter(blockchain_transactions::listing_id.eq(listing_id))
            }
        };

        query
            .load::<TransactionModel>(self.conn)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreListTransactionsOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, MarketplaceStoreError> {
        let mut query = blockchain_transactions::table
            .into_boxed()
            .order(blockchain_transactions::id.asc());

        query = match filter {
            TransactionFilter::User(user_id) => {
                query.filter(blockchain_transactions::user_id.eq(user_id))
            }
            TransactionFilter::Listing(listing_id) => {
                query.filter(blockchain_transactions::listing_id.eq(listing_id))
            }
        };

        query
            .load::<TransactionModel>(self.conn)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
