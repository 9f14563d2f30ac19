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

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreFetchTransactionOperation {
    fn fetch_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreFetchTransactionOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn fetch_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        blockchain_transactions::table
            .find(id)
            .first::<TransactionModel>(self.conn)
            .optional()?
            .map(Transaction::try_from)
            .transpose()
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreFetchTransactionOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn fetch_transaction(&self, id: i64) -> Result<Option<Transaction>, MarketplaceStoreError> {
        blockchain_transactions::table
            .find(id)
            .first::<TransactionModel>(self.conn)
            .optional()?
            .map(Transaction::try_from)
            .transpose()
    }
}
