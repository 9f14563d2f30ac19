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

use diesel::{dsl::insert_into, prelude::*};

use super::MarketplaceStoreOperations;
use crate::marketplace::store::diesel::{
    models::{NewTransactionModel, TransactionModel},
    schema::blockchain_transactions,
};
use crate::marketplace::store::{MarketplaceStoreError, Transaction};

pub(in crate::marketplace::store::diesel) trait MarketplaceStoreAddTransactionOperation {
    fn add_transaction(
        &self,
        transaction: NewTransactionModel,
    ) -> Result<Transaction, MarketplaceStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> MarketplaceStoreAddTransactionOperation
    for MarketplaceStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_transaction(
        &self,
        transaction: NewTransactionModel,
    ) -> Result<Transaction, MarketplaceStoreError> {
        let model = insert_into(blockchain_transactions::table)
            .values(&transaction)
            .get_result::<TransactionModel>(self.conn)?;

        Transaction::try_from(model)
    }
}

#[cfg(feature = "sqlite")]
impl<'a> MarketplaceStoreAddTransactionOperation
    for MarketplaceStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_transaction(
        &self,
        transaction: NewTransactionModel,
    ) -> Result<Transaction, MarketplaceStoreError> {
        self.conn.transaction::<_, MarketplaceStoreError, _>(|| {
            insert_into(blockchain_transactions::table)
                .values(&transaction)
                .execute(self.conn)?;

            let model = blockchain_transactions::table
                .order(blockchain_transactions::id.desc())
                .first::<TransactionModel>(self.conn)?;

            Transaction::try_from(model)
        })
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use diesel::sqlite::SqliteConnection;
    use serde_json::json;

    use crate::marketplace::store::diesel::operations::list_transactions::{
        MarketplaceStoreListTransactionsOperation, TransactionFilter,
    };
    use crate::marketplace::store::TransactionType;
    use crate::migrations::run_sqlite_migrations;

    #[test]
    fn test_add_transaction_keeps_details() -> Result<(), Box<dyn std::error::Error>> {
        let conn = SqliteConnection::establish(":memory:")?;
        run_sqlite_migrations(&conn)?;

        let ops = MarketplaceStoreOperations::new(&conn);
        let details = json!({"inspector": "FSSAI", "grade": "A", "moisture": 12.5});
        let timestamp = NaiveDate::from_ymd(2024, 3, 9).and_hms(11, 0, 0);

        let transaction = ops.add_transaction(NewTransactionModel {
            user_id: 1,
            listing_id: Some(4),
            transaction_type: "quality_check".to_string(),
            details: Some(details.to_string()),
            transaction_hash: Some("0x9f2c".to_string()),
            timestamp,
        })?;

        assert_eq!(transaction.transaction_type, TransactionType::QualityCheck);
        assert_eq!(transaction.details, Some(details));
        assert_eq!(transaction.timestamp, timestamp);

        ops.add_transaction(NewTransactionModel {
            user_id: 1,
            listing_id: None,
            transaction_type: "harvest".to_string(),
            details: None,
            transaction_hash: None,
            timestamp,
        })?;

        let by_listing = ops.list_transactions(TransactionFilter::Listing(4))?;
        assert_eq!(by_listing, vec![transaction]);
        assert_eq!(ops.list_transactions(TransactionFilter::User(1))?.len(), 2);

        Ok(())
    }
}
