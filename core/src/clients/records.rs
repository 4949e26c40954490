use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, error};

use crate::models::{HistoryEntry, PriceRecord};

/// Global secondary index partitioned by `userEmail`.
pub const USER_EMAIL_INDEX: &str = "userEmail-index";

#[derive(Debug, thiserror::Error)]
#[error("record store request failed: {0}")]
pub struct StoreError(pub String);

/// Continuation point for a paged history query. Carries the table key and
/// the index key of the last record seen, which is enough to restart the
/// query from anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    pub id: String,
    pub user_email: String,
}

/// One store-sized page of projected history entries.
#[derive(Debug, Default)]
pub struct RecordPage {
    pub entries: Vec<HistoryEntry>,
    pub next: Option<PageCursor>,
}

/// Persistence for price records: keyed writes plus a paged query over the
/// email index. Records are never updated or deleted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: &PriceRecord) -> Result<(), StoreError>;

    /// Fetch the page following `cursor`, or the first page when `None`.
    async fn query_page(
        &self,
        email: &str,
        cursor: Option<PageCursor>,
    ) -> Result<RecordPage, StoreError>;
}

/// DynamoDB-backed record store.
///
/// Table schema: `id` partition key, all attributes camelCase strings,
/// `userEmail-index` GSI for the history query.
pub struct DynamoRecordStore {
    client: Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put(&self, record: &PriceRecord) -> Result<(), StoreError> {
        debug!(
            table = %self.table_name,
            id = %record.id,
            symbol = %record.crypto_symbol,
            "Writing price record"
        );

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_item(record)))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "DynamoDB put_item failed");
                StoreError(e.to_string())
            })?;

        Ok(())
    }

    async fn query_page(
        &self,
        email: &str,
        cursor: Option<PageCursor>,
    ) -> Result<RecordPage, StoreError> {
        let mut query = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(USER_EMAIL_INDEX)
            .key_condition_expression("userEmail = :email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            // `timestamp` is a DynamoDB reserved word
            .projection_expression("cryptoSymbol, price, #ts")
            .expression_attribute_names("#ts", "timestamp");

        if let Some(cursor) = &cursor {
            query = query.set_exclusive_start_key(Some(cursor_key(cursor)));
        }

        let output = query.send().await.map_err(|e| {
            error!(error = %e, "DynamoDB query failed");
            StoreError(e.to_string())
        })?;

        let entries = output.items().iter().filter_map(entry_from_item).collect();
        let next = match output.last_evaluated_key() {
            Some(key) => Some(cursor_from_key(key)?),
            None => None,
        };

        Ok(RecordPage { entries, next })
    }
}

fn record_item(record: &PriceRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(record.id.clone()));
    item.insert(
        "cryptoSymbol".to_string(),
        AttributeValue::S(record.crypto_symbol.clone()),
    );
    item.insert(
        "userEmail".to_string(),
        AttributeValue::S(record.user_email.clone()),
    );
    item.insert("price".to_string(), AttributeValue::S(record.price.clone()));
    item.insert(
        "marketCap".to_string(),
        AttributeValue::S(record.market_cap.clone()),
    );
    item.insert(
        "volume24h".to_string(),
        AttributeValue::S(record.volume_24h.clone()),
    );
    item.insert(
        "change24h".to_string(),
        AttributeValue::S(record.change_24h.clone()),
    );
    item.insert(
        "timestamp".to_string(),
        AttributeValue::S(record.timestamp.clone()),
    );
    item
}

fn entry_from_item(item: &HashMap<String, AttributeValue>) -> Option<HistoryEntry> {
    Some(HistoryEntry {
        crypto: item.get("cryptoSymbol")?.as_s().ok()?.clone(),
        price: item.get("price")?.as_s().ok()?.clone(),
        timestamp: item.get("timestamp")?.as_s().ok()?.clone(),
    })
}

fn cursor_key(cursor: &PageCursor) -> HashMap<String, AttributeValue> {
    let mut key = HashMap::new();
    key.insert("id".to_string(), AttributeValue::S(cursor.id.clone()));
    key.insert(
        "userEmail".to_string(),
        AttributeValue::S(cursor.user_email.clone()),
    );
    key
}

fn cursor_from_key(key: &HashMap<String, AttributeValue>) -> Result<PageCursor, StoreError> {
    let field = |name: &str| {
        key.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| StoreError(format!("continuation key missing {name}")))
    };

    Ok(PageCursor {
        id: field("id")?,
        user_email: field("userEmail")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PriceRecord {
        PriceRecord {
            id: "rec-1".into(),
            crypto_symbol: "bitcoin".into(),
            user_email: "user@example.com".into(),
            price: "$67342.12".into(),
            market_cap: "$1324500000000.00".into(),
            volume_24h: "$28300000000.00".into(),
            change_24h: "-1.25%".into(),
            timestamp: "2026-08-07 12:00:00".into(),
        }
    }

    #[test]
    fn record_item_uses_camel_case_string_attributes() {
        let item = record_item(&sample_record());
        assert_eq!(item["id"], AttributeValue::S("rec-1".into()));
        assert_eq!(item["cryptoSymbol"], AttributeValue::S("bitcoin".into()));
        assert_eq!(item["userEmail"], AttributeValue::S("user@example.com".into()));
        assert_eq!(item["marketCap"], AttributeValue::S("$1324500000000.00".into()));
        assert_eq!(item["volume24h"], AttributeValue::S("$28300000000.00".into()));
        assert_eq!(item["change24h"], AttributeValue::S("-1.25%".into()));
        assert_eq!(item.len(), 8);
    }

    #[test]
    fn entry_from_item_projects_three_fields() {
        let item = record_item(&sample_record());
        let entry = entry_from_item(&item).unwrap();
        assert_eq!(entry.crypto, "bitcoin");
        assert_eq!(entry.price, "$67342.12");
        assert_eq!(entry.timestamp, "2026-08-07 12:00:00");
    }

    #[test]
    fn entry_from_item_rejects_incomplete_items() {
        let mut item = record_item(&sample_record());
        item.remove("price");
        assert!(entry_from_item(&item).is_none());
    }

    #[test]
    fn cursor_round_trips_through_key_attributes() {
        let cursor = PageCursor {
            id: "rec-1".into(),
            user_email: "user@example.com".into(),
        };
        assert_eq!(cursor_from_key(&cursor_key(&cursor)).unwrap(), cursor);
    }

    #[test]
    fn malformed_continuation_key_is_an_error() {
        let mut key = HashMap::new();
        key.insert("id".to_string(), AttributeValue::S("rec-1".into()));
        let err = cursor_from_key(&key).unwrap_err();
        assert!(err.to_string().contains("userEmail"));
    }
}
