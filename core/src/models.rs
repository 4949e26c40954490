use serde::{Deserialize, Serialize};

/// Timestamp pattern used for every persisted record, in UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted snapshot of an asset's market data for one user.
///
/// Money fields (`price`, `market_cap`, `volume_24h`) are stored as
/// `$`-prefixed two-decimal strings; `change_24h` is a percentage string.
/// Records are write-once: nothing in this crate updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub id: String,
    pub crypto_symbol: String,
    pub user_email: String,
    pub price: String,
    pub market_cap: String,
    pub volume_24h: String,
    pub change_24h: String,
    pub timestamp: String,
}

/// Validated body of `POST /currentPriceInfo`.
#[derive(Debug, Clone)]
pub struct PriceInfoRequest {
    pub crypto: String,
    pub email_id: String,
}

/// Validated body of `POST /getSearchHistory`.
#[derive(Debug, Clone)]
pub struct HistoryRequest {
    pub email_id: String,
}

/// Per-asset result returned by a successful price lookup.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    pub crypto: String,
    pub price: String,
    pub market_cap: String,
    pub volume_24h: String,
    pub change_24h: String,
    pub timestamp: String,
}

impl From<&PriceRecord> for AssetQuote {
    fn from(record: &PriceRecord) -> Self {
        Self {
            crypto: record.crypto_symbol.clone(),
            price: record.price.clone(),
            market_cap: record.market_cap.clone(),
            volume_24h: record.volume_24h.clone(),
            change_24h: record.change_24h.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}

/// Projection of a [`PriceRecord`] returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub crypto: String,
    pub price: String,
    pub timestamp: String,
}

/// Body of a 200 response from `/getSearchHistory`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub search_history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_camel_case_attributes() {
        let record = PriceRecord {
            id: "a1".into(),
            crypto_symbol: "bitcoin".into(),
            user_email: "user@example.com".into(),
            price: "$67342.12".into(),
            market_cap: "$1324500000000.00".into(),
            volume_24h: "$28300000000.00".into(),
            change_24h: "-1.25%".into(),
            timestamp: "2026-08-07 12:00:00".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["cryptoSymbol"], "bitcoin");
        assert_eq!(value["userEmail"], "user@example.com");
        assert_eq!(value["marketCap"], "$1324500000000.00");
        assert_eq!(value["volume24h"], "$28300000000.00");
        assert_eq!(value["change24h"], "-1.25%");
    }
}
