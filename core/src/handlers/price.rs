use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{AssetQuote, PriceInfoRequest, PriceRecord, TIMESTAMP_FORMAT};
use crate::state::AppState;

const EMAIL_SUBJECT: &str = "Your cryptocurrency price lookup";
const EMAIL_HEADER: &str =
    "Hello,\n\nHere is the current market information for your requested cryptocurrency:\n";
const EMAIL_FOOTER: &str = "\nThank you for using Crypto Tracker.\n";

/// Price lookup pipeline: secret fetch, price fetch, persist, notify.
/// Each step short-circuits into its own [`ApiError`] variant; there are no
/// retries and no compensation between the persist and notify steps.
pub async fn lookup_price(
    state: &AppState,
    request: &PriceInfoRequest,
) -> Result<AssetQuote, ApiError> {
    let api_key = state
        .secrets
        .get(&state.config.token_parameter)
        .await
        .map_err(ApiError::SecretFetch)?;

    let prices = state
        .feed
        .simple_price(&request.crypto, &api_key)
        .await
        .map_err(ApiError::PriceFeed)?;
    if !prices.contains_key(&request.crypto) {
        return Err(ApiError::UnknownAsset(request.crypto.clone()));
    }

    let mut quotes = Vec::with_capacity(prices.len());
    for (symbol, price) in &prices {
        let record = PriceRecord {
            id: Uuid::new_v4().to_string(),
            crypto_symbol: symbol.clone(),
            user_email: request.email_id.clone(),
            price: format!("${:.2}", price.usd),
            market_cap: format!("${:.2}", price.usd_market_cap),
            volume_24h: format!("${:.2}", price.usd_24h_vol),
            change_24h: format!("{:.2}%", price.usd_24h_change),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        state.records.put(&record).await.map_err(ApiError::Persist)?;
        quotes.push(AssetQuote::from(&record));
    }

    state
        .notifier
        .send_email(&request.email_id, EMAIL_SUBJECT, &compose_email(&quotes))
        .await
        .map_err(|source| {
            error!(records_saved = quotes.len(), "Records saved but notification failed");
            ApiError::EmailSend {
                records_saved: quotes.len(),
                source,
            }
        })?;

    info!(symbol = %request.crypto, "Price lookup completed");

    // present: membership was checked against the feed response above
    quotes
        .into_iter()
        .find(|quote| quote.crypto == request.crypto)
        .ok_or_else(|| ApiError::Internal("requested asset missing from quotes".into()))
}

fn compose_email(quotes: &[AssetQuote]) -> String {
    let mut body = String::from(EMAIL_HEADER);
    for quote in quotes {
        body.push_str(&format!(
            "\n{}: price {}, market cap {}, 24h volume {}, 24h change {}, recorded at {} UTC\n",
            quote.crypto,
            quote.price,
            quote.market_cap,
            quote.volume_24h,
            quote.change_24h,
            quote.timestamp
        ));
    }
    body.push_str(EMAIL_FOOTER);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_has_header_asset_lines_and_footer() {
        let quotes = vec![AssetQuote {
            crypto: "bitcoin".into(),
            price: "$67342.12".into(),
            market_cap: "$1324500000000.00".into(),
            volume_24h: "$28300000000.00".into(),
            change_24h: "-1.25%".into(),
            timestamp: "2026-08-07 12:00:00".into(),
        }];

        let body = compose_email(&quotes);
        assert!(body.starts_with("Hello,"));
        assert!(body.contains(
            "bitcoin: price $67342.12, market cap $1324500000000.00, \
             24h volume $28300000000.00, 24h change -1.25%, \
             recorded at 2026-08-07 12:00:00 UTC"
        ));
        assert!(body.ends_with("Thank you for using Crypto Tracker.\n"));
    }
}
