use thiserror::Error;

use crate::clients::notifier::NotifyError;
use crate::clients::price_feed::FeedError;
use crate::clients::records::StoreError;
use crate::clients::secrets::SecretError;

/// Request-level error taxonomy. The `Display` text of each variant is
/// returned verbatim to the client as `{"message": ...}`; sources are kept
/// for logs only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Method {method} not allowed on {path}.")]
    MethodNotAllowed { method: String, path: String },

    #[error("Route {0} not found.")]
    RouteNotFound(String),

    #[error("Failed to read the price feed API key.")]
    SecretFetch(#[source] SecretError),

    #[error("Cryptocurrency \"{0}\" does not exist or is not supported.")]
    UnknownAsset(String),

    #[error("Failed to fetch current price information.")]
    PriceFeed(#[source] FeedError),

    #[error("Failed to save the price record.")]
    Persist(#[source] StoreError),

    /// The records were already written when the notification failed; the
    /// count makes the partial state explicit. There is no compensation.
    #[error("Failed to send the price email.")]
    EmailSend {
        records_saved: usize,
        #[source]
        source: NotifyError,
    },

    #[error("Failed to load search history.")]
    HistoryQuery(#[source] StoreError),

    #[error("Internal server error.")]
    Internal(String),
}

impl ApiError {
    /// HTTP status returned to the gateway for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::UnknownAsset(_) => 400,
            Self::RouteNotFound(_) => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::SecretFetch(_) => 502,
            Self::PriceFeed(_)
            | Self::Persist(_)
            | Self::EmailSend { .. }
            | Self::HistoryQuery(_)
            | Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).status(), 400);
        assert_eq!(ApiError::UnknownAsset("notacoin".into()).status(), 400);
        assert_eq!(ApiError::RouteNotFound("/x".into()).status(), 404);
        assert_eq!(
            ApiError::MethodNotAllowed {
                method: "GET".into(),
                path: "/currentPriceInfo".into()
            }
            .status(),
            405
        );
        assert_eq!(
            ApiError::SecretFetch(SecretError("nope".into())).status(),
            502
        );
        assert_eq!(ApiError::PriceFeed(FeedError("down".into())).status(), 500);
        assert_eq!(ApiError::Persist(StoreError("full".into())).status(), 500);
        assert_eq!(
            ApiError::EmailSend {
                records_saved: 1,
                source: NotifyError("bounced".into())
            }
            .status(),
            500
        );
        assert_eq!(
            ApiError::HistoryQuery(StoreError("down".into())).status(),
            500
        );
        assert_eq!(ApiError::Internal("bug".into()).status(), 500);
    }

    #[test]
    fn unknown_asset_message_names_the_symbol() {
        let err = ApiError::UnknownAsset("notacoin".into());
        assert_eq!(
            err.to_string(),
            "Cryptocurrency \"notacoin\" does not exist or is not supported."
        );
    }

    #[test]
    fn method_not_allowed_message_names_the_method() {
        let err = ApiError::MethodNotAllowed {
            method: "GET".into(),
            path: "/getSearchHistory".into(),
        };
        assert_eq!(err.to_string(), "Method GET not allowed on /getSearchHistory.");
    }
}
