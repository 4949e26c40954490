use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::handlers::history::search_history;
use crate::handlers::price::lookup_price;
use crate::models::{HistoryRequest, HistoryResponse, PriceInfoRequest};
use crate::response::{api_response, error_response, ApiResponse};
use crate::state::AppState;

pub const PRICE_INFO_PATH: &str = "/currentPriceInfo";
pub const SEARCH_HISTORY_PATH: &str = "/getSearchHistory";

/// Route one gateway request. Total: every failure is converted into an
/// error envelope, so the frontend only ever copies the result out.
pub async fn handle(
    state: &AppState,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> ApiResponse {
    debug!(%method, %path, "Routing request");
    match route(state, method, path, body).await {
        Ok(response) => response,
        Err(err) => error_response(&err),
    }
}

async fn route(
    state: &AppState,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<ApiResponse, ApiError> {
    match path {
        PRICE_INFO_PATH => {
            ensure_post(method, path)?;
            let request = parse_price_info(body)?;
            let quote = lookup_price(state, &request).await?;
            Ok(api_response(200, &quote))
        }
        SEARCH_HISTORY_PATH => {
            ensure_post(method, path)?;
            let request = parse_history(body)?;
            let entries = search_history(state, &request).await?;
            Ok(api_response(
                200,
                &HistoryResponse {
                    search_history: entries,
                },
            ))
        }
        _ => Err(ApiError::RouteNotFound(path.to_string())),
    }
}

fn ensure_post(method: &str, path: &str) -> Result<(), ApiError> {
    if method != "POST" {
        return Err(ApiError::MethodNotAllowed {
            method: method.to_string(),
            path: path.to_string(),
        });
    }
    Ok(())
}

fn parse_price_info(body: Option<&str>) -> Result<PriceInfoRequest, ApiError> {
    let body = parse_body(body)?;
    Ok(PriceInfoRequest {
        crypto: string_field(&body, "crypto")?,
        email_id: string_field(&body, "emailID")?,
    })
}

fn parse_history(body: Option<&str>) -> Result<HistoryRequest, ApiError> {
    let body = parse_body(body)?;
    Ok(HistoryRequest {
        email_id: string_field(&body, "emailID")?,
    })
}

fn parse_body(body: Option<&str>) -> Result<Value, ApiError> {
    body.and_then(|raw| serde_json::from_str(raw).ok())
        .ok_or_else(|| ApiError::Validation("Request body must be valid JSON.".into()))
}

fn string_field(body: &Value, name: &str) -> Result<String, ApiError> {
    let value = body
        .get(name)
        .ok_or_else(|| ApiError::Validation(format!("Missing required field \"{name}\".")))?;
    match value.as_str() {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::Validation(format!(
            "Field \"{name}\" must be a non-empty string."
        ))),
    }
}
