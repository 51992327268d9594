//! HTTP request handlers for the web adapter.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use chrono::Duration;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

use crate::domain::error::GbceError;
use crate::domain::stock::StockDefinition;
use crate::domain::trade::TradeType;

use super::{AppState, WebError};

pub const TRADE_RECORDED: &str = "Trade recorded successfully";

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub symbol: String,
    pub quantity: i64,
    pub trade_type: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct DividendYieldResponse {
    pub dividend_yield: f64,
}

#[derive(Debug, Serialize)]
pub struct PeRatioResponse {
    #[serde(serialize_with = "serialize_ratio")]
    pub pe_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VwspResponse {
    pub vwsp: f64,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub gbce_index: f64,
}

/// JSON has no infinity, so an unbounded ratio is written as the string
/// `"Infinity"`.
fn serialize_ratio<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        })
    } else {
        serializer.serialize_f64(*value)
    }
}

pub async fn list_stocks(State(state): State<Arc<AppState>>) -> Json<Vec<StockDefinition>> {
    Json(state.market.stocks())
}

pub async fn dividend_yield(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<DividendYieldResponse>, WebError> {
    let dividend_yield = state.market.dividend_yield(&symbol, query.price)?;
    Ok(Json(DividendYieldResponse { dividend_yield }))
}

pub async fn pe_ratio(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<PeRatioResponse>, WebError> {
    let pe_ratio = state.market.pe_ratio(&symbol, query.price)?;
    Ok(Json(PeRatioResponse { pe_ratio }))
}

/// Every rejection here is a client input error, unreadable bodies included.
pub async fn record_trade(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, WebError> {
    let Json(request) = payload.map_err(|e| WebError::bad_request(e.body_text()))?;
    let trade_type: TradeType = request
        .trade_type
        .parse()
        .map_err(|e: GbceError| WebError::bad_request(e.to_string()))?;

    state
        .market
        .record_trade(&request.symbol, request.quantity, trade_type, request.price)
        .map_err(|e| WebError::bad_request(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: TRADE_RECORDED,
    }))
}

pub async fn vwsp(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<VwspResponse>, WebError> {
    let window = match query.minutes {
        Some(0) => return Err(WebError::bad_request("minutes must be positive")),
        Some(m) => Some(Duration::minutes(i64::from(m))),
        None => None,
    };
    let vwsp = state.market.volume_weighted_price(&symbol, window)?;
    Ok(Json(VwspResponse { vwsp }))
}

pub async fn gbce_index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        gbce_index: state.market.gbce_index(),
    })
}

pub async fn not_found() -> WebError {
    WebError::not_found("no such route")
}
