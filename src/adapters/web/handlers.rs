//! HTTP request handlers for the JSON API.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::filter::FilterCriteria;
use crate::domain::query::{ListParams, Page};
use crate::domain::sort::{SortField, SortOrder};
use crate::domain::trade::{Side, Trade, TradeSubmission};

use super::{ApiError, AppState};

pub async fn add_trade(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<TradeSubmission>,
) -> Result<Json<Trade>, ApiError> {
    let trade = state.store.append(submission)?;
    Ok(Json(trade))
}

/// Missing records are an empty result, not an error: the body is `null`.
pub async fn get_trade(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<Option<Trade>> {
    Json(state.store.by_id(id))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Trade>> {
    Json(state.store.search(&query.q))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub asset_class: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub trade_type: Option<String>,
}

impl FilterQuery {
    fn into_criteria(self) -> Result<FilterCriteria, ApiError> {
        let trade_type = self
            .trade_type
            .as_deref()
            .map(Side::from_str)
            .transpose()?;

        Ok(FilterCriteria {
            asset_class: self.asset_class,
            start: self.start,
            end: self.end,
            min_price: self.min_price,
            max_price: self.max_price,
            trade_type,
        })
    }
}

pub async fn filter_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Trade>>, ApiError> {
    let criteria = query.into_criteria()?;
    Ok(Json(state.store.filter(&criteria)))
}

// No serde(flatten) of FilterQuery here: flattening through the urlencoded
// deserializer loses the typed fields, so the criteria are spelled out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub asset_class: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub trade_type: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

pub async fn list_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Trade>>, ApiError> {
    let criteria = FilterQuery {
        asset_class: query.asset_class,
        start: query.start,
        end: query.end,
        min_price: query.min_price,
        max_price: query.max_price,
        trade_type: query.trade_type,
    }
    .into_criteria()?;

    let sort = query
        .sort
        .as_deref()
        .map(SortField::from_str)
        .transpose()?;
    let order = query
        .order
        .as_deref()
        .map(SortOrder::from_str)
        .transpose()?
        .unwrap_or_default();

    let params = ListParams {
        criteria,
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(10),
        sort,
        order,
    };

    let page = state.store.list(&params)?;
    Ok(Json(page))
}
