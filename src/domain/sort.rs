//! Ordering of trade records by a named field.
//!
//! Accepted sort keys are an explicit enumeration of the wire field names;
//! anything else is rejected at parse time instead of silently not sorting.
//! Absent optional values order after present ones in both directions.

use crate::domain::error::BlotterError;
use crate::domain::trade::Trade;
use std::cmp::Ordering;
use std::str::FromStr;

/// A sortable field. Nested `tradeDetails` fields are addressed either by
/// their bare name (`price`) or the dotted form (`tradeDetails.price`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    TradeId,
    AssetClass,
    Counterparty,
    InstrumentId,
    InstrumentName,
    TradeDateTime,
    Trader,
    Price,
    Quantity,
    BuySellIndicator,
}

impl FromStr for SortField {
    type Err = BlotterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tradeId" => Ok(SortField::TradeId),
            "assetClass" => Ok(SortField::AssetClass),
            "counterparty" => Ok(SortField::Counterparty),
            "instrumentId" => Ok(SortField::InstrumentId),
            "instrumentName" => Ok(SortField::InstrumentName),
            "tradeDateTime" => Ok(SortField::TradeDateTime),
            "trader" => Ok(SortField::Trader),
            "price" | "tradeDetails.price" => Ok(SortField::Price),
            "quantity" | "tradeDetails.quantity" => Ok(SortField::Quantity),
            "buySellIndicator" | "tradeDetails.buySellIndicator" => {
                Ok(SortField::BuySellIndicator)
            }
            _ => Err(BlotterError::InvalidSortField {
                field: s.to_string(),
            }),
        }
    }
}

/// Sort direction; `asc` unless the caller says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = BlotterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(BlotterError::InvalidOrder { value: s.to_string() }),
        }
    }
}

/// Stable sort by `field` in the given direction. Ties keep input order.
pub fn sort(mut trades: Vec<Trade>, field: SortField, order: SortOrder) -> Vec<Trade> {
    trades.sort_by(|a, b| compare(a, b, field, order));
    trades
}

fn compare(a: &Trade, b: &Trade, field: SortField, order: SortOrder) -> Ordering {
    match field {
        SortField::TradeId => order.apply(a.trade_id.cmp(&b.trade_id)),
        SortField::AssetClass => {
            cmp_optional(a.asset_class.as_deref(), b.asset_class.as_deref(), order)
        }
        SortField::Counterparty => {
            cmp_optional(a.counterparty.as_deref(), b.counterparty.as_deref(), order)
        }
        SortField::InstrumentId => order.apply(a.instrument_id.cmp(&b.instrument_id)),
        SortField::InstrumentName => order.apply(a.instrument_name.cmp(&b.instrument_name)),
        SortField::TradeDateTime => cmp_optional(a.trade_date_time, b.trade_date_time, order),
        SortField::Trader => order.apply(a.trader.cmp(&b.trader)),
        SortField::Price => {
            order.apply(a.trade_details.price.total_cmp(&b.trade_details.price))
        }
        SortField::Quantity => order.apply(a.trade_details.quantity.cmp(&b.trade_details.quantity)),
        SortField::BuySellIndicator => order.apply(
            a.trade_details
                .buy_sell_indicator
                .cmp(&b.trade_details.buy_sell_indicator),
        ),
    }
}

/// Present values compare normally; absent values sink to the end regardless
/// of direction, so `desc` does not pull the blanks to the front.
fn cmp_optional<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order.apply(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
