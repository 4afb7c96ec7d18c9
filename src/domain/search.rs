//! Free-text search over trade records.
//!
//! Case-insensitive substring match against `counterparty`, `instrumentId`,
//! `instrumentName` and `trader`. An absent counterparty simply never
//! matches on that field.

use crate::domain::trade::Trade;

/// True when `query` is a case-insensitive substring of any searchable field.
///
/// The empty query matches every record (every string contains "").
pub fn matches(trade: &Trade, query: &str) -> bool {
    let needle = query.to_lowercase();

    let field_matches = |value: &str| value.to_lowercase().contains(&needle);

    trade
        .counterparty
        .as_deref()
        .is_some_and(field_matches)
        || field_matches(&trade.instrument_id)
        || field_matches(&trade.instrument_name)
        || field_matches(&trade.trader)
}

/// All records matching `query`, in input (store) order.
pub fn search(trades: &[Trade], query: &str) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| matches(t, query))
        .cloned()
        .collect()
}
