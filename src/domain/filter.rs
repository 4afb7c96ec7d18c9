//! Multi-criteria filtering of trade records.
//!
//! A criteria set is the logical AND of every present criterion; an absent
//! criterion imposes no constraint. Records with an absent `assetClass` or
//! `tradeDateTime` never match a present criterion on that field.

use crate::domain::trade::{Side, Trade};
use chrono::{DateTime, Utc};

/// Optional filter criteria. `Default` is the unconstrained set.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive equality against the record's asset class.
    pub asset_class: Option<String>,
    /// Inclusive lower bound on `tradeDateTime`.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `tradeDateTime`.
    pub end: Option<DateTime<Utc>>,
    /// Inclusive lower bound on `tradeDetails.price`.
    pub min_price: Option<f64>,
    /// Inclusive upper bound on `tradeDetails.price`.
    pub max_price: Option<f64>,
    /// Equality against `tradeDetails.buySellIndicator`; parsed from its
    /// wire string at the boundary, so unknown values are rejected there.
    pub trade_type: Option<Side>,
}

impl FilterCriteria {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(wanted) = &self.asset_class {
            match &trade.asset_class {
                Some(actual) if actual.eq_ignore_ascii_case(wanted) => {}
                _ => return false,
            }
        }

        if let Some(start) = self.start {
            match trade.trade_date_time {
                Some(at) if at >= start => {}
                _ => return false,
            }
        }

        if let Some(end) = self.end {
            match trade.trade_date_time {
                Some(at) if at <= end => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_price {
            if trade.trade_details.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if trade.trade_details.price > max {
                return false;
            }
        }

        if let Some(side) = self.trade_type {
            if trade.trade_details.buy_sell_indicator != side {
                return false;
            }
        }

        true
    }
}

/// All records matching `criteria`, in input (store) order.
pub fn filter(trades: &[Trade], criteria: &FilterCriteria) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}
