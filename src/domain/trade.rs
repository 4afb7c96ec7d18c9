//! Trade record representation.
//!
//! `Trade` is the canonical, immutable record; `TradeSubmission` is the same
//! shape minus the id, as it arrives from a boundary. Field names on the wire
//! are camelCase (`instrumentId`, `tradeDetails`, ...); timestamps are
//! RFC 3339 UTC, which makes string ordering and chronological ordering agree.

use crate::domain::error::BlotterError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = BlotterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(BlotterError::InvalidSide { value: s.to_string() })
        }
    }
}

/// Price and quantity details of a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDetails {
    pub buy_sell_indicator: Side,
    pub price: f64,
    pub quantity: i64,
}

/// A single trade record. Created only through ingestion, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub asset_class: Option<String>,
    pub counterparty: Option<String>,
    pub instrument_id: String,
    pub instrument_name: String,
    pub trade_date_time: Option<DateTime<Utc>>,
    pub trade_details: TradeDetails,
    pub trade_id: u64,
    pub trader: String,
}

/// Details as submitted: the indicator is still a free string so that a bad
/// value surfaces as a domain validation error rather than a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetails {
    pub buy_sell_indicator: String,
    pub price: f64,
    pub quantity: i64,
}

/// An inbound trade, everything except the id the store will assign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSubmission {
    #[serde(default)]
    pub asset_class: Option<String>,
    #[serde(default)]
    pub counterparty: Option<String>,
    pub instrument_id: String,
    pub instrument_name: String,
    #[serde(default)]
    pub trade_date_time: Option<DateTime<Utc>>,
    pub trade_details: SubmissionDetails,
    pub trader: String,
}

impl TradeSubmission {
    /// Validate the submission and convert it into a record with `trade_id`.
    ///
    /// Required string fields must be non-blank; the buy/sell indicator must
    /// parse as BUY or SELL (case-insensitive). An absent `trade_date_time`
    /// stays absent.
    pub fn into_trade(self, trade_id: u64) -> Result<Trade, BlotterError> {
        required("instrumentId", &self.instrument_id)?;
        required("instrumentName", &self.instrument_name)?;
        required("trader", &self.trader)?;
        let side = Side::from_str(&self.trade_details.buy_sell_indicator)?;

        Ok(Trade {
            asset_class: self.asset_class,
            counterparty: self.counterparty,
            instrument_id: self.instrument_id,
            instrument_name: self.instrument_name,
            trade_date_time: self.trade_date_time,
            trade_details: TradeDetails {
                buy_sell_indicator: side,
                price: self.trade_details.price,
                quantity: self.trade_details.quantity,
            },
            trade_id,
            trader: self.trader,
        })
    }
}

fn required(field: &str, value: &str) -> Result<(), BlotterError> {
    if value.trim().is_empty() {
        return Err(BlotterError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_submission() -> TradeSubmission {
        TradeSubmission {
            asset_class: Some("Equity".into()),
            counterparty: Some("Goldman".into()),
            instrument_id: "TSLA".into(),
            instrument_name: "Tesla Inc".into(),
            trade_date_time: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
            trade_details: SubmissionDetails {
                buy_sell_indicator: "BUY".into(),
                price: 250.5,
                quantity: 100,
            },
            trader: "jsmith".into(),
        }
    }

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("Sell".parse::<Side>().unwrap(), Side::Sell);
    }

    #[test]
    fn side_rejects_unknown_value() {
        let err = "HOLD".parse::<Side>().unwrap_err();
        assert!(matches!(err, BlotterError::InvalidSide { value } if value == "HOLD"));
    }

    #[test]
    fn into_trade_assigns_id_and_parses_side() {
        let trade = sample_submission().into_trade(7).unwrap();
        assert_eq!(trade.trade_id, 7);
        assert_eq!(trade.trade_details.buy_sell_indicator, Side::Buy);
        assert_eq!(trade.instrument_id, "TSLA");
    }

    #[test]
    fn into_trade_rejects_blank_trader() {
        let mut submission = sample_submission();
        submission.trader = "   ".into();
        let err = submission.into_trade(1).unwrap_err();
        assert!(matches!(err, BlotterError::MissingField { field } if field == "trader"));
    }

    #[test]
    fn into_trade_rejects_invalid_indicator() {
        let mut submission = sample_submission();
        submission.trade_details.buy_sell_indicator = "SHORT".into();
        assert!(matches!(
            submission.into_trade(1),
            Err(BlotterError::InvalidSide { .. })
        ));
    }

    #[test]
    fn absent_timestamp_stays_absent() {
        let mut submission = sample_submission();
        submission.trade_date_time = None;
        let trade = submission.into_trade(1).unwrap();
        assert!(trade.trade_date_time.is_none());
    }

    #[test]
    fn trade_serializes_with_wire_field_names() {
        let trade = sample_submission().into_trade(1).unwrap();
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["instrumentId"], "TSLA");
        assert_eq!(json["tradeDetails"]["buySellIndicator"], "BUY");
        assert_eq!(json["tradeId"], 1);
        assert_eq!(json["assetClass"], "Equity");
    }

    #[test]
    fn trade_round_trips_through_json() {
        let trade = sample_submission().into_trade(3).unwrap();
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
    }
}
