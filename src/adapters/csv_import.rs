//! CSV bulk import of trade submissions.
//!
//! Expected header:
//! `assetClass,counterparty,instrumentId,instrumentName,tradeDateTime,buySellIndicator,price,quantity,trader`
//!
//! Empty optional cells become absent values. Rows are returned as
//! submissions; per-record validation happens at ingestion.

use crate::domain::error::BlotterError;
use crate::domain::trade::{SubmissionDetails, TradeSubmission};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    asset_class: Option<String>,
    counterparty: Option<String>,
    instrument_id: String,
    instrument_name: String,
    trade_date_time: Option<DateTime<Utc>>,
    buy_sell_indicator: String,
    price: f64,
    quantity: i64,
    trader: String,
}

impl From<CsvRow> for TradeSubmission {
    fn from(row: CsvRow) -> Self {
        TradeSubmission {
            asset_class: row.asset_class,
            counterparty: row.counterparty,
            instrument_id: row.instrument_id,
            instrument_name: row.instrument_name,
            trade_date_time: row.trade_date_time,
            trade_details: SubmissionDetails {
                buy_sell_indicator: row.buy_sell_indicator,
                price: row.price,
                quantity: row.quantity,
            },
            trader: row.trader,
        }
    }
}

pub fn read_submissions<P: AsRef<Path>>(path: P) -> Result<Vec<TradeSubmission>, BlotterError> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path).map_err(|e| BlotterError::Storage {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut submissions = Vec::new();
    for (line, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|e| BlotterError::Storage {
            reason: format!("CSV parse error at record {}: {}", line + 1, e),
        })?;
        submissions.push(row.into());
    }

    Ok(submissions)
}
