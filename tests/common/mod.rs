#![allow(dead_code)]

use blotter::domain::error::BlotterError;
use blotter::domain::trade::{Side, SubmissionDetails, Trade, TradeDetails, TradeSubmission};
use blotter::ports::store_port::StorePort;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// In-memory store port recording every save; can be told to fail.
pub struct MockStorePort {
    pub initial: Vec<Trade>,
    pub saves: Arc<Mutex<Vec<Vec<Trade>>>>,
    pub fail_saves: bool,
}

impl MockStorePort {
    pub fn new() -> Self {
        Self {
            initial: Vec::new(),
            saves: Arc::new(Mutex::new(Vec::new())),
            fail_saves: false,
        }
    }

    pub fn with_records(initial: Vec<Trade>) -> Self {
        Self {
            initial,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::new()
        }
    }

    pub fn save_log(&self) -> Arc<Mutex<Vec<Vec<Trade>>>> {
        Arc::clone(&self.saves)
    }
}

impl StorePort for MockStorePort {
    fn load(&self) -> Result<Vec<Trade>, BlotterError> {
        Ok(self.initial.clone())
    }

    fn save_all(&self, trades: &[Trade]) -> Result<(), BlotterError> {
        if self.fail_saves {
            return Err(BlotterError::Storage {
                reason: "injected save failure".into(),
            });
        }
        self.saves.lock().unwrap().push(trades.to_vec());
        Ok(())
    }
}

pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn make_submission(instrument_id: &str, price: f64, side: &str) -> TradeSubmission {
    TradeSubmission {
        asset_class: Some("Equity".into()),
        counterparty: Some("Goldman".into()),
        instrument_id: instrument_id.into(),
        instrument_name: format!("{instrument_id} common stock"),
        trade_date_time: Some(ts(2024, 1, 15)),
        trade_details: SubmissionDetails {
            buy_sell_indicator: side.into(),
            price,
            quantity: 100,
        },
        trader: "jsmith".into(),
    }
}

pub fn make_trade(id: u64, instrument_id: &str, price: f64, side: Side) -> Trade {
    Trade {
        asset_class: Some("Equity".into()),
        counterparty: Some("Goldman".into()),
        instrument_id: instrument_id.into(),
        instrument_name: format!("{instrument_id} common stock"),
        trade_date_time: Some(ts(2024, 1, 15)),
        trade_details: TradeDetails {
            buy_sell_indicator: side,
            price,
            quantity: 100,
        },
        trade_id: id,
        trader: "jsmith".into(),
    }
}
