//! SQLite persistence adapter.
//!
//! Flattens `tradeDetails` into columns; timestamps are stored as their
//! canonical RFC 3339 UTC strings. `save_all` replaces the whole table in
//! one transaction, matching the store port's whole-collection contract.

use crate::domain::error::BlotterError;
use crate::domain::trade::{Side, Trade, TradeDetails};
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;
use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::str::FromStr;

pub struct SqliteStoreAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStoreAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BlotterError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| BlotterError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let adapter = Self { pool };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    pub fn in_memory() -> Result<Self, BlotterError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let adapter = Self { pool };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    fn initialize_schema(&self) -> Result<(), BlotterError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS trades (
                trade_id INTEGER PRIMARY KEY,
                asset_class TEXT,
                counterparty TEXT,
                instrument_id TEXT NOT NULL,
                instrument_name TEXT NOT NULL,
                trade_date_time TEXT,
                side TEXT NOT NULL,
                price REAL NOT NULL,
                quantity INTEGER NOT NULL,
                trader TEXT NOT NULL
            );",
        )
        .map_err(|e: rusqlite::Error| BlotterError::Storage {
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

fn parse_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>, BlotterError> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| BlotterError::Storage {
                    reason: format!("invalid stored timestamp {s:?}: {e}"),
                })
        })
        .transpose()
}

impl StorePort for SqliteStoreAdapter {
    fn load(&self) -> Result<Vec<Trade>, BlotterError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let mut stmt = conn
            .prepare(
                "SELECT trade_id, asset_class, counterparty, instrument_id, instrument_name,
                        trade_date_time, side, price, quantity, trader
                 FROM trades ORDER BY trade_id",
            )
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, u64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, f64>(7)?,
                    row.get::<_, i64>(8)?,
                    row.get::<_, String>(9)?,
                ))
            })
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let mut trades = Vec::new();
        for row in rows {
            let (id, asset_class, counterparty, instrument_id, instrument_name, at, side, price, quantity, trader) =
                row.map_err(|e: rusqlite::Error| BlotterError::Storage {
                    reason: e.to_string(),
                })?;

            trades.push(Trade {
                asset_class,
                counterparty,
                instrument_id,
                instrument_name,
                trade_date_time: parse_timestamp(at)?,
                trade_details: TradeDetails {
                    buy_sell_indicator: Side::from_str(&side).map_err(|_| {
                        BlotterError::Storage {
                            reason: format!("invalid stored side {side:?} for trade {id}"),
                        }
                    })?,
                    price,
                    quantity,
                },
                trade_id: id,
                trader,
            });
        }

        Ok(trades)
    }

    fn save_all(&self, trades: &[Trade]) -> Result<(), BlotterError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        let tx = conn
            .transaction()
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        tx.execute("DELETE FROM trades", [])
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;

        for trade in trades {
            tx.execute(
                "INSERT INTO trades (trade_id, asset_class, counterparty, instrument_id,
                                     instrument_name, trade_date_time, side, price, quantity, trader)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    trade.trade_id,
                    trade.asset_class,
                    trade.counterparty,
                    trade.instrument_id,
                    trade.instrument_name,
                    trade.trade_date_time.map(|t| t.to_rfc3339()),
                    trade.trade_details.buy_sell_indicator.to_string(),
                    trade.trade_details.price,
                    trade.trade_details.quantity,
                    trade.trader
                ],
            )
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })?;
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| BlotterError::Storage {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trade(id: u64, counterparty: Option<&str>) -> Trade {
        Trade {
            asset_class: Some("Bond".into()),
            counterparty: counterparty.map(String::from),
            instrument_id: "GB00B16NNR78".into(),
            instrument_name: "UK Gilt 2046".into(),
            trade_date_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 30).unwrap()),
            trade_details: TradeDetails {
                buy_sell_indicator: Side::Sell,
                price: 98.25,
                quantity: 1_000,
            },
            trade_id: id,
            trader: "mlee".into(),
        }
    }

    #[test]
    fn fresh_database_loads_empty() {
        let adapter = SqliteStoreAdapter::in_memory().unwrap();
        assert!(adapter.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let adapter = SqliteStoreAdapter::in_memory().unwrap();
        let trades = vec![trade(1, Some("Barclays")), trade(2, None)];

        adapter.save_all(&trades).unwrap();
        assert_eq!(adapter.load().unwrap(), trades);
    }

    #[test]
    fn load_orders_by_trade_id() {
        let adapter = SqliteStoreAdapter::in_memory().unwrap();
        adapter.save_all(&[trade(5, None), trade(2, None)]).unwrap();

        let ids: Vec<u64> = adapter.load().unwrap().iter().map(|t| t.trade_id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn save_all_replaces_previous_rows() {
        let adapter = SqliteStoreAdapter::in_memory().unwrap();
        adapter.save_all(&[trade(1, None), trade(2, None)]).unwrap();
        adapter.save_all(&[trade(3, None)]).unwrap();

        let loaded = adapter.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].trade_id, 3);
    }

    #[test]
    fn absent_timestamp_round_trips_as_null() {
        let adapter = SqliteStoreAdapter::in_memory().unwrap();
        let mut t = trade(1, None);
        t.trade_date_time = None;

        adapter.save_all(std::slice::from_ref(&t)).unwrap();
        assert_eq!(adapter.load().unwrap()[0], t);
    }
}
