//! JSON file persistence adapter.
//!
//! The durable form is a JSON array of trade records. A missing file loads
//! as the empty collection, so a fresh deployment starts at trade id 1.

use crate::domain::error::BlotterError;
use crate::domain::trade::Trade;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;
use std::fs;
use std::path::PathBuf;

pub struct JsonStoreAdapter {
    path: PathBuf,
}

impl JsonStoreAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BlotterError> {
        let path = config
            .get_string("store", "path")
            .ok_or_else(|| BlotterError::ConfigMissing {
                section: "store".into(),
                key: "path".into(),
            })?;
        Ok(Self::new(PathBuf::from(path)))
    }
}

impl StorePort for JsonStoreAdapter {
    fn load(&self) -> Result<Vec<Trade>, BlotterError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| BlotterError::Storage {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| BlotterError::Storage {
            reason: format!("malformed trade file {}: {}", self.path.display(), e),
        })
    }

    fn save_all(&self, trades: &[Trade]) -> Result<(), BlotterError> {
        let json =
            serde_json::to_string_pretty(trades).map_err(|e| BlotterError::Storage {
                reason: format!("failed to encode trades: {e}"),
            })?;

        // write-then-rename keeps the previous file intact if the write dies
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| BlotterError::Storage {
            reason: format!("failed to write {}: {}", tmp.display(), e),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| BlotterError::Storage {
            reason: format!("failed to replace {}: {}", self.path.display(), e),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::{Side, TradeDetails};
    use tempfile::TempDir;

    fn trade(id: u64) -> Trade {
        Trade {
            asset_class: Some("Equity".into()),
            counterparty: None,
            instrument_id: "TSLA".into(),
            instrument_name: "Tesla Inc".into(),
            trade_date_time: None,
            trade_details: TradeDetails {
                buy_sell_indicator: Side::Buy,
                price: 250.5,
                quantity: 100,
            },
            trade_id: id,
            trader: "jsmith".into(),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_collection() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonStoreAdapter::new(dir.path().join("trades.json"));
        assert!(adapter.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonStoreAdapter::new(dir.path().join("trades.json"));
        let trades = vec![trade(1), trade(2)];

        adapter.save_all(&trades).unwrap();
        let loaded = adapter.load().unwrap();
        assert_eq!(loaded, trades);
    }

    #[test]
    fn round_trip_preserves_absent_optional_fields() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonStoreAdapter::new(dir.path().join("trades.json"));
        let mut t = trade(1);
        t.asset_class = None;
        t.counterparty = None;
        t.trade_date_time = None;

        adapter.save_all(std::slice::from_ref(&t)).unwrap();
        let loaded = adapter.load().unwrap();
        assert_eq!(loaded[0], t);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonStoreAdapter::new(dir.path().join("trades.json"));

        adapter.save_all(&[trade(1), trade(2)]).unwrap();
        adapter.save_all(&[trade(1)]).unwrap();
        assert_eq!(adapter.load().unwrap().len(), 1);
    }

    #[test]
    fn malformed_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");
        fs::write(&path, "{not json").unwrap();
        let adapter = JsonStoreAdapter::new(path);
        assert!(matches!(
            adapter.load(),
            Err(BlotterError::Storage { .. })
        ));
    }

    #[test]
    fn from_config_requires_path() {
        let config = crate::adapters::file_config_adapter::FileConfigAdapter::from_string(
            "[store]\nbackend = json\n",
        )
        .unwrap();
        assert!(matches!(
            JsonStoreAdapter::from_config(&config),
            Err(BlotterError::ConfigMissing { .. })
        ));
    }
}
