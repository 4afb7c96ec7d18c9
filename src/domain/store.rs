//! In-memory trade record store with write-through persistence.
//!
//! Single source of truth for reads. Readers get an immutable `Arc` snapshot;
//! the writer builds a fresh collection, persists it through the store port,
//! and swaps the snapshot only once the save has succeeded.

use crate::domain::error::BlotterError;
use crate::domain::filter::{self, FilterCriteria};
use crate::domain::query::{self, ListParams, Page};
use crate::domain::search;
use crate::domain::trade::{Trade, TradeSubmission};
use crate::ports::store_port::StorePort;
use std::sync::{Arc, PoisonError, RwLock};

pub struct TradeStore {
    records: RwLock<Arc<Vec<Trade>>>,
    port: Box<dyn StorePort + Send + Sync>,
}

impl TradeStore {
    /// Load the persisted collection through `port` and take ownership of it.
    pub fn open(port: Box<dyn StorePort + Send + Sync>) -> Result<Self, BlotterError> {
        let records = port.load()?;
        log::debug!("loaded {} trade records", records.len());
        Ok(Self {
            records: RwLock::new(Arc::new(records)),
            port,
        })
    }

    /// Snapshot of the current collection. Appends after this call are never
    /// observable through the returned value.
    pub fn all(&self) -> Arc<Vec<Trade>> {
        let guard = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// The record with `trade_id`, if any.
    pub fn by_id(&self, trade_id: u64) -> Option<Trade> {
        self.all().iter().find(|t| t.trade_id == trade_id).cloned()
    }

    /// Validate, assign the next id, persist, then publish.
    ///
    /// The write lock spans id assignment through the snapshot swap, so id
    /// assignment is race-free and at most one append is in flight. The swap
    /// happens only after `save_all` returns Ok; on failure the previous
    /// snapshot stays in place and the record is not visible anywhere.
    pub fn append(&self, submission: TradeSubmission) -> Result<Trade, BlotterError> {
        let mut guard = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // max of an empty collection is the unassigned id 0, so the first
        // record gets id 1.
        let next_id = guard.iter().map(|t| t.trade_id).max().unwrap_or(0) + 1;
        let trade = submission.into_trade(next_id)?;

        let mut next: Vec<Trade> = guard.as_ref().clone();
        next.push(trade.clone());

        if let Err(err) = self.port.save_all(&next) {
            log::warn!("append of trade {next_id} rolled back: {err}");
            return Err(err);
        }

        *guard = Arc::new(next);
        Ok(trade)
    }

    /// Free-text search over the current snapshot, in store order.
    pub fn search(&self, query: &str) -> Vec<Trade> {
        search::search(&self.all(), query)
    }

    /// Structured filtering over the current snapshot, in store order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Trade> {
        filter::filter(&self.all(), criteria)
    }

    /// Filter, sort and paginate the current snapshot.
    pub fn list(&self, params: &ListParams) -> Result<Page<Trade>, BlotterError> {
        query::list(&self.all(), params)
    }
}
