//! Persistence port trait.
//!
//! The store calls `save_all` synchronously inside `append`, before the new
//! record becomes visible, so the durable and in-memory views never diverge
//! past a call boundary.

use crate::domain::error::BlotterError;
use crate::domain::trade::Trade;

pub trait StorePort {
    /// The full persisted collection, in insertion order.
    fn load(&self) -> Result<Vec<Trade>, BlotterError>;

    /// Replace the persisted collection with `trades`.
    fn save_all(&self, trades: &[Trade]) -> Result<(), BlotterError>;
}
