//! Pagination of ordered record sequences.

use crate::domain::error::BlotterError;

/// Return page `page` (1-based) of `limit` records.
///
/// Both parameters must be at least 1. The slice is clipped to the available
/// length, so an out-of-range page is an empty result, not an error.
pub fn paginate<T: Clone>(records: &[T], page: usize, limit: usize) -> Result<Vec<T>, BlotterError> {
    if page < 1 || limit < 1 {
        return Err(BlotterError::InvalidPagination { page, limit });
    }

    let start = (page - 1).saturating_mul(limit).min(records.len());
    let end = start.saturating_add(limit).min(records.len());
    Ok(records[start..end].to_vec())
}

/// Pre-pagination total, for response metadata.
pub fn total_count<T>(records: &[T]) -> usize {
    records.len()
}
