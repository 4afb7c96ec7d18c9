//! The list pipeline: filter, then sort, then paginate.
//!
//! Sorting happens before pagination so that a page reflects the global
//! ordering of the filtered set, not an ordering of the page itself.

use crate::domain::error::BlotterError;
use crate::domain::filter::{self, FilterCriteria};
use crate::domain::page;
use crate::domain::sort::{self, SortField, SortOrder};
use crate::domain::trade::Trade;
use serde::Serialize;

/// Parameters for a paged listing. `Default` is page 1, 10 per page,
/// ascending, unsorted (store order).
#[derive(Debug, Clone)]
pub struct ListParams {
    pub criteria: FilterCriteria,
    pub page: usize,
    pub limit: usize,
    pub sort: Option<SortField>,
    pub order: SortOrder,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            limit: 10,
            sort: None,
            order: SortOrder::default(),
        }
    }
}

/// One page of results plus the metadata callers need to build pagers.
/// `total` counts the filtered set before pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

pub fn list(trades: &[Trade], params: &ListParams) -> Result<Page<Trade>, BlotterError> {
    let filtered = filter::filter(trades, &params.criteria);

    let ordered = match params.sort {
        Some(field) => sort::sort(filtered, field, params.order),
        None => filtered,
    };

    let total = page::total_count(&ordered);
    let items = page::paginate(&ordered, params.page, params.limit)?;

    Ok(Page {
        items,
        total,
        page: params.page,
        limit: params.limit,
    })
}
