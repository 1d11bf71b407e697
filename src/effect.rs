//! Effects - fetches declared by the reducer

use crate::state::PageQuery;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch one page; the completion must carry `request` back
    FetchPage { request: u64, query: PageQuery },
    /// Load the type names used by the filter
    LoadTypes,
}
