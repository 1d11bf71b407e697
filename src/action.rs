//! Actions - user intents and async completions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{PageData, SortField};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Load the first page and the type list
    Init,

    /// Refetch the current query
    Refresh,

    // ===== Page category =====
    PagePrev,
    PageNext,

    /// Result: page fetched for the given request id
    PageDidLoad { request: u64, page: PageData },

    /// Result: page fetch failed for the given request id
    PageDidError { request: u64 },

    // ===== Search category =====
    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchCancel,

    /// Commit a search term; empty returns to the paginated list
    SearchSubmit(String),

    // ===== Sort =====
    SortBy(SortField),

    // ===== Type category =====
    /// Set the type filter; empty clears it
    TypeFilter(String),
    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,

    TypesDidLoad(Vec<String>),
    TypesDidError(String),

    // ===== Uncategorized =====
    Tick,
    Quit,
}
