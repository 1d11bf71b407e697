//! Application state - query parameters, fetched page, and UI bookkeeping

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

pub const DEFAULT_LIMIT: u32 = 12;
pub const MAX_LIMIT: u32 = 100;

/// Shown for every failed page fetch, whatever the cause.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch Pokémon. Please try again.";

/// Spinner timing while a page is loading.
pub const LOADING_TICK_MS: u64 = 90;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    BaseExperience,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::BaseExperience => "base exp",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// What the user asked for. Only reducer handlers mutate it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QueryState {
    pub search: String,
    pub offset: u32,
    pub limit: u32,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Empty means no filter.
    pub filter_type: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            offset: 0,
            limit: DEFAULT_LIMIT,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            filter_type: String::new(),
        }
    }
}

impl QueryState {
    pub fn is_name_search(&self) -> bool {
        !self.search.is_empty()
    }

    /// The fetch-relevant subset of the query.
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            search: self.search.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Parameters of a single page fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageQuery {
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u32,
}

/// One fetched Pokémon, normalized from the detail endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub base_experience: u32,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub artwork_url: Option<String>,
}

impl PokemonSummary {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|name| name == type_name)
    }
}

/// A successfully fetched page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PageData {
    pub items: Vec<PokemonSummary>,
    pub total_count: u32,
}

/// Outcome of the latest fetch. Read-only for the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResultState {
    pub items: Vec<PokemonSummary>,
    pub total_count: u32,
    pub loading: bool,
    pub error_message: Option<String>,
}

/// Text being typed into the search bar before it is submitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchDraft {
    pub active: bool,
    pub input: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub query: QueryState,
    pub result: ResultState,
    /// Id of the most recently declared page fetch. Completions tagged
    /// with any other id are stale.
    pub latest_request: u64,
    pub search: SearchDraft,
    pub type_list: Vec<String>,
    pub status_message: Option<String>,
    pub tick: u64,
}

impl AppState {
    pub fn new(limit: u32) -> Self {
        Self {
            query: QueryState {
                limit: limit.clamp(1, MAX_LIMIT),
                ..QueryState::default()
            },
            ..Self::default()
        }
    }

    /// Marks a new fetch as in flight and returns its request id.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_request = self.latest_request.wrapping_add(1);
        self.result.loading = true;
        self.tick = 0;
        self.latest_request
    }

    pub fn is_current_request(&self, request: u64) -> bool {
        request == self.latest_request
    }

    pub fn can_page_prev(&self) -> bool {
        !self.query.is_name_search() && self.query.offset > 0
    }

    pub fn can_page_next(&self) -> bool {
        !self.query.is_name_search()
            && self.query.offset.saturating_add(self.query.limit) < self.result.total_count
    }

    /// 1-based page index and page count for the header.
    pub fn page_position(&self) -> (u32, u32) {
        if self.query.is_name_search() {
            return (1, 1);
        }
        let limit = self.query.limit.max(1);
        let page = self.query.offset / limit + 1;
        // An errored fetch zeroes the total; the current page still counts.
        let pages = self.result.total_count.div_ceil(limit).max(page);
        (page, pages)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Query")
                .entry("search", ron_string(&self.query.search))
                .entry("offset", ron_string(&self.query.offset))
                .entry("limit", ron_string(&self.query.limit))
                .entry("sort_field", ron_string(&self.query.sort_field))
                .entry("sort_order", ron_string(&self.query.sort_order))
                .entry("filter_type", ron_string(&self.query.filter_type)),
            DebugSection::new("Result")
                .entry("items", ron_string(&self.result.items.len()))
                .entry("total", ron_string(&self.result.total_count))
                .entry("loading", ron_string(&self.result.loading))
                .entry("error", ron_string(&self.result.error_message))
                .entry("request", ron_string(&self.latest_request)),
            DebugSection::new("Status")
                .entry("search_active", ron_string(&self.search.active))
                .entry("search_input", ron_string(&self.search.input))
                .entry("types", ron_string(&self.type_list.len()))
                .entry("message", ron_string(&self.status_message)),
        ]
    }
}
