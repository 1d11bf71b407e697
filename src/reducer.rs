//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, SortField, FETCH_ERROR_MESSAGE};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.status_message = None;
            let fetch = fetch_current(state);
            DispatchResult::changed_with_many(vec![fetch, Effect::LoadTypes])
        }

        Action::Refresh => {
            state.status_message = None;
            DispatchResult::changed_with(fetch_current(state))
        }

        // ===== Paging =====
        Action::PagePrev => {
            if !state.can_page_prev() {
                return DispatchResult::unchanged();
            }
            state.query.offset = state.query.offset.saturating_sub(state.query.limit);
            DispatchResult::changed_with(fetch_current(state))
        }

        Action::PageNext => {
            if !state.can_page_next() {
                return DispatchResult::unchanged();
            }
            state.query.offset += state.query.limit;
            DispatchResult::changed_with(fetch_current(state))
        }

        Action::PageDidLoad { request, page } => {
            if !state.is_current_request(request) {
                return DispatchResult::unchanged();
            }
            state.result.items = page.items;
            state.result.total_count = page.total_count;
            state.result.loading = false;
            state.result.error_message = None;
            DispatchResult::changed()
        }

        Action::PageDidError { request } => {
            if !state.is_current_request(request) {
                return DispatchResult::unchanged();
            }
            state.result.items.clear();
            state.result.total_count = 0;
            state.result.loading = false;
            state.result.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.input = state.query.search.clone();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.input.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active || state.search.input.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.input = state.query.search.clone();
            DispatchResult::changed()
        }

        Action::SearchSubmit(term) => {
            let term = term.trim().to_string();
            state.search.active = false;
            state.search.input = term.clone();
            state.query.search = term;
            state.query.offset = 0;
            DispatchResult::changed_with(fetch_current(state))
        }

        // ===== Sort =====
        Action::SortBy(field) => {
            sort_by(state, field);
            DispatchResult::changed()
        }

        // ===== Type filter =====
        Action::TypeFilter(type_name) => set_type_filter(state, type_name),
        Action::TypeFilterNext => cycle_filter(state, 1),
        Action::TypeFilterPrev => cycle_filter(state, -1),
        Action::TypeFilterClear => {
            if state.query.filter_type.is_empty() {
                return DispatchResult::unchanged();
            }
            set_type_filter(state, String::new())
        }

        Action::TypesDidLoad(types) => {
            state.type_list = types;
            state.status_message = None;
            DispatchResult::changed()
        }

        Action::TypesDidError(error) => {
            state.status_message = Some(format!("Type list error: {error}"));
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            if !state.result.loading {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Declares a fetch for the current query and fences out older ones.
fn fetch_current(state: &mut AppState) -> Effect {
    let request = state.begin_fetch();
    Effect::FetchPage {
        request,
        query: state.query.page_query(),
    }
}

/// Same field flips the order; a newly chosen field starts ascending.
fn sort_by(state: &mut AppState, field: SortField) {
    if state.query.sort_field == field {
        state.query.sort_order = state.query.sort_order.toggle();
    } else {
        state.query.sort_field = field;
        state.query.sort_order = Default::default();
    }
}

fn set_type_filter(state: &mut AppState, type_name: String) -> DispatchResult<Effect> {
    state.query.filter_type = type_name.trim().to_lowercase();
    DispatchResult::changed_with(fetch_current(state))
}

fn cycle_filter(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.type_list.is_empty() {
        return DispatchResult::unchanged();
    }

    let max_index = state.type_list.len() as i16;
    let current_index = state
        .type_list
        .iter()
        .position(|name| *name == state.query.filter_type)
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let mut next = current_index + step;
    if next < 0 {
        next = max_index;
    } else if next > max_index {
        next = 0;
    }

    let next_type = if next == 0 {
        String::new()
    } else {
        state.type_list[(next - 1) as usize].clone()
    };
    set_type_filter(state, next_type)
}
