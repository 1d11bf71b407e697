use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::Style,
    widgets::Block,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::theme::{ACCENT_GOLD, BG_BASE, ERROR_RED};
use super::{
    CardGrid, CardGridProps, Component, DexHeader, DexHeaderProps, SearchBar, SearchBarProps,
};
use crate::action::Action;
use crate::state::{AppState, SortField};
use crate::view::apply_view_transform;

/// Props for DexView - read-only view of state
pub struct DexViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Top-level browse screen: header, optional search bar, cards, hints.
#[derive(Default)]
pub struct DexView;

impl Component<Action> for DexView {
    type Props<'a> = DexViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.state.search.active {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchStart),
                KeyCode::Char('n') | KeyCode::Right => Some(Action::PageNext),
                KeyCode::Char('p') | KeyCode::Left => Some(Action::PagePrev),
                KeyCode::Char('s') => Some(Action::SortBy(SortField::Name)),
                KeyCode::Char('e') => Some(Action::SortBy(SortField::BaseExperience)),
                KeyCode::Char(']') => Some(Action::TypeFilterNext),
                KeyCode::Char('[') => Some(Action::TypeFilterPrev),
                KeyCode::Char('c') => Some(Action::TypeFilterClear),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DexViewProps<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let search_height = if state.search.active { 3 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(4),             // Header
            Constraint::Length(search_height), // Search input
            Constraint::Min(1),                // Cards
            Constraint::Length(1),             // Help bar
        ])
        .split(area);

        let cards = apply_view_transform(
            &state.result.items,
            &state.query.filter_type,
            state.query.sort_field,
            state.query.sort_order,
        );

        let mut header = DexHeader;
        header.render(
            frame,
            chunks[0],
            DexHeaderProps {
                state,
                visible: cards.len(),
            },
        );

        if state.search.active {
            let mut search = SearchBar;
            search.render(
                frame,
                chunks[1],
                SearchBarProps {
                    input: &state.search.input,
                    is_focused: props.is_focused,
                },
            );
        }

        let mut grid = CardGrid;
        grid.render(
            frame,
            chunks[2],
            CardGridProps {
                cards: &cards,
                loading: state.result.loading,
                error: state.result.error_message.as_deref(),
                filter_type: &state.query.filter_type,
                tick: state.tick,
            },
        );

        render_status_bar(frame, chunks[3], state);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = status_hints(state);
    let status = if state.result.loading {
        Some(("Loading...".to_string(), ACCENT_GOLD))
    } else {
        state
            .status_message
            .clone()
            .map(|message| (message, ERROR_RED))
    };
    let status_items: Vec<StatusBarItem> = status
        .into_iter()
        .map(|(text, color)| {
            StatusBarItem::span(ratatui::text::Span::styled(text, Style::default().fg(color)))
        })
        .collect();

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&hints),
            right: StatusBarSection::items(&status_items),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "search"),
            StatusBarHint::new("Esc", "cancel"),
        ];
    }

    let mut hints = vec![StatusBarHint::new("/", "search")];
    if state.can_page_prev() || state.can_page_next() {
        hints.push(StatusBarHint::new("p/n", "page"));
    }
    hints.extend([
        StatusBarHint::new("s/e", "sort"),
        StatusBarHint::new("[ ]", "type"),
        StatusBarHint::new("r", "refresh"),
        StatusBarHint::new("q", "quit"),
    ]);
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn actions_for(keys: &str, state: &AppState, is_focused: bool) -> Vec<Action> {
        let mut component = DexView;
        let props = DexViewProps { state, is_focused };
        component
            .handle_event(&EventKind::Key(key(keys)), props)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_event_paging() {
        let state = AppState::default();
        actions_for("n", &state, true).assert_first(Action::PageNext);
        actions_for("p", &state, true).assert_first(Action::PagePrev);
    }

    #[test]
    fn test_handle_event_sort_keys() {
        let state = AppState::default();
        actions_for("s", &state, true).assert_first(Action::SortBy(SortField::Name));
        actions_for("e", &state, true).assert_first(Action::SortBy(SortField::BaseExperience));
    }

    #[test]
    fn test_handle_event_ignored_while_searching() {
        let mut state = AppState::default();
        state.search.active = true;
        actions_for("n", &state, true).assert_empty();
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let state = AppState::default();
        actions_for("q", &state, false).assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(80, 24);
        let mut component = DexView;

        let mut state = AppState::default();
        state.begin_fetch();

        let output = render.render_to_string_plain(|frame| {
            let props = DexViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading"));
    }
}
