use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;

/// Single-line search input shown while a search is being typed.
#[derive(Default)]
pub struct SearchBar;

pub struct SearchBarProps<'a> {
    pub input: &'a str,
    pub is_focused: bool,
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit(props.input.to_string())),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = if props.input.is_empty() {
            Line::from(vec![
                Span::styled("Search Pokémon by name", Style::default().fg(TEXT_DIM)),
                Span::styled("_", Style::default().fg(ACCENT_TEAL)),
            ])
        } else {
            Line::from(vec![
                Span::styled(props.input.to_string(), Style::default().fg(TEXT_MAIN)),
                Span::styled("_", Style::default().fg(ACCENT_TEAL)),
            ])
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT_TEAL))
            .style(Style::default().bg(BG_PANEL))
            .title("SEARCH");
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn actions_for(code: KeyCode, input: &str) -> Vec<Action> {
        let mut bar = SearchBar;
        let props = SearchBarProps {
            input,
            is_focused: true,
        };
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        bar.handle_event(&event, props).into_iter().collect()
    }

    #[test]
    fn enter_submits_current_input() {
        let actions = actions_for(KeyCode::Enter, "pikachu");
        actions.assert_first(Action::SearchSubmit("pikachu".to_string()));
    }

    #[test]
    fn typing_and_cancel() {
        actions_for(KeyCode::Char('a'), "").assert_first(Action::SearchInput('a'));
        actions_for(KeyCode::Esc, "abc").assert_first(Action::SearchCancel);
        actions_for(KeyCode::Backspace, "abc").assert_first(Action::SearchBackspace);
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut bar = SearchBar;
        let props = SearchBarProps {
            input: "",
            is_focused: false,
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
