use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{title_style, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::AppState;

pub struct DexHeader;

pub struct DexHeaderProps<'a> {
    pub state: &'a AppState,
    /// Cards left after the type filter
    pub visible: usize,
}

impl Component<Action> for DexHeader {
    type Props<'a> = DexHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let query = &state.query;

        let search = if state.search.active {
            format!("/{}_", state.search.input)
        } else if query.search.is_empty() {
            "-".to_string()
        } else {
            query.search.clone()
        };
        let filter = if query.filter_type.is_empty() {
            "ALL".to_string()
        } else {
            query.filter_type.to_ascii_uppercase()
        };
        let (page, pages) = state.page_position();

        let text = Text::from(vec![
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(TEXT_DIM)),
                Span::styled(search, Style::default().fg(ACCENT_TEAL)),
                Span::styled("  |  Type: ", Style::default().fg(TEXT_DIM)),
                Span::styled(filter, Style::default().fg(ACCENT_GOLD)),
                Span::styled("  |  Sort: ", Style::default().fg(TEXT_DIM)),
                Span::styled(
                    format!("{} {}", query.sort_field.label(), query.sort_order.arrow()),
                    Style::default().fg(ACCENT_GOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Page ", Style::default().fg(TEXT_DIM)),
                Span::styled(format!("{page}/{pages}"), Style::default().fg(ACCENT_TEAL)),
                Span::styled(
                    format!(
                        "  |  Showing {} of {}  |  Total {}",
                        props.visible,
                        state.result.items.len(),
                        state.result.total_count
                    ),
                    Style::default().fg(TEXT_DIM),
                ),
            ]),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .title(Span::styled("POKEDEX", title_style()));
        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}
