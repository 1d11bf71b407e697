use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{
    format_name, shorten_stat, type_color, ACCENT_GOLD, BG_PANEL, ERROR_RED, SPINNER, TEXT_DIM,
    TEXT_MAIN,
};
use super::Component;
use crate::action::Action;
use crate::state::PokemonSummary;

const CARD_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 24;
const MAX_COLUMNS: usize = 4;

pub struct CardGrid;

pub struct CardGridProps<'a> {
    /// Derived view, already filtered and sorted
    pub cards: &'a [&'a PokemonSummary],
    pub loading: bool,
    pub error: Option<&'a str>,
    pub filter_type: &'a str,
    pub tick: u64,
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if let Some(error) = props.error {
            render_message(
                frame,
                area,
                Line::from(vec![
                    Span::styled("Error: ", Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)),
                    Span::styled(error.to_string(), Style::default().fg(TEXT_MAIN)),
                ]),
                Some("press r to retry"),
            );
            return;
        }

        if props.cards.is_empty() {
            let line = if props.loading {
                let frame_index = (props.tick as usize) % SPINNER.len();
                Line::from(format!("{} Loading Pokémon...", SPINNER[frame_index]))
            } else if !props.filter_type.is_empty() {
                Line::from(format!("No {} types on this page", props.filter_type))
            } else {
                Line::from("No Pokémon found")
            };
            render_message(frame, area, line, None);
            return;
        }

        let columns = columns_for_width(area.width);
        let rows = props.cards.chunks(columns);
        let row_constraints: Vec<Constraint> = rows
            .clone()
            .map(|_| Constraint::Length(CARD_HEIGHT))
            .collect();
        let row_areas = Layout::vertical(row_constraints).split(area);

        for (row_area, row) in row_areas.iter().zip(rows) {
            let col_areas =
                Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                    .split(*row_area);
            for (card_area, card) in col_areas.iter().zip(row) {
                render_card(frame, *card_area, card);
            }
        }
    }
}

pub fn columns_for_width(width: u16) -> usize {
    ((width / CARD_MIN_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

fn render_card(frame: &mut Frame, area: Rect, card: &PokemonSummary) {
    let accent = card
        .types
        .first()
        .map(|name| type_color(name))
        .unwrap_or(TEXT_DIM);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .title(Span::styled(
            format!(" #{:03} {} ", card.id, format_name(&card.name)),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ));

    let mut type_spans = Vec::new();
    for (index, type_name) in card.types.iter().enumerate() {
        if index > 0 {
            type_spans.push(Span::raw(" "));
        }
        type_spans.push(Span::styled(
            type_name.to_ascii_uppercase(),
            Style::default().fg(type_color(type_name)),
        ));
    }

    let stats = card
        .stats
        .iter()
        .take(3)
        .map(|stat| format!("{} {}", shorten_stat(&stat.name), stat.value))
        .collect::<Vec<_>>()
        .join("  ");

    let text = Text::from(vec![
        Line::from(type_spans),
        Line::from(vec![
            Span::styled("XP ", Style::default().fg(TEXT_DIM)),
            Span::styled(card.base_experience.to_string(), Style::default().fg(ACCENT_GOLD)),
        ]),
        Line::from(format!(
            "{:.1} m  {:.1} kg",
            card.height as f32 / 10.0,
            card.weight as f32 / 10.0
        )),
        Line::from(Span::styled(stats, Style::default().fg(TEXT_DIM))),
    ]);

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, line: Line<'_>, hint: Option<&str>) {
    let mut lines = vec![Line::from(""), line];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(TEXT_DIM),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_MAIN)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_scale_with_width() {
        assert_eq!(columns_for_width(10), 1);
        assert_eq!(columns_for_width(50), 2);
        assert_eq!(columns_for_width(200), MAX_COLUMNS);
    }
}
