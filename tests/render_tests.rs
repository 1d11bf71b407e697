//! Render checks for the browse screen using RenderHarness

use pokedex::{
    components::{CardGrid, CardGridProps, Component, DexView, DexViewProps},
    state::{AppState, PokemonStat, PokemonSummary, FETCH_ERROR_MESSAGE},
};
use tui_dispatch::testing::*;

fn pikachu() -> PokemonSummary {
    PokemonSummary {
        id: 25,
        name: "pikachu".into(),
        base_experience: 112,
        height: 4,
        weight: 60,
        types: vec!["electric".into()],
        stats: vec![
            PokemonStat {
                name: "hp".into(),
                value: 35,
            },
            PokemonStat {
                name: "attack".into(),
                value: 55,
            },
        ],
        artwork_url: None,
    }
}

fn render_dex(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = DexView;
    render.render_to_string_plain(|frame| {
        let props = DexViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_card_details() {
    let mut state = AppState::default();
    state.result.items = vec![pikachu()];
    state.result.total_count = 1302;

    let output = render_dex(&state, 80, 24);

    assert!(output.contains("#025 Pikachu"), "card title missing:\n{output}");
    assert!(output.contains("ELECTRIC"), "type missing:\n{output}");
    assert!(output.contains("112"), "base experience missing:\n{output}");
    assert!(output.contains("Page 1/109"), "page position missing:\n{output}");
}

#[test]
fn test_render_error_message() {
    let mut state = AppState::default();
    state.result.error_message = Some(FETCH_ERROR_MESSAGE.to_string());

    let output = render_dex(&state, 80, 24);

    assert!(output.contains("Failed to fetch"), "error missing:\n{output}");
    assert!(output.contains("press r to retry"), "retry hint missing:\n{output}");
}

#[test]
fn test_render_empty_filter_result() {
    let mut state = AppState::default();
    state.result.items = vec![pikachu()];
    state.result.total_count = 1;
    state.query.filter_type = "fire".into();

    let output = render_dex(&state, 80, 24);

    assert!(output.contains("No fire types on this page"), "{output}");
    assert!(!output.contains("Pikachu"), "filtered card leaked:\n{output}");
}

#[test]
fn test_render_search_bar_when_active() {
    let mut state = AppState::default();
    state.search.active = true;
    state.search.input = "bulba".into();

    let output = render_dex(&state, 80, 24);

    assert!(output.contains("SEARCH"), "search box missing:\n{output}");
    assert!(output.contains("bulba"), "draft missing:\n{output}");
    assert!(output.contains("cancel"), "search hints missing:\n{output}");
}

#[test]
fn test_paging_hint_hidden_for_name_search() {
    let mut state = AppState::default();
    state.result.items = vec![pikachu()];
    state.result.total_count = 1302;

    let output = render_dex(&state, 100, 24);
    assert!(output.contains("p/n"), "paging hint missing:\n{output}");

    state.query.search = "pikachu".into();
    state.result.total_count = 1;
    let output = render_dex(&state, 100, 24);
    assert!(!output.contains("p/n"), "paging hint shown for search:\n{output}");
}

#[test]
fn test_card_grid_empty_page() {
    let mut render = RenderHarness::new(60, 10);
    let mut grid = CardGrid;

    let output = render.render_to_string_plain(|frame| {
        let props = CardGridProps {
            cards: &[],
            loading: false,
            error: None,
            filter_type: "",
            tick: 0,
        };
        grid.render(frame, frame.area(), props);
    });

    assert!(output.contains("No Pokémon found"));
}
