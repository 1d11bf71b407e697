//! Pokedex TUI - paginated PokeAPI browser

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use pokedex::action::Action;
use pokedex::api::{self, HttpSource, PokemonSource, API_BASE, DEFAULT_TIMEOUT_SECS};
use pokedex::components::{Component, DexView, DexViewProps, SearchBar, SearchBarProps};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, DEFAULT_LIMIT, LOADING_TICK_MS};

/// Browse PokeAPI page by page with search, type filter and sorting
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Paginated Pokedex TUI backed by PokeAPI")]
struct Args {
    /// Cards per page
    #[arg(long, short, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=100))]
    limit: u32,

    /// PokeAPI base URL
    #[arg(long, default_value = API_BASE)]
    api_base: String,

    /// HTTP request timeout in seconds (minimum 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Browse,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Browse,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            Some(DexComponentId::Browse)
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Browse => DexContext::Browse,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Browse
    }
}

static SOURCE: OnceLock<Arc<dyn PokemonSource>> = OnceLock::new();

fn pokemon_source() -> Option<Arc<dyn PokemonSource>> {
    SOURCE.get().cloned()
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        limit,
        api_base,
        timeout_secs,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    logging::init(&log_path).map_err(|err| io::Error::other(err.to_string()))?;
    tracing::info!(%api_base, limit, "starting pokedex");

    let source = HttpSource::new(api_base, Duration::from_secs(timeout_secs))
        .map_err(|err| io::Error::other(err.to_string()))?;
    let _ = SOURCE.set(Arc::new(source));

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(limit))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;
    tracing::info!("pokedex exited");

    Ok(())
}

struct DexUi {
    browse: DexView,
    search: SearchBar,
}

impl DexUi {
    fn new() -> Self {
        Self {
            browse: DexView,
            search: SearchBar,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::Browse, area);
        if state.search.active {
            event_ctx.set_component_area(DexComponentId::Search, area);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }

        let props = DexViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.browse.render(frame, area, props);
    }

    fn handle_browse_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DexViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .browse
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            input: &state.search.input,
            is_focused: state.search.active,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_browse = Rc::clone(&ui);
    bus.register(DexComponentId::Browse, move |event, state| {
        ui_browse
            .borrow_mut()
            .handle_browse_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Every page task resolves to exactly
/// one completion action carrying its request id.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPage { request, query } => {
            let source = pokemon_source();
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                let Some(source) = source else {
                    tracing::error!(request, "no pokemon source configured");
                    return Action::PageDidError { request };
                };
                match api::fetch_page(source, &query).await {
                    Ok(page) => {
                        tracing::info!(
                            request,
                            offset = query.offset,
                            items = page.items.len(),
                            total = page.total_count,
                            "page loaded"
                        );
                        Action::PageDidLoad { request, page }
                    }
                    Err(error) => {
                        tracing::warn!(request, search = %query.search, %error, "page fetch failed");
                        Action::PageDidError { request }
                    }
                }
            });
        }
        Effect::LoadTypes => {
            let source = pokemon_source();
            ctx.tasks().spawn(TaskKey::new("types"), async move {
                let Some(source) = source else {
                    return Action::TypesDidError("no pokemon source configured".to_string());
                };
                match api::fetch_type_list(source).await {
                    Ok(types) => Action::TypesDidLoad(types),
                    Err(error) => {
                        tracing::warn!(%error, "type list fetch failed");
                        Action::TypesDidError(error.to_string())
                    }
                }
            });
        }
    }
}
