pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, AppState, BrainrError, Result};
use crate::feed::{FeedBuffer, FeedEvent, FeedState};

use self::app::{describe_pref, Command, TuiApp};
use self::event::{AppEvent, EventHandler};
use self::layout::Screen;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const ONBOARDING_HINT: &str =
    "Tip: run `brainr onboard --topics Science History` to pick topics. Showing random articles.";

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn draw(
    terminal: &mut Tui,
    ctx: &AppContext,
    tui_app: &TuiApp,
    state: &AppState,
    buffer: &FeedBuffer,
) -> Result<()> {
    let article = buffer.current();
    let screen = Screen {
        article,
        feed_state: buffer.state(),
        position: buffer.position().unwrap_or((0, 0)),
        refilling: buffer.is_refilling(),
        bookmarked: article.is_some_and(|a| state.is_bookmarked(a.id)),
        liked: article.is_some_and(|a| state.is_liked(a.id)),
        palette: ctx.config.colors.palette(state.theme),
    };

    terminal.draw(|frame| layout::render(frame, tui_app, &screen))?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let mut state = AppState::load(ctx.prefs.clone());
    let mut buffer = ctx.feed_buffer();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let keymap = ctx
        .config
        .keybindings
        .keymap()
        .map_err(BrainrError::Config)?;

    if !state.onboarding_completed {
        tui_app.set_status(ONBOARDING_HINT.to_string());
    }

    draw(terminal, &ctx, &tui_app, &state, &buffer)?;
    if let Err(e) = buffer.initialize(state.topics.clone()).await {
        tracing::warn!("Feed failed to load: {}", e);
    }

    loop {
        draw(terminal, &ctx, &tui_app, &state, &buffer)?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = keymap.action(&key);
                let command = tui_app.handle_action(action, buffer.current(), buffer.state());

                match command {
                    Command::Feed(event) => {
                        tui_app.clear_status();
                        if event == FeedEvent::Reload || at_end_waiting(&buffer) {
                            tui_app.set_status("Loading more articles...".to_string());
                            draw(terminal, &ctx, &tui_app, &state, &buffer)?;
                        }

                        if let Err(e) = buffer.dispatch(event).await {
                            tracing::warn!("Feed failed to load: {}", e);
                        }
                        tui_app.clear_status();
                    }
                    Command::Pref(event) => {
                        let applied = event.clone();
                        match state.apply(event) {
                            Ok(()) => tui_app.set_status(describe_pref(&applied, &state)),
                            Err(e) => tui_app.set_status(format!("Could not save: {}", e)),
                        }
                    }
                    Command::OpenBrowser(link) => {
                        if let Err(e) = open::that(&link) {
                            tui_app.set_status(format!("Failed to open browser: {}", e));
                        }
                    }
                    Command::None => {}
                }
            }
            AppEvent::Tick => {
                buffer.collect_refill();
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Advancing from here waits on the network.
fn at_end_waiting(buffer: &FeedBuffer) -> bool {
    *buffer.state() == FeedState::Ready
        && buffer.window().remaining() == 0
        && buffer.window().pending().is_empty()
}
