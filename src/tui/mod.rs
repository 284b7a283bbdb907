//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, draws the shell, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws when something changed: input,
//! a resize, or a background query settling. Between events it sleeps up to
//! 250ms waiting for input and drains the query channel.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod shell;
pub mod views;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::boundary::ErrorBoundary;
use crate::core::config::ResolvedConfig;
use crate::core::router::RouteTable;
use crate::core::state::App;
use crate::query::{HttpFetcher, QueryClient};
use crate::tui::components::overlay::{OverlayEvent, OverlayState};
use crate::tui::components::top_nav::link_for_key;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::shell::Shell;
use crate::tui::views::{ViewContext, ViewEvent};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// Prefill for the `/` shortcut.
const SEARCH_PREFIX: &str = "/search?q=";

/// TUI-specific presentation state (not part of core navigation state)
pub struct TuiState {
    /// Error boundary and mounted view
    pub shell: Shell,
    /// Address bar overlay
    pub overlay: OverlayState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            shell: Shell::new(),
            overlay: OverlayState::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Address bar needs a visible cursor
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset on redraw
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(config.api_base_url.clone()));
    let ctx = ViewContext::new(Arc::new(QueryClient::new(fetcher, config.query.clone())));
    let mut app = App::new(RouteTable::standard(), &config.start_route);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background fetches
    let (tx, rx) = mpsc::channel();

    tui.shell.mount(app.route.as_ref(), &app.location);
    ensure_queries(&tui, &ctx, &tx);

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| shell::draw_shell(f, &app, &mut tui, &ctx))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = dispatch_event(&app, &mut tui, &ctx, event) else {
                continue;
            };
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &ctx, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Settled background fetches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            apply_effect(effect, &app, &mut tui, &ctx, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Turn one input event into an action. Shell-level shortcuts win, then the
/// open overlay, then the mounted view.
pub fn dispatch_event(
    app: &App,
    tui: &mut TuiState,
    ctx: &ViewContext,
    event: TuiEvent,
) -> Option<Action> {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Reload => return Some(Action::Reload),
        _ => {}
    }

    // An open overlay takes all remaining input
    if tui.overlay.is_open() {
        let overlay_event = tui.overlay.handle_event(&event)?;
        tui.overlay.close();
        return match overlay_event {
            OverlayEvent::Go(target) => Some(Action::Navigate(target)),
            OverlayEvent::Dismiss => None,
        };
    }

    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar(':' | 'g') => {
            tui.overlay.open(&app.location.to_string());
            None
        }
        TuiEvent::InputChar('/') => {
            tui.overlay.open(SEARCH_PREFIX);
            None
        }
        TuiEvent::InputChar('[') => Some(Action::Back),
        TuiEvent::InputChar(']') => Some(Action::Forward),
        TuiEvent::InputChar('r') => Some(Action::Refetch),
        TuiEvent::InputChar(key @ '1'..='7') => {
            link_for_key(key).map(|link| Action::Navigate(link.path.to_string()))
        }
        _ => match tui.shell.view_mut()?.handle_event(&event, ctx)? {
            ViewEvent::Navigate(target) => Some(Action::Navigate(target)),
        },
    }
}

/// Carry out an effect returned by `update`. Returns `true` when the loop
/// should exit.
pub fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    ctx: &ViewContext,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::Quit => return true,
        Effect::MountView => {
            tui.shell.mount(app.route.as_ref(), &app.location);
            ensure_queries(tui, ctx, tx);
        }
        Effect::Remount => {
            tui.overlay.close();
            tui.shell
                .remount(ErrorBoundary::new(), app.route.as_ref(), &app.location);
            ensure_queries(tui, ctx, tx);
        }
        Effect::Refetch => {
            for key in tui.shell.queries() {
                ctx.query().invalidate(&key);
            }
            ensure_queries(tui, ctx, tx);
        }
        Effect::Redraw | Effect::None => {}
    }
    false
}

/// Start fetches for whatever the mounted view reads and the cache can't
/// serve fresh.
fn ensure_queries(tui: &TuiState, ctx: &ViewContext, tx: &mpsc::Sender<Action>) {
    for key in tui.shell.queries() {
        ctx.query().ensure(key, tx.clone());
    }
}
