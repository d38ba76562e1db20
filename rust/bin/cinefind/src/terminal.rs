//! Interactive terminal front end.
//!
//! Owns no app state: keys become requests, state changes trigger a
//! redraw from the current snapshots.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cinefind_discover::request::{InitializeReq, SearchQueryReq, SearchTypeReq};
use cinefind_discover::state::{SearchInput, SearchState, TrendingState};
use cinefind_discover::DiscoverContext;
use cinefind_flux::Flux;
use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, warn};

use crate::render::render_screen;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a key press means for the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// The search text changed.
    Edited,
    /// Search now with the current text.
    Submit,
    Quit,
    Ignore,
}

/// Apply `key` to the search text.
pub fn apply_key(key: &KeyEvent, text: &mut String) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Backspace => {
            if text.pop().is_some() {
                KeyAction::Edited
            } else {
                KeyAction::Ignore
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if text.is_empty() {
                KeyAction::Ignore
            } else {
                text.clear();
                KeyAction::Edited
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            text.push(c);
            KeyAction::Edited
        }
        _ => KeyAction::Ignore,
    }
}

/// Raw mode + alternate screen for the guard's lifetime.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run until the user quits. Searches started from here run on the
/// context's background tracker so shutdown can wait for them.
pub async fn run(flux: Arc<Flux>, ctx: Arc<DiscoverContext>) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;

    let redraw = Arc::new(Notify::new());
    let subscription = {
        let redraw = redraw.clone();
        flux.subscribe("#", move |_, _| redraw.notify_one())
    };

    let (tx, mut keys) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let stop = stop.clone();
        tokio::task::spawn_blocking(move || read_keys(tx, &stop))
    };

    {
        let flux = flux.clone();
        ctx.background.spawn(async move {
            flux.emit(InitializeReq::PATH, InitializeReq).await;
        });
    }

    let mut out = io::stdout();
    let mut text = String::new();
    draw(&mut out, &flux)?;

    loop {
        tokio::select! {
            _ = redraw.notified() => draw(&mut out, &flux)?,
            key = keys.recv() => {
                let Some(key) = key else { break };
                match apply_key(&key, &mut text) {
                    KeyAction::Quit => break,
                    KeyAction::Edited => {
                        flux.emit(SearchTypeReq::PATH, SearchTypeReq { text: text.clone() }).await;
                    }
                    KeyAction::Submit => {
                        let flux = flux.clone();
                        let query = text.clone();
                        ctx.background.spawn(async move {
                            flux.emit(SearchQueryReq::PATH, SearchQueryReq { query }).await;
                        });
                    }
                    KeyAction::Ignore => {}
                }
            }
        }
    }

    stop.store(true, Ordering::Relaxed);
    flux.unsubscribe("#", subscription);
    match reader.await {
        Ok(Err(e)) => warn!("key reader: {e}"),
        Err(e) => warn!("key reader task: {e}"),
        Ok(Ok(())) => debug!("key reader stopped"),
    }
    Ok(())
}

fn read_keys(tx: mpsc::UnboundedSender<KeyEvent>, stop: &AtomicBool) -> io::Result<()> {
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                break;
            }
        }
    }
    Ok(())
}

fn draw(out: &mut Stdout, flux: &Flux) -> io::Result<()> {
    let input = flux
        .get_as::<SearchInput>(SearchInput::PATH)
        .unwrap_or_default();
    let search = flux
        .get_as::<SearchState>(SearchState::PATH)
        .unwrap_or_default();
    let trending = flux.get_as::<TrendingState>(TrendingState::PATH);

    let (width, height) = terminal::size()?;
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in render_screen(input.as_str(), &search, trending.as_ref())
        .iter()
        .take(height as usize)
    {
        let clipped: String = line.chars().take(width as usize).collect();
        queue!(out, Print(clipped), MoveToNextLine(1))?;
    }
    out.flush()
}
