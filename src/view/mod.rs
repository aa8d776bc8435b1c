//! Terminal host for a single combo box.

pub mod combo_box;
pub mod styles;

pub use combo_box::{ComboBoxLayout, ComboBoxWidget, Hit};
pub use styles::{ColorConfig, ComboBoxStyles};

use crate::config::KeyBindings;
use crate::model::InstanceIdGenerator;
use crate::state::{handle_key, ComboBox, ComboBoxProps, MessageId};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Modifier, Style},
    Terminal,
};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Widest the combo box is drawn, in columns.
pub const MAX_WIDGET_WIDTH: u16 = 60;

/// Footer shown when the pointer is not over an affordance.
pub const KEY_HINTS: &str = "↑/↓: Move  Enter: Select  Esc: Clear  Ctrl+C: Quit";

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Host settings that are not part of the combo box itself.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    /// Key bindings for the dispatcher.
    pub key_bindings: KeyBindings,
    /// Widget styles.
    pub styles: ComboBoxStyles,
    /// Quit as soon as an item is selected.
    pub exit_on_select: bool,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, T>
where
    B: Backend,
{
    terminal: Terminal<B>,
    combo: ComboBox<T>,
    settings: AppSettings,
    focused: bool,
    /// Number of `on_change` notifications so far.
    changes: Rc<Cell<u64>>,
    /// `changes` as of the previous event.
    seen_changes: u64,
    /// Footer text while hovering an affordance.
    hint: Option<String>,
    /// Last rendered geometry (for mouse hit testing)
    last_layout: Option<ComboBoxLayout>,
}

impl<T: Clone + PartialEq + 'static> TuiApp<CrosstermBackend<Stdout>, T> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    /// If any step after raw mode fails, the terminal is restored before
    /// the error is returned.
    pub fn new(
        props: ComboBoxProps<T>,
        ids: &InstanceIdGenerator,
        settings: AppSettings,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = restore_on_error(
            || {
                let mut stdout = io::stdout();
                stdout.execute(EnterAlternateScreen)?;
                stdout.execute(EnableMouseCapture)?;
                Ok(Terminal::new(CrosstermBackend::new(stdout))?)
            },
            restore_terminal,
        )?;

        Ok(Self::with_terminal(terminal, props, ids, settings))
    }
}

impl<B, T> TuiApp<B, T>
where
    B: Backend,
    T: Clone + PartialEq + 'static,
{
    /// Build the app on an existing terminal.
    ///
    /// Wraps `on_change` so the host can see selections for `exit_on_select`.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut props: ComboBoxProps<T>,
        ids: &InstanceIdGenerator,
        settings: AppSettings,
    ) -> Self {
        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        let mut on_change = props.on_change;
        props.on_change = Box::new(move |item: Option<&T>| {
            counter.set(counter.get() + 1);
            on_change(item);
        });

        Self {
            terminal,
            combo: ComboBox::new(props, ids),
            settings,
            focused: true,
            changes,
            seen_changes: 0,
            hint: None,
            last_layout: None,
        }
    }

    /// The hosted combo box.
    pub fn combo(&self) -> &ComboBox<T> {
        &self.combo
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Footer hint currently shown, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Terminal, for buffer inspection.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C) or, with `exit_on_select`, once
    /// an item is selected.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let quit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(..) => false,
                _ => continue,
            };
            if quit {
                return Ok(());
            }
            self.draw()?;
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, whatever the bindings say
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("quit requested");
            return true;
        }

        self.focused = true;
        let outcome = handle_key(&mut self.combo, &self.settings.key_bindings, key);
        debug!(?key, ?outcome, "key handled");
        self.after_event()
    }

    /// Handle a single mouse event
    ///
    /// Returns true if app should quit
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(layout) = self.last_layout else {
            return false;
        };
        let hit = layout.hit_test(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                debug!(?hit, "click");
                match hit {
                    Hit::Clear => {
                        self.focused = true;
                        self.combo.clear_selection();
                    }
                    Hit::Toggle | Hit::Input => {
                        self.focused = true;
                        self.combo.click_toggle();
                    }
                    Hit::Row(row) => {
                        self.combo.select_visible_index(row);
                    }
                    Hit::Menu => {}
                    Hit::Outside => {
                        self.focused = false;
                        self.combo.close();
                    }
                }
            }
            MouseEventKind::Moved => {
                if let Hit::Row(row) = hit {
                    self.combo.set_highlight(row);
                }
                self.hint = self.hint_for(hit);
            }
            MouseEventKind::ScrollDown if self.combo.is_open() => {
                self.combo.move_highlight(1);
            }
            MouseEventKind::ScrollUp if self.combo.is_open() => {
                self.combo.move_highlight(-1);
            }
            _ => {}
        }

        self.after_event()
    }

    /// Render the current state.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let combo = &self.combo;
        let styles = self.settings.styles;
        let focused = self.focused;
        let footer = self.hint.as_deref().unwrap_or(KEY_HINTS);
        let mut layout = None;

        self.terminal.draw(|frame| {
            let (widget_area, footer_area) = split_screen(frame.area());
            layout = Some(ComboBoxLayout::compute(combo, widget_area));
            frame.render_widget(
                ComboBoxWidget::new(combo).styles(styles).focused(focused),
                widget_area,
            );
            if !footer_area.is_empty() {
                frame.buffer_mut().set_stringn(
                    footer_area.x,
                    footer_area.y,
                    footer,
                    footer_area.width as usize,
                    Style::default().add_modifier(Modifier::DIM),
                );
            }
        })?;

        self.last_layout = layout;
        Ok(())
    }

    fn hint_for(&self, hit: Hit) -> Option<String> {
        match hit {
            Hit::Clear => Some(self.combo.translate(MessageId::ClearSelection)),
            Hit::Toggle if self.combo.is_open() => Some(self.combo.translate(MessageId::CloseMenu)),
            Hit::Toggle => Some(self.combo.translate(MessageId::OpenMenu)),
            _ => None,
        }
    }

    /// Bookkeeping after every event. Returns true if app should quit.
    fn after_event(&mut self) -> bool {
        if self.combo.take_focus_request() {
            self.focused = true;
        }
        let changes = self.changes.get();
        let changed = changes != self.seen_changes;
        self.seen_changes = changes;
        if self.settings.exit_on_select && changed && self.combo.selected_item().is_some() {
            info!("item selected, exiting");
            return true;
        }
        false
    }
}

/// Split the screen into the widget area (with a one-cell margin) and the footer row.
fn split_screen(area: Rect) -> (Rect, Rect) {
    let footer = Rect::new(
        area.x,
        area.bottom().saturating_sub(1),
        area.width,
        area.height.min(1),
    );
    let widget = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2).min(MAX_WIDGET_WIDTH),
        area.height.saturating_sub(3),
    );
    (widget, footer)
}

/// Run the picker on the real terminal and return the selection.
///
/// The terminal is restored even when the event loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_picker<T: Clone + PartialEq + 'static>(
    props: ComboBoxProps<T>,
    ids: &InstanceIdGenerator,
    settings: AppSettings,
) -> Result<Option<T>, TuiError> {
    let mut app = TuiApp::new(props, ids, settings)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result.map(|()| app.combo().selected_item().cloned())
}

/// Run `setup`; if it fails, run `restore` before handing back the setup error.
fn restore_on_error<R>(
    setup: impl FnOnce() -> Result<R, TuiError>,
    restore: impl FnOnce() -> Result<(), TuiError>,
) -> Result<R, TuiError> {
    setup().inspect_err(|err| {
        warn!(error = %err, "terminal setup failed, restoring");
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "terminal restore failed");
        }
    })
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
