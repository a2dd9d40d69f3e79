//! Terminal renderer built on `crossterm`.
//!
//! Frames go to stderr so stdout stays free for the chosen items. The terminal
//! is switched to raw mode and the alternate screen on the first frame and
//! restored when the renderer is dropped, including on early returns.
//!
//! Keys are read with `crossterm::event::read`, which falls back to the
//! controlling tty when stdin is a pipe. Terminals that speak the kitty
//! keyboard protocol are asked to disambiguate modified keys so that
//! Shift+Enter and Ctrl+Enter arrive as such. Elsewhere Alt+Enter and Ctrl+J
//! stand in for Ctrl+Enter.

use super::{Priority, Renderer};
use crate::app::Key;
use crate::domain::Result;
use crate::ui::{self, MenuView};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, Stderr, Write};

/// Size assumed when the terminal cannot be queried.
const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Renderer drawing ANSI frames on a terminal.
pub struct TerminalRenderer<W: Write = Stderr> {
    out: W,
    available: bool,
    active: bool,
    enhanced: bool,
    shown: Option<usize>,
}

impl TerminalRenderer<Stderr> {
    /// Creates a renderer on stderr. It is available only if stderr is a
    /// terminal.
    #[must_use]
    pub fn new() -> Self {
        let available = io::stderr().is_terminal();
        Self {
            out: io::stderr(),
            available,
            active: false,
            enhanced: false,
            shown: None,
        }
    }
}

impl Default for TerminalRenderer<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer drawing into `out`. Always available.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            available: true,
            active: false,
            enhanced: false,
            shown: None,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(self.out, EnterAlternateScreen, Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            self.enhanced = true;
        }
        tracing::debug!(enhanced = self.enhanced, "terminal session started");
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if self.enhanced {
            self.enhanced = false;
            if let Err(err) = execute!(self.out, PopKeyboardEnhancementFlags) {
                tracing::warn!(error = %err, "failed to pop keyboard enhancement flags");
            }
        }
        let restored = execute!(self.out, Show, LeaveAlternateScreen);
        terminal::disable_raw_mode()?;
        tracing::debug!("terminal session ended");
        restored
    }
}

fn screen_size() -> (usize, usize) {
    let (cols, rows) = terminal::size().unwrap_or(DEFAULT_SIZE);
    (usize::from(cols.max(1)), usize::from(rows.max(1)))
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn priority(&self) -> Priority {
        Priority::Terminal
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn viewport_rows(&self, lines: u32) -> usize {
        let (cols, rows) = screen_size();
        ui::viewport_rows(lines, cols, rows)
    }

    fn render(&mut self, view: &MenuView) -> Result<()> {
        self.start()?;

        let (cols, rows) = screen_size();
        let frame = ui::draw(view, cols, rows);

        queue!(
            self.out,
            Hide,
            Clear(ClearType::All),
            Print(&frame.text),
            MoveTo(
                u16::try_from(frame.cursor.1.saturating_sub(1)).unwrap_or(u16::MAX),
                u16::try_from(frame.cursor.0.saturating_sub(1)).unwrap_or(u16::MAX)
            ),
            Show
        )?;
        self.out.flush()?;

        self.shown = Some(frame.shown);
        Ok(())
    }

    fn page_size(&self) -> Option<usize> {
        self.shown
    }

    fn poll_key(&mut self) -> Result<(Key, u32)> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    tracing::trace!(?key, "key event");
                    return Ok(map_key_event(key));
                }
                // Redraw at the new size.
                Event::Resize(..) => return Ok((Key::None, 0)),
                _ => {}
            }
        }
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Decodes a crossterm key event into a menu key and codepoint.
///
/// Unknown keys and control chords map to [`Key::None`].
#[must_use]
pub fn map_key_event(event: KeyEvent) -> (Key, u32) {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    let key = match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp if shift => Key::ShiftPageUp,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown if shift => Key::ShiftPageDown,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Backspace if ctrl => Key::WordDelete,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab if shift => Key::ShiftTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::ShiftTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter if ctrl || alt => Key::ControlReturn,
        KeyCode::Enter if shift => Key::ShiftReturn,
        KeyCode::Enter => Key::Return,
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'j' => Key::ControlReturn,
            'u' => Key::LineDeleteLeft,
            'k' => Key::LineDeleteRight,
            'w' => Key::WordDelete,
            'n' => Key::Down,
            'p' => Key::Up,
            'a' => Key::Home,
            'e' => Key::End,
            'f' => Key::Right,
            'b' => Key::Left,
            'g' | 'c' | '[' => Key::Escape,
            _ => Key::None,
        },
        KeyCode::Char(c) => return (Key::Unicode, u32::from(c)),
        _ => Key::None,
    };

    (key, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> (Key, u32) {
        map_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn printable_characters_carry_codepoint() {
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), (Key::Unicode, 'a' as u32));
        assert_eq!(key(KeyCode::Char('Ż'), KeyModifiers::SHIFT), (Key::Unicode, 'Ż' as u32));
    }

    #[test]
    fn enter_variants() {
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE).0, Key::Return);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::SHIFT).0, Key::ShiftReturn);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::CONTROL).0, Key::ControlReturn);
    }

    #[test]
    fn legacy_chords_accept_typed_text() {
        assert_eq!(key(KeyCode::Enter, KeyModifiers::ALT).0, Key::ControlReturn);
        assert_eq!(key(KeyCode::Char('j'), KeyModifiers::CONTROL).0, Key::ControlReturn);
        assert_eq!(key(KeyCode::Char('j'), KeyModifiers::NONE), (Key::Unicode, u32::from('j')));
    }

    #[test]
    fn paging_and_tabs() {
        assert_eq!(key(KeyCode::PageDown, KeyModifiers::NONE).0, Key::PageDown);
        assert_eq!(key(KeyCode::PageUp, KeyModifiers::SHIFT).0, Key::ShiftPageUp);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE).0, Key::Tab);
        assert_eq!(key(KeyCode::BackTab, KeyModifiers::SHIFT).0, Key::ShiftTab);
    }

    #[test]
    fn emacs_chords() {
        assert_eq!(key(KeyCode::Char('u'), KeyModifiers::CONTROL).0, Key::LineDeleteLeft);
        assert_eq!(key(KeyCode::Char('k'), KeyModifiers::CONTROL).0, Key::LineDeleteRight);
        assert_eq!(key(KeyCode::Char('w'), KeyModifiers::CONTROL).0, Key::WordDelete);
        assert_eq!(key(KeyCode::Char('n'), KeyModifiers::CONTROL).0, Key::Down);
        assert_eq!(key(KeyCode::Char('p'), KeyModifiers::CONTROL).0, Key::Up);
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::CONTROL).0, Key::Home);
        assert_eq!(key(KeyCode::Char('e'), KeyModifiers::CONTROL).0, Key::End);
        assert_eq!(key(KeyCode::Char('z'), KeyModifiers::CONTROL), (Key::None, 0));
    }

    #[test]
    fn escape_and_unknown_keys() {
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE).0, Key::Escape);
        assert_eq!(key(KeyCode::F(5), KeyModifiers::NONE), (Key::None, 0));
    }

    #[test]
    fn writer_renderer_reports_name_and_priority() {
        let renderer = TerminalRenderer::with_writer(Vec::new());
        assert_eq!(renderer.name(), "terminal");
        assert_eq!(renderer.priority(), Priority::Terminal);
        assert!(renderer.is_available());
        assert_eq!(renderer.page_size(), None);
    }
}
