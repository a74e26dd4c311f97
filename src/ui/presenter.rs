use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};

/// Narrow surface the turn orchestrator talks to. One turn drives it as:
/// `user_message`, `answer_pending`, zero or more `answer_update`s (each a
/// full replacement of the previous one), then exactly one of
/// `answer_complete` or `answer_error`.
pub trait TurnPresenter {
    fn user_message(&mut self, question: &str);
    fn answer_pending(&mut self);
    fn answer_update(&mut self, rendered: &str);
    fn answer_complete(&mut self);
    fn answer_error(&mut self, message: &str);
}

const PENDING_TEXT: &str = "Thinking...";

/// Line-oriented terminal frontend. The streamed answer region is repainted
/// in place: every update moves the cursor back over the previous render and
/// prints the replacement, so the newest content is always the bottommost
/// text on screen.
pub struct TerminalPresenter {
    out: io::Stdout,
    streamed_rows: u16,
    pending_shown: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            streamed_rows: 0,
            pending_shown: false,
        }
    }

    pub fn status_success(&mut self, message: &str) {
        let _ = execute!(
            self.out,
            SetForegroundColor(Color::Green),
            Print(format!("{message}\n")),
            ResetColor
        );
    }

    pub fn status_failure(&mut self, message: &str) {
        let _ = execute!(
            self.out,
            SetForegroundColor(Color::Red),
            Print(format!("{message}\n")),
            ResetColor
        );
    }

    pub fn notice(&mut self, message: &str) {
        let _ = execute!(
            self.out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{message}\n")),
            ResetColor
        );
    }

    fn label(&mut self, text: &str, color: Color) {
        let _ = execute!(
            self.out,
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(format!("{text}\n")),
            SetAttribute(Attribute::Reset),
            ResetColor
        );
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnPresenter for TerminalPresenter {
    fn user_message(&mut self, question: &str) {
        self.label("You", Color::Green);
        let _ = execute!(self.out, Print(format!("{question}\n\n")));
    }

    fn answer_pending(&mut self) {
        self.streamed_rows = 0;
        self.pending_shown = true;
        self.label("AI", Color::Cyan);
        let _ = execute!(
            self.out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{PENDING_TEXT}\n")),
            ResetColor
        );
        let _ = self.out.flush();
    }

    fn answer_update(&mut self, rendered: &str) {
        let clear_rows = if self.pending_shown {
            1
        } else {
            self.streamed_rows
        };
        self.pending_shown = false;
        if clear_rows > 0 {
            let _ = execute!(
                self.out,
                cursor::MoveToPreviousLine(clear_rows),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            );
        }
        let _ = execute!(self.out, Print(format!("{rendered}\n")));
        self.streamed_rows = rendered_rows(rendered);
        let _ = self.out.flush();
    }

    fn answer_complete(&mut self) {
        self.streamed_rows = 0;
        self.pending_shown = false;
        let _ = execute!(self.out, Print("\n"));
        let _ = self.out.flush();
    }

    fn answer_error(&mut self, message: &str) {
        self.streamed_rows = 0;
        self.pending_shown = false;
        let _ = execute!(
            self.out,
            SetForegroundColor(Color::Red),
            Print(format!("[connection lost: {message}]\n\n")),
            ResetColor
        );
        let _ = self.out.flush();
    }
}

fn rendered_rows(rendered: &str) -> u16 {
    rendered.lines().count().max(1).min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_rows_counts_lines() {
        assert_eq!(rendered_rows(""), 1);
        assert_eq!(rendered_rows("one line"), 1);
        assert_eq!(rendered_rows("a\nb\nc"), 3);
    }
}
