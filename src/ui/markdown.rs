use crate::ui::metrics::wrap_display_lines;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

/// Turns the accumulated raw answer into display text. The flavor is fixed
/// at construction: Markdown through a termimad skin, or verbatim text with
/// display-width wrapping only. Either way the output is wrapped to `width`,
/// so every emitted line fits one terminal row and callers can count rows by
/// counting lines. Rendering is total and idempotent.
pub struct AnswerRenderer {
    skin: Option<MadSkin>,
    width: usize,
}

impl AnswerRenderer {
    pub fn markdown(width: usize) -> Self {
        Self {
            skin: Some(answer_skin()),
            width: width.max(1),
        }
    }

    pub fn verbatim(width: usize) -> Self {
        Self {
            skin: None,
            width: width.max(1),
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.skin.is_some()
    }

    pub fn render(&self, raw: &str) -> String {
        match &self.skin {
            Some(skin) => skin
                .text(raw, Some(self.width))
                .to_string()
                .trim_end_matches('\n')
                .to_string(),
            None => wrap_display_lines(raw, self.width).join("\n"),
        }
    }
}

fn answer_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Cyan);
    skin.headers[1].set_fg(Color::Blue);
    skin.headers[2].set_fg(Color::Green);
    skin.code_block.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Yellow);
    skin.bold.set_fg(Color::White);
    skin.italic.set_fg(Color::Magenta);
    skin
}
