use crate::ui::app::Panel;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer {
    focus: Panel,
    editing: bool,
}

impl Footer {
    pub fn new(focus: Panel, editing: bool) -> Self {
        Self { focus, editing }
    }

    pub fn hints(&self) -> &'static str {
        match (self.focus, self.editing) {
            (Panel::Inventory, true) => " Enter: Submit │ Esc: Cancel │ Ctrl+Q: Quit",
            (Panel::Auth, _) => {
                " Tab: Panel │ ↑/↓: Field │ Enter: Login │ Ctrl+R: Register │ Ctrl+O: Logout │ Ctrl+Q: Quit"
            }
            (Panel::Inventory, false) => {
                " Tab: Panel │ ↑/↓: Select │ a: Set stock │ m: Movement │ r: Reload │ Ctrl+Q: Quit"
            }
            (Panel::Movements, _) => {
                " Tab: Panel │ ←/→: Field │ 0-9: Filter │ Enter/r: Load │ Ctrl+Q: Quit"
            }
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let version = format!("v{} ", VERSION);

        // Char count, not bytes: the hints contain box-drawing glyphs.
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
