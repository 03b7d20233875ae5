use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Session indicator, service URL and refresh generation.
pub struct Header<'a> {
    base_url: &'a str,
    authenticated: bool,
    generation: u64,
}

impl<'a> Header<'a> {
    pub fn new(base_url: &'a str, authenticated: bool, generation: u64) -> Self {
        Self {
            base_url,
            authenticated,
            generation,
        }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (session_text, session_color) = if self.authenticated {
            ("● Signed in", STATUS_OK)
        } else {
            ("○ Anonymous", STATUS_ERROR)
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(session_text, Style::default().fg(session_color)),
            Span::styled("  │  ", separator_style),
            Span::styled(self.base_url.to_string(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("refresh #{}", self.generation), text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
