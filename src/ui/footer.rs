use crate::ui::app::Focus;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints; navigation hints are dimmed when the move is unavailable.
    pub fn widget(
        &self,
        area: Rect,
        focus: Focus,
        can_go_prev: bool,
        can_go_next: bool,
    ) -> Paragraph<'static> {
        let enabled = Style::default().fg(HEADER_TEXT);
        let disabled = Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM);
        let pick = |on: bool| if on { enabled } else { disabled };

        let mut spans = match focus {
            Focus::Form => vec![
                Span::styled(" Enter: Search │ Tab: Next field │ Ctrl+U: Clear │ Esc: Notes", enabled),
            ],
            Focus::Notes => vec![
                Span::styled(" ←/p: Prev", pick(can_go_prev)),
                Span::styled(" │ ", enabled),
                Span::styled("→/n: Next", pick(can_go_next)),
                Span::styled(" │ ↑↓: Scroll │ r: Retry │ /: Search", enabled),
            ],
        };
        spans.push(Span::styled(" │ Ctrl+Q: Quit", enabled));

        let version = format!("v{} ", VERSION);
        // Padding by char count, not bytes (arrows are multi-byte)
        let hints_width: usize = spans.iter().map(|span| span.content.chars().count()).sum();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version.chars().count());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(version, disabled));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
