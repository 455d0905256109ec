use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " ↵:open ⌫:back r:ren d:del u:upload q:quit ";

/// Status bar widget that displays folder info, key hints, or status messages.
pub struct StatusBarWidget<'a> {
    folder_info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    uploads: usize,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(folder_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            folder_info,
            theme,
            status_message: None,
            is_error: false,
            uploads: 0,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    /// Number of rows with an upload in flight.
    pub fn uploads(mut self, count: usize) -> Self {
        self.uploads = count;
        self
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        buf.set_style(area, base);

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
            } else {
                base.fg(self.theme.success_fg)
            };

            let display = if char_len(msg) >= width {
                truncate(msg, width)
            } else {
                format!("{:<width$}", msg, width = width)
            };

            buf.set_line(area.x, area.y, &Line::from(Span::styled(display, style)), area.width);
            return;
        }

        // Normal bar: [folder info] [uploads] ... [key hints]
        let hints_len = char_len(KEY_HINTS);
        let remaining = width.saturating_sub(hints_len);

        let mut spans = vec![Span::styled(truncate(self.folder_info, remaining), base)];

        if self.uploads > 0 {
            let label = format!(" ⇡{} uploading", self.uploads);
            spans.push(Span::styled(
                label,
                base.fg(self.theme.warning_fg).add_modifier(Modifier::BOLD),
            ));
        }

        let used: usize = spans.iter().map(|s| char_len(&s.content)).sum();
        let pad = width.saturating_sub(used).saturating_sub(hints_len);
        if pad > 0 {
            spans.push(Span::styled(" ".repeat(pad), base));
        }
        spans.push(Span::styled(
            KEY_HINTS,
            base.fg(self.theme.meta_fg).add_modifier(Modifier::DIM),
        ));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
