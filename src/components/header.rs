use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::HeaderKind;
use crate::cabinet::FolderId;
use crate::theme::ThemeColors;

/// One-line banner: header variant, active folder and fetch indicator.
pub struct HeaderWidget<'a> {
    kind: HeaderKind,
    folder: &'a FolderId,
    can_go_back: bool,
    loading: bool,
    theme: &'a ThemeColors,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(kind: HeaderKind, folder: &'a FolderId, theme: &'a ThemeColors) -> Self {
        Self {
            kind,
            folder,
            can_go_back: false,
            loading: false,
            theme,
        }
    }

    pub fn can_go_back(mut self, can_go_back: bool) -> Self {
        self.can_go_back = can_go_back;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let meta = Style::default().fg(self.theme.meta_fg);
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.kind.label()),
                Style::default()
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", meta),
        ];
        if self.can_go_back {
            spans.push(Span::styled("← ", meta));
        }
        spans.push(Span::styled(
            format!("📁 {}", self.folder),
            Style::default().fg(self.theme.folder_fg),
        ));
        if self.loading {
            spans.push(Span::styled(
                "  loading…",
                Style::default()
                    .fg(self.theme.busy_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
