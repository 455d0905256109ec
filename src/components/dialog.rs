use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::AppMode;
use crate::cabinet::Draft;
use crate::theme::ThemeColors;

/// Centered modal for the rename prompt and the delete confirmation.
pub struct DialogWidget<'a> {
    mode: &'a AppMode,
    draft: Option<&'a Draft>,
    target_name: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(
        mode: &'a AppMode,
        draft: Option<&'a Draft>,
        target_name: &'a str,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            mode,
            draft,
            target_name,
            theme,
        }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    /// Draw the frame and return the inner area, or `None` if nothing fits.
    fn frame(&self, title: &str, border: Color, width: u16, height: u16, area: Rect, buf: &mut Buffer) -> Option<Rect> {
        let rect = Self::centered_rect(width, height, area);
        Clear.render(rect, buf);

        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));
        let inner = block.inner(rect);
        block.render(rect, buf);

        (inner.height > 0 && inner.width > 0).then_some(inner)
    }

    fn hint(&self, text: &'static str, inner: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.meta_fg)
            .add_modifier(Modifier::DIM);
        if inner.height > 1 {
            buf.set_line(
                inner.x,
                inner.y + inner.height - 1,
                &Line::from(Span::styled(text, style)),
                inner.width,
            );
        }
    }

    fn render_rename(&self, draft: &Draft, area: Rect, buf: &mut Buffer) {
        let width = 56.min(area.width.saturating_sub(4));
        let Some(inner) = self.frame(
            "Enter a new name",
            self.theme.dialog_border_fg,
            width,
            6,
            area,
            buf,
        ) else {
            return;
        };

        let current = Line::from(vec![
            Span::styled("Current: ", Style::default().fg(self.theme.meta_fg)),
            Span::styled(self.target_name, Style::default().fg(self.theme.file_fg)),
        ]);
        buf.set_line(inner.x, inner.y, &current, inner.width);

        if inner.height > 2 {
            let line = input_line(draft, inner.width as usize, self.theme);
            buf.set_line(inner.x, inner.y + 1, &line, inner.width);
        }

        self.hint("[Enter] OK  [Esc] Cancel", inner, buf);
    }

    fn render_delete(&self, area: Rect, buf: &mut Buffer) {
        let width = (self.target_name.chars().count() as u16 + 12)
            .max(36)
            .min(area.width.saturating_sub(4));
        let Some(inner) = self.frame("Delete", self.theme.error_fg, width, 5, area, buf) else {
            return;
        };

        let line = Line::from(vec![
            Span::styled(
                "Delete ",
                Style::default()
                    .fg(self.theme.warning_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.target_name, Style::default().fg(self.theme.file_fg)),
            Span::styled("?", Style::default().fg(self.theme.warning_fg)),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);

        self.hint("[y] Yes  [n/Esc] Cancel", inner, buf);
    }
}

/// The draft text with a block cursor, scrolled so the cursor stays visible.
fn input_line(draft: &Draft, max_width: usize, theme: &ThemeColors) -> Line<'static> {
    let input = &draft.input;
    let cursor = draft.cursor_position;

    let before = &input[..cursor];
    let (cursor_char, after) = match input[cursor..].chars().next() {
        Some(c) => (c.to_string(), input[cursor + c.len_utf8()..].to_string()),
        None => (" ".to_string(), String::new()),
    };

    // Drop characters from the left until the cursor fits
    let budget = max_width.saturating_sub(2);
    let before_count = before.chars().count();
    let before_display: String = before
        .chars()
        .skip(before_count.saturating_sub(budget))
        .collect();

    let input_style = Style::default().fg(theme.file_fg);
    let cursor_style = Style::default()
        .bg(theme.file_fg)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(before_display, input_style),
        Span::styled(cursor_char, cursor_style),
        Span::styled(after, input_style),
    ])
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.mode {
            AppMode::Rename { .. } => {
                if let Some(draft) = self.draft {
                    self.render_rename(draft, area, buf);
                }
            }
            AppMode::DeleteConfirm { .. } => self.render_delete(area, buf),
            AppMode::Normal => {}
        }
    }
}
