use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::cabinet::{ActionKind, ActionState, FolderId, Item, ItemKind};
use crate::theme::ThemeColors;

const UPDATED_WIDTH: usize = 17;
const SIZE_WIDTH: usize = 10;
const VERSION_WIDTH: usize = 8;
const BY_WIDTH: usize = 10;
const UPLOAD_WIDTH: usize = 13;
const ICON_WIDTH: usize = 3;
const MIN_NAME_WIDTH: usize = 8;

/// Table of the items in the active folder, one row per item.
pub struct CabinetWidget<'a> {
    items: &'a [Item],
    /// Folder the items were listed from; busy flags are looked up under it.
    folder: &'a FolderId,
    selected: usize,
    actions: &'a ActionState,
    theme: &'a ThemeColors,
    loading: bool,
    block: Option<Block<'a>>,
}

impl<'a> CabinetWidget<'a> {
    pub fn new(
        items: &'a [Item],
        folder: &'a FolderId,
        selected: usize,
        actions: &'a ActionState,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            items,
            folder,
            selected,
            actions,
            theme,
            loading: false,
            block: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn name_width(total: usize) -> usize {
        total
            .saturating_sub(ICON_WIDTH + UPDATED_WIDTH + SIZE_WIDTH + VERSION_WIDTH + BY_WIDTH + UPLOAD_WIDTH)
            .max(MIN_NAME_WIDTH)
    }

    fn header_line(&self, name_width: usize) -> Line<'static> {
        let text = format!(
            "{:icon$}{:name$}{:updated$}{:>size$} {:version$}{:by$}{}",
            "",
            "Name",
            "Last updated",
            "Size",
            "Version",
            "By",
            "Upload",
            icon = ICON_WIDTH,
            name = name_width,
            updated = UPDATED_WIDTH,
            size = SIZE_WIDTH - 1,
            version = VERSION_WIDTH,
            by = BY_WIDTH,
        );
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(self.theme.meta_fg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))
    }

    fn row_line(&self, item: &Item, is_selected: bool, name_width: usize) -> Line<'static> {
        let busy = self.actions.is_busy(ActionKind::Upload, self.folder, &item.id);

        let (icon, name_style) = match item.kind {
            ItemKind::Folder => (
                "📁 ",
                Style::default()
                    .fg(self.theme.folder_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            ItemKind::File => ("📄 ", Style::default().fg(self.theme.file_fg)),
        };
        let meta = Style::default().fg(self.theme.meta_fg);
        let version_style = Style::default()
            .fg(self.theme.version_fg)
            .add_modifier(Modifier::BOLD);
        let (upload, upload_style) = if busy {
            (
                "Uploading...",
                Style::default()
                    .fg(self.theme.busy_fg)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            ("[upload]", meta)
        };

        let mut spans = vec![
            Span::raw(icon),
            Span::styled(fit(&item.name, name_width), name_style),
            Span::styled(
                fit(&item.last_updated.format("%Y-%m-%d %H:%M").to_string(), UPDATED_WIDTH),
                meta,
            ),
            Span::styled(format!("{:>w$} ", format!("{} KB", item.size), w = SIZE_WIDTH - 1), meta),
            Span::styled(fit(&item.version, VERSION_WIDTH), version_style),
            Span::styled(fit(&item.updated_by, BY_WIDTH), meta),
            Span::styled(upload, upload_style),
        ];

        if is_selected {
            let highlight = Style::default()
                .bg(self.theme.row_selected_bg)
                .fg(self.theme.row_selected_fg);
            for span in &mut spans {
                span.style = span.style.patch(highlight);
            }
        }
        Line::from(spans)
    }
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count < width {
        format!("{:<width$}", text, width = width)
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(2)).collect();
        out.push_str("… ");
        out
    }
}

impl<'a> Widget for CabinetWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let name_width = Self::name_width(inner.width as usize);
        buf.set_line(inner.x, inner.y, &self.header_line(name_width), inner.width);

        let rows_height = inner.height.saturating_sub(1) as usize;
        let first_row_y = inner.y + 1;

        if self.items.is_empty() {
            let text = if self.loading { "Loading..." } else { "(empty folder)" };
            let line = Line::from(Span::styled(text, Style::default().fg(self.theme.meta_fg)));
            if rows_height > 0 {
                buf.set_line(inner.x, first_row_y, &line, inner.width);
            }
            return;
        }

        // Keep the selected row visible
        let scroll = self.selected.saturating_sub(rows_height.saturating_sub(1));

        for (i, (idx, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(scroll)
            .take(rows_height)
            .enumerate()
        {
            let y = first_row_y + i as u16;
            let line = self.row_line(item, idx == self.selected, name_width);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
