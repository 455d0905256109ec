use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::cabinet::CabinetWidget;
use crate::components::dialog::DialogWidget;
use crate::components::header::HeaderWidget;
use crate::components::status_bar::StatusBarWidget;

/// Render the application UI.
pub fn render(app: &App, frame: &mut Frame) {
    let [header_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let folder = app.navigator.active();
    let header = HeaderWidget::new(app.header, folder, &app.theme)
        .can_go_back(app.navigator.can_go_back())
        .loading(app.loading);
    frame.render_widget(header, header_area);

    let block = Block::default()
        .title(format!(" {} ", folder))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));
    let items = app.store.items();
    let table = CabinetWidget::new(
        items,
        app.listed_folder(),
        app.selected_index,
        &app.actions,
        &app.theme,
    )
    .loading(app.loading)
    .block(block);
    frame.render_widget(table, table_area);

    let folder_info = format!(" {} | {} items", folder, items.len());
    let mut status = StatusBarWidget::new(&folder_info, &app.theme).uploads(app.actions.busy_count());
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, status_area);

    // Dialog overlay
    let target = match &app.mode {
        AppMode::Rename { target } | AppMode::DeleteConfirm { target } => target,
        AppMode::Normal => return,
    };
    let target_name = app
        .store
        .get(target)
        .map(|item| item.name.as_str())
        .unwrap_or_default();
    let dialog = DialogWidget::new(&app.mode, app.rename_draft(), target_name, &app.theme);
    frame.render_widget(dialog, frame.area());
}
