use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cabinet::{
    next_version, run_settled, ActionKind, ActionState, CollectionStore, Draft, FetchTicket,
    FolderId, FolderNavigator, Item, ItemId, RenameFlow,
};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::event::{Event, EventSender};
use crate::source::{FolderSource, Uploader};
use crate::theme::{resolve_theme, ThemeColors};

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// The rename prompt of `target` has keyboard focus.
    Rename { target: ItemId },
    DeleteConfirm { target: ItemId },
}

/// Which decorative header is shown above the listing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    #[default]
    A,
    B,
    C,
}

impl HeaderKind {
    pub fn label(&self) -> &'static str {
        match self {
            HeaderKind::A => "Header Type A",
            HeaderKind::B => "Header Type B",
            HeaderKind::C => "Header Type C",
        }
    }
}

/// A transient message for the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
pub struct App {
    pub store: CollectionStore,
    pub navigator: FolderNavigator,
    /// Rename prompt state per row.
    pub rename_flows: HashMap<ItemId, RenameFlow>,
    pub actions: ActionState,
    pub selected_index: usize,
    pub mode: AppMode,
    pub header: HeaderKind,
    /// A fetch for the active folder is in flight.
    pub loading: bool,
    pub confirm_delete: bool,
    pub status_message: Option<StatusMessage>,
    pub theme: ThemeColors,
    pub should_quit: bool,
    /// Folder whose listing is in `store`. Lags `navigator.active()` while a
    /// fetch is in flight.
    listed_folder: FolderId,
    source: Arc<dyn FolderSource>,
    uploader: Arc<dyn Uploader>,
    settle: Duration,
}

impl App {
    /// Create an empty cabinet positioned at the configured initial folder.
    /// Call [`App::load_current`] to populate it.
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn FolderSource>,
        uploader: Arc<dyn Uploader>,
    ) -> Self {
        let initial = FolderId::from(config.initial_folder());
        Self {
            store: CollectionStore::default(),
            navigator: FolderNavigator::new(initial.clone()),
            rename_flows: HashMap::new(),
            actions: ActionState::default(),
            selected_index: 0,
            mode: AppMode::Normal,
            header: HeaderKind::default(),
            loading: false,
            confirm_delete: config.confirm_delete(),
            status_message: None,
            theme: resolve_theme(&config.theme),
            should_quit: false,
            listed_folder: initial,
            source,
            uploader,
            settle: Duration::from_millis(config.settle_ms()),
        }
    }

    // ── Folder navigation ────────────────────────────────────────────────

    /// Fetch the active folder again.
    pub fn load_current(&mut self, tx: &EventSender) {
        let ticket = self.navigator.refresh();
        self.spawn_fetch(ticket, tx);
    }

    /// Make `folder_id` the active folder and fetch its contents.
    pub fn open_folder(&mut self, folder_id: FolderId, tx: &EventSender) {
        tracing::info!(folder = %folder_id, "opening folder");
        let ticket = self.navigator.activate(folder_id);
        self.spawn_fetch(ticket, tx);
    }

    /// Open the selected row if it is a folder. Files have no navigate action.
    pub fn open_selected(&mut self, tx: &EventSender) {
        let folder_id = match self.selected_item() {
            Some(item) if item.is_folder() => item.id.clone(),
            _ => return,
        };
        self.open_folder(folder_id, tx);
    }

    /// Return to the previously active folder.
    pub fn go_back(&mut self, tx: &EventSender) {
        match self.navigator.back() {
            Some(ticket) => {
                tracing::info!(folder = %ticket.folder_id, "going back");
                self.spawn_fetch(ticket, tx);
            }
            None => self.set_status_message("Already at the first folder".into()),
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket, tx: &EventSender) {
        self.loading = true;
        let source = Arc::clone(&self.source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(&ticket.folder_id).await;
            if let Err(e) = tx.send(Event::FolderLoaded { ticket, result }) {
                tracing::debug!(event = ?e.0, "event channel closed, listing discarded");
            }
        });
    }

    /// Install the result of a fetch, unless the user has moved on since.
    pub fn handle_folder_loaded(&mut self, ticket: FetchTicket, result: Result<Vec<Item>>) {
        if !self.navigator.is_current(&ticket) {
            tracing::debug!(folder = %ticket.folder_id, "dropping stale listing");
            return;
        }
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::info!(folder = %ticket.folder_id, count = items.len(), "folder loaded");
                // Pending prompts point at rows of the previous listing
                self.store.replace(items);
                self.listed_folder = ticket.folder_id;
                self.rename_flows.clear();
                self.mode = AppMode::Normal;
                self.selected_index = 0;
            }
            Err(e) => {
                tracing::error!(folder = %ticket.folder_id, error = %e, "fetch failed");
                self.set_error_message(format!("Could not load {}: {}", ticket.folder_id, e));
            }
        }
    }

    // ── Rename ───────────────────────────────────────────────────────────

    /// Open the rename prompt for the selected row.
    pub fn request_rename(&mut self) {
        let Some(id) = self.selected_item().map(|item| item.id.clone()) else {
            return;
        };
        self.rename_flows.entry(id.clone()).or_default().request();
        self.mode = AppMode::Rename { target: id };
    }

    /// Draft of the prompt that currently has focus.
    pub fn rename_draft(&self) -> Option<&Draft> {
        match &self.mode {
            AppMode::Rename { target } => self.rename_flows.get(target)?.draft(),
            _ => None,
        }
    }

    pub fn rename_draft_mut(&mut self) -> Option<&mut Draft> {
        match &self.mode {
            AppMode::Rename { target } => self.rename_flows.get_mut(target)?.draft_mut(),
            _ => None,
        }
    }

    /// Apply the focused draft. Empty or unchanged names are dropped.
    pub fn confirm_rename(&mut self) {
        let AppMode::Rename { target } = std::mem::take(&mut self.mode) else {
            return;
        };
        let Some(flow) = self.rename_flows.get_mut(&target) else {
            return;
        };
        let Some(current) = self.store.get(&target) else {
            flow.cancel();
            tracing::debug!(item = %target, "rename target left the listing");
            return;
        };

        match flow.confirm(&current.name) {
            Ok(name) => {
                self.store.rename(&target, &name);
                tracing::info!(item = %target, name = %name, "renamed");
                self.set_status_message(format!("Renamed to {}", name));
            }
            Err(reason) => {
                tracing::debug!(item = %target, %reason, "rename dropped");
            }
        }
    }

    pub fn cancel_rename(&mut self) {
        if let AppMode::Rename { target } = std::mem::take(&mut self.mode) {
            if let Some(flow) = self.rename_flows.get_mut(&target) {
                flow.cancel();
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────────

    /// Delete the selected row, asking first when configured to.
    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_item().map(|item| item.id.clone()) else {
            return;
        };
        if self.confirm_delete {
            self.mode = AppMode::DeleteConfirm { target: id };
        } else {
            self.delete_item(&id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let AppMode::DeleteConfirm { target } = std::mem::take(&mut self.mode) {
            self.delete_item(&target);
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, AppMode::DeleteConfirm { .. }) {
            self.mode = AppMode::Normal;
        }
    }

    fn delete_item(&mut self, id: &ItemId) {
        let name = self.store.get(id).map(|item| item.name.clone());
        if self.store.remove(id) {
            self.rename_flows.remove(id);
            self.clamp_selection();
            tracing::info!(item = %id, "deleted");
            if let Some(name) = name {
                self.set_status_message(format!("Deleted {}", name));
            }
        }
    }

    // ── Upload ───────────────────────────────────────────────────────────

    /// Upload the selected row. Ignored while that row's upload is running.
    pub fn request_upload(&mut self, tx: &EventSender) {
        let Some((id, version)) = self
            .selected_item()
            .map(|item| (item.id.clone(), next_version(&item.version)))
        else {
            return;
        };
        let folder = self.listed_folder.clone();
        let Some(guard) = self.actions.begin(ActionKind::Upload, &folder, &id) else {
            tracing::debug!(%folder, item = %id, "upload already running");
            return;
        };

        tracing::info!(%folder, item = %id, %version, "upload started");
        let uploader = Arc::clone(&self.uploader);
        let tx = tx.clone();
        let settle = self.settle;
        tokio::spawn(run_settled(guard, settle, move || async move {
            uploader.upload(&id, &version).await?;
            let event = Event::UploadSucceeded {
                folder,
                id,
                version,
            };
            if let Err(e) = tx.send(event) {
                tracing::debug!(event = ?e.0, "event channel closed, version bump discarded");
            }
            Ok::<(), AppError>(())
        }));
    }

    /// Record the new version once the uploader has accepted it. Dropped when
    /// the listing the upload started from has since been replaced by
    /// another folder.
    pub fn handle_upload_succeeded(&mut self, folder: &FolderId, id: ItemId, version: String) {
        if folder != &self.listed_folder {
            tracing::debug!(%folder, item = %id, "version bump for a folder no longer listed");
            return;
        }
        if self.store.bump_version(&id, &version) {
            tracing::info!(%folder, item = %id, %version, "version bumped");
        }
    }

    /// Whether the row `id` of the current listing has an upload running.
    pub fn is_uploading(&self, id: &ItemId) -> bool {
        self.actions.is_busy(ActionKind::Upload, &self.listed_folder, id)
    }

    pub fn listed_folder(&self) -> &FolderId {
        &self.listed_folder
    }

    // ── Selection ────────────────────────────────────────────────────────

    pub fn selected_item(&self) -> Option<&Item> {
        self.store.items().get(self.selected_index)
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up by one item.
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.store.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ── Misc ─────────────────────────────────────────────────────────────

    pub fn set_header(&mut self, header: HeaderKind) {
        self.header = header;
    }

    pub fn set_status_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    pub fn set_error_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(msg) = &self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Periodic housekeeping.
    pub fn tick(&mut self) {
        self.clear_expired_status();
        self.actions.prune();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cabinet::item::fixtures::{file, folder};
    use crate::config::UploadConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingSource {
        listings: HashMap<FolderId, Vec<Item>>,
        calls: Mutex<Vec<FolderId>>,
    }

    impl RecordingSource {
        fn with(listings: Vec<(&str, Vec<Item>)>) -> Arc<Self> {
            Arc::new(Self {
                listings: listings
                    .into_iter()
                    .map(|(id, items)| (FolderId::from(id), items))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<FolderId> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FolderSource for RecordingSource {
        async fn fetch(&self, folder_id: &FolderId) -> Result<Vec<Item>> {
            self.calls.lock().unwrap().push(folder_id.clone());
            self.listings
                .get(folder_id)
                .cloned()
                .ok_or_else(|| AppError::FolderNotFound(folder_id.to_string()))
        }
    }

    struct TestUploader {
        fail: bool,
    }

    #[async_trait]
    impl Uploader for TestUploader {
        async fn upload(&self, _id: &ItemId, _version: &str) -> Result<()> {
            if self.fail {
                Err(AppError::Upload("rejected".into()))
            } else {
                Ok(())
            }
        }
    }

    const SETTLE_MS: u64 = 2000;

    fn root_listing() -> Vec<Item> {
        vec![
            file("1", "a.txt"),
            folder("2", "b"),
            file("3", "c.pdf"),
        ]
    }

    fn setup_with(
        source: Arc<RecordingSource>,
        fail_uploads: bool,
    ) -> (App, EventSender, mpsc::UnboundedReceiver<Event>) {
        let config = AppConfig {
            upload: UploadConfig {
                settle_ms: Some(SETTLE_MS),
                ..Default::default()
            },
            ..Default::default()
        };
        let uploader = Arc::new(TestUploader { fail: fail_uploads });
        let app = App::new(&config, source, uploader);
        let (tx, rx) = mpsc::unbounded_channel();
        (app, tx, rx)
    }

    fn setup() -> (App, EventSender, mpsc::UnboundedReceiver<Event>) {
        let source = RecordingSource::with(vec![("root", root_listing())]);
        let (mut app, tx, rx) = setup_with(source, false);
        app.store.replace(root_listing());
        (app, tx, rx)
    }

    async fn deliver_next(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Event>) {
        match rx.recv().await.expect("event") {
            Event::FolderLoaded { ticket, result } => app.handle_folder_loaded(ticket, result),
            Event::UploadSucceeded {
                folder,
                id,
                version,
            } => app.handle_upload_succeeded(&folder, id, version),
            other => panic!("unexpected event {:?}", other),
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.store.items().iter().map(|i| i.name.clone()).collect()
    }

    fn type_draft(app: &mut App, text: &str) {
        let draft = app.rename_draft_mut().expect("rename prompt open");
        for c in text.chars() {
            draft.insert_char(c);
        }
    }

    // ── Navigation ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn initial_load_fetches_configured_folder() {
        let source = RecordingSource::with(vec![("root", root_listing())]);
        let (mut app, tx, mut rx) = setup_with(source.clone(), false);

        app.load_current(&tx);
        assert!(app.loading);
        deliver_next(&mut app, &mut rx).await;

        assert!(!app.loading);
        assert_eq!(source.calls(), vec![FolderId::from("root")]);
        assert_eq!(names(&app), vec!["a.txt", "b", "c.pdf"]);
    }

    #[tokio::test]
    async fn activating_folder_fetches_once_and_installs_result() {
        let sub = vec![file("7", "inner.txt")];
        let source = RecordingSource::with(vec![("root", root_listing()), ("2", sub.clone())]);
        let (mut app, tx, mut rx) = setup_with(source.clone(), false);
        app.store.replace(root_listing());

        app.selected_index = 1;
        app.open_selected(&tx);
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(source.calls(), vec![FolderId::from("2")]);
        assert_eq!(app.navigator.active(), &FolderId::from("2"));
        assert_eq!(app.store.items(), sub.as_slice());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_folder_installs_empty_listing() {
        let source = RecordingSource::with(vec![("empty", Vec::new())]);
        let (mut app, tx, mut rx) = setup_with(source.clone(), false);
        app.store.replace(root_listing());

        app.open_folder(FolderId::from("empty"), &tx);
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(source.calls(), vec![FolderId::from("empty")]);
        assert!(app.store.is_empty());
        assert!(app.selected_item().is_none());
    }

    #[tokio::test]
    async fn open_selected_ignores_files() {
        let source = RecordingSource::with(vec![]);
        let (mut app, tx, mut rx) = setup_with(source.clone(), false);
        app.store.replace(root_listing());

        app.selected_index = 0;
        app.open_selected(&tx);

        assert!(source.calls().is_empty());
        assert!(rx.try_recv().is_err());
        assert_eq!(app.navigator.active(), &FolderId::from("root"));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_listing() {
        let source = RecordingSource::with(vec![]);
        let (mut app, tx, mut rx) = setup_with(source, false);
        app.store.replace(root_listing());

        app.open_folder(FolderId::from("missing"), &tx);
        deliver_next(&mut app, &mut rx).await;

        assert!(!app.loading);
        assert_eq!(names(&app), vec!["a.txt", "b", "c.pdf"]);
        let msg = app.status_message.as_ref().expect("error shown");
        assert!(msg.is_error);
        assert!(msg.text.contains("missing"));
    }

    #[test]
    fn stale_listing_is_dropped() {
        let source = RecordingSource::with(vec![]);
        let (mut app, _tx, _rx) = setup_with(source, false);
        app.store.replace(root_listing());

        let stale = app.navigator.activate(FolderId::from("a"));
        let _current = app.navigator.activate(FolderId::from("b"));
        app.handle_folder_loaded(stale, Ok(vec![file("9", "late.txt")]));

        assert_eq!(names(&app), vec!["a.txt", "b", "c.pdf"]);
    }

    #[tokio::test]
    async fn go_back_refetches_previous_folder() {
        let source = RecordingSource::with(vec![
            ("root", root_listing()),
            ("2", vec![file("7", "inner.txt")]),
        ]);
        let (mut app, tx, mut rx) = setup_with(source.clone(), false);

        app.open_folder(FolderId::from("2"), &tx);
        deliver_next(&mut app, &mut rx).await;
        app.go_back(&tx);
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(app.navigator.active(), &FolderId::from("root"));
        assert_eq!(
            source.calls(),
            vec![FolderId::from("2"), FolderId::from("root")]
        );
        assert_eq!(names(&app), vec!["a.txt", "b", "c.pdf"]);
    }

    fn sub_listing() -> Vec<Item> {
        vec![file("1", "sub-file.txt")]
    }

    #[tokio::test]
    async fn rename_prompt_is_dropped_when_another_folder_loads() {
        let source = RecordingSource::with(vec![("sub", sub_listing())]);
        let (mut app, tx, mut rx) = setup_with(source, false);
        app.store.replace(root_listing());

        app.open_folder(FolderId::from("sub"), &tx);
        app.request_rename();
        type_draft(&mut app, "renamed.txt");
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.rename_flows.is_empty());
        app.confirm_rename();
        assert_eq!(names(&app), vec!["sub-file.txt"]);
    }

    #[tokio::test]
    async fn delete_confirmation_is_dropped_when_another_folder_loads() {
        let source = RecordingSource::with(vec![("sub", sub_listing())]);
        let (mut app, tx, mut rx) = setup_with(source, false);
        app.store.replace(root_listing());
        app.confirm_delete = true;

        app.open_folder(FolderId::from("sub"), &tx);
        app.request_delete();
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(app.mode, AppMode::Normal);
        app.confirm_delete();
        assert_eq!(names(&app), vec!["sub-file.txt"]);
    }

    #[test]
    fn go_back_at_start_shows_message() {
        let (mut app, tx, mut rx) = setup();
        app.go_back(&tx);
        assert!(app.status_message.is_some());
        assert!(rx.try_recv().is_err());
    }

    // ── Rename ───────────────────────────────────────────────────────────

    #[test]
    fn rename_scenario_changes_only_target() {
        let (mut app, _tx, _rx) = setup();
        let before = app.store.items().to_vec();

        app.request_rename();
        assert_eq!(app.mode, AppMode::Rename { target: ItemId::from("1") });
        assert_eq!(app.rename_draft().unwrap().input, "");
        type_draft(&mut app, "a2.txt");
        app.confirm_rename();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(names(&app), vec!["a2.txt", "b", "c.pdf"]);
        assert_eq!(app.store.items()[1], before[1]);
        assert_eq!(app.store.items()[0].version, before[0].version);
    }

    #[test]
    fn rename_with_empty_draft_is_ignored() {
        let (mut app, _tx, _rx) = setup();
        let before = app.store.items().to_vec();
        app.request_rename();
        app.confirm_rename();
        assert_eq!(app.store.items(), before.as_slice());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn rename_to_same_name_is_ignored() {
        let (mut app, _tx, _rx) = setup();
        let before = app.store.snapshot();
        app.request_rename();
        type_draft(&mut app, "a.txt");
        app.confirm_rename();
        assert_eq!(app.store.items(), before.as_slice());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn cancel_rename_discards_draft() {
        let (mut app, _tx, _rx) = setup();
        app.request_rename();
        type_draft(&mut app, "zzz");
        app.cancel_rename();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(names(&app), vec!["a.txt", "b", "c.pdf"]);

        app.request_rename();
        assert_eq!(app.rename_draft().unwrap().input, "");
    }

    #[test]
    fn rename_flows_are_independent_per_row() {
        let (mut app, _tx, _rx) = setup();
        app.request_rename();
        type_draft(&mut app, "first");
        app.mode = AppMode::Normal;

        app.select_next();
        app.request_rename();
        type_draft(&mut app, "second");
        app.confirm_rename();

        assert!(app.rename_flows[&ItemId::from("1")].is_open());
        assert_eq!(names(&app), vec!["a.txt", "second", "c.pdf"]);
    }

    #[test]
    fn rename_after_target_deleted_is_noop() {
        let (mut app, _tx, _rx) = setup();
        app.request_rename();
        type_draft(&mut app, "ghost");
        app.store.remove(&ItemId::from("1"));
        app.confirm_rename();
        assert_eq!(names(&app), vec!["b", "c.pdf"]);
        assert_eq!(app.mode, AppMode::Normal);
    }

    // ── Delete ───────────────────────────────────────────────────────────

    #[test]
    fn delete_removes_selected_immediately() {
        let (mut app, _tx, _rx) = setup();
        app.select_last();
        app.request_delete();
        assert_eq!(names(&app), vec!["a.txt", "b"]);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn delete_with_confirmation() {
        let (mut app, _tx, _rx) = setup();
        app.confirm_delete = true;

        app.request_delete();
        assert_eq!(app.mode, AppMode::DeleteConfirm { target: ItemId::from("1") });
        assert_eq!(app.store.len(), 3);
        app.cancel_delete();
        assert_eq!(app.store.len(), 3);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(names(&app), vec!["b", "c.pdf"]);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn delete_on_empty_listing_is_noop() {
        let (mut app, _tx, _rx) = setup();
        app.store.replace(Vec::new());
        app.request_delete();
        assert!(app.store.is_empty());
        assert_eq!(app.selected_index, 0);
    }

    // ── Upload ───────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn upload_bumps_version_and_settles() {
        let (mut app, tx, mut rx) = setup();
        let one = ItemId::from("1");

        app.request_upload(&tx);
        assert!(app.is_uploading(&one));

        deliver_next(&mut app, &mut rx).await;
        assert_eq!(app.store.get(&one).unwrap().version, "1.1");
        assert!(app.is_uploading(&one));

        tokio::time::sleep(Duration::from_millis(SETTLE_MS + 1)).await;
        assert!(!app.is_uploading(&one));
    }

    #[tokio::test(start_paused = true)]
    async fn uploads_on_different_rows_are_independent() {
        let (mut app, tx, _rx) = setup();
        let one = ItemId::from("1");
        let two = ItemId::from("2");

        app.request_upload(&tx);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        app.select_next();
        app.request_upload(&tx);
        assert!(app.is_uploading(&one));
        assert!(app.is_uploading(&two));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!app.is_uploading(&one));
        assert!(app.is_uploading(&two));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!app.is_uploading(&two));
    }

    #[tokio::test(start_paused = true)]
    async fn second_upload_while_busy_is_ignored() {
        let (mut app, tx, mut rx) = setup();
        app.request_upload(&tx);
        app.request_upload(&tx);

        deliver_next(&mut app, &mut rx).await;
        tokio::time::sleep(Duration::from_millis(SETTLE_MS + 1)).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(app.store.items()[0].version, "1.1");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_upload_clears_busy_without_bump() {
        let source = RecordingSource::with(vec![]);
        let (mut app, tx, mut rx) = setup_with(source, true);
        app.store.replace(root_listing());
        let one = ItemId::from("1");

        app.request_upload(&tx);
        assert!(app.is_uploading(&one));
        tokio::time::sleep(Duration::from_millis(SETTLE_MS + 1)).await;

        assert!(!app.is_uploading(&one));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.store.get(&one).unwrap().version, "1.0");
    }

    #[tokio::test(start_paused = true)]
    async fn upload_success_after_folder_change_is_dropped() {
        let (mut app, tx, mut rx) = setup();
        let one = ItemId::from("1");

        app.request_upload(&tx);
        let ticket = app.navigator.activate(FolderId::from("sub"));
        app.handle_folder_loaded(ticket, Ok(sub_listing()));
        assert_eq!(app.listed_folder(), &FolderId::from("sub"));
        assert!(!app.is_uploading(&one));
        assert_eq!(app.actions.busy_count(), 1);

        deliver_next(&mut app, &mut rx).await;
        assert_eq!(app.store.get(&one).unwrap().version, "1.0");

        // Back in the original folder the row is still busy
        let ticket = app.navigator.back().unwrap();
        app.handle_folder_loaded(ticket, Ok(root_listing()));
        assert!(app.is_uploading(&one));

        tokio::time::sleep(Duration::from_millis(SETTLE_MS + 1)).await;
        assert!(!app.is_uploading(&one));
    }

    #[tokio::test(start_paused = true)]
    async fn upload_success_during_fetch_still_bumps_listed_row() {
        let (mut app, tx, mut rx) = setup();
        let one = ItemId::from("1");

        app.request_upload(&tx);
        let _pending = app.navigator.activate(FolderId::from("sub"));
        deliver_next(&mut app, &mut rx).await;

        assert_eq!(app.store.get(&one).unwrap().version, "1.1");
    }

    #[tokio::test(start_paused = true)]
    async fn closed_event_channel_still_settles_upload() {
        let (mut app, tx, rx) = setup();
        drop(rx);
        let one = ItemId::from("1");

        app.request_upload(&tx);
        app.load_current(&tx);
        tokio::time::sleep(Duration::from_millis(SETTLE_MS + 1)).await;

        assert!(!app.is_uploading(&one));
        assert_eq!(app.store.get(&one).unwrap().version, "1.0");
        assert!(app.status_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn upload_finishing_after_delete_is_noop() {
        let (mut app, tx, mut rx) = setup();
        app.request_upload(&tx);
        app.request_delete();

        deliver_next(&mut app, &mut rx).await;
        assert_eq!(names(&app), vec!["b", "c.pdf"]);
        assert!(app.store.items().iter().all(|i| i.version == "1.0"));
    }

    // ── Selection and misc ───────────────────────────────────────────────

    #[test]
    fn selection_clamps_at_bounds() {
        let (mut app, _tx, _rx) = setup();
        app.select_previous();
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_index, 2);
        app.select_next();
        assert_eq!(app.selected_index, 2);
        app.select_first();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn header_switches() {
        let (mut app, _tx, _rx) = setup();
        assert_eq!(app.header, HeaderKind::A);
        app.set_header(HeaderKind::C);
        assert_eq!(app.header.label(), "Header Type C");
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let (mut app, _tx, _rx) = setup();
        app.set_status_message("fresh".into());
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        app.status_message.as_mut().unwrap().created = Instant::now() - Duration::from_secs(5);
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn quit_sets_flag() {
        let (mut app, _tx, _rx) = setup();
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }
}
