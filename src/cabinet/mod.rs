//! Collection state for the file cabinet: the item list of the active
//! folder, folder navigation, rename prompts, and per-item busy flags.
//!
//! Nothing in here knows about the terminal.

pub mod action;
pub mod item;
pub mod navigator;
pub mod rename;
pub mod store;

pub use action::{run_settled, ActionKind, ActionState, BusyGuard};
pub use item::{next_version, FolderId, Item, ItemId, ItemKind, ItemName};
pub use navigator::{FetchTicket, FolderNavigator};
pub use rename::{Draft, RenameFlow};
pub use store::CollectionStore;
