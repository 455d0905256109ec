use super::item::FolderId;

/// Identifies one fetch issued for an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub folder_id: FolderId,
    pub generation: u64,
}

/// Tracks the active folder.
#[derive(Debug)]
pub struct FolderNavigator {
    active: FolderId,
    generation: u64,
    history: Vec<FolderId>,
}

impl FolderNavigator {
    pub fn new(initial: FolderId) -> Self {
        Self {
            active: initial,
            generation: 0,
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> &FolderId {
        &self.active
    }

    /// Ticket for the active folder without changing it (initial load, reload).
    pub fn refresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.ticket()
    }

    /// Make `folder_id` the active folder. No check is made that it exists;
    /// the fetch decides that.
    pub fn activate(&mut self, folder_id: FolderId) -> FetchTicket {
        let previous = std::mem::replace(&mut self.active, folder_id);
        self.history.push(previous);
        self.refresh()
    }

    /// Return to the folder that was active before the last activation.
    pub fn back(&mut self) -> Option<FetchTicket> {
        let previous = self.history.pop()?;
        self.active = previous;
        Some(self.refresh())
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether a fetch result for `ticket` still belongs to the active folder.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && ticket.folder_id == self.active
    }

    fn ticket(&self) -> FetchTicket {
        FetchTicket {
            folder_id: self.active.clone(),
            generation: self.generation,
        }
    }
}
