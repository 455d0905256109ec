use super::item::ItemName;
use crate::error::ValidationError;

/// Text being typed into the rename prompt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub input: String,
    /// Byte offset of the cursor in `input`, always on a char boundary.
    pub cursor_position: usize,
}

impl Draft {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn end(&mut self) {
        self.cursor_position = self.input.len();
    }
}

/// Confirm/cancel state machine gating a name change for one row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum RenameFlow {
    #[default]
    Closed,
    Open(Draft),
}

impl RenameFlow {
    pub fn is_open(&self) -> bool {
        matches!(self, RenameFlow::Open(_))
    }

    /// Open the prompt. The draft starts empty, not with the current name.
    pub fn request(&mut self) {
        *self = RenameFlow::Open(Draft::default());
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            RenameFlow::Open(draft) => Some(draft),
            RenameFlow::Closed => None,
        }
    }

    /// Mutable access to the draft while the prompt is open.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            RenameFlow::Open(draft) => Some(draft),
            RenameFlow::Closed => None,
        }
    }

    /// Close the prompt, discarding the draft.
    pub fn cancel(&mut self) {
        *self = RenameFlow::Closed;
    }

    /// Close the prompt and validate the draft against `current_name`.
    ///
    /// Only a non-empty draft that differs from the current name comes back
    /// as `Ok`. Confirming a closed flow counts as an empty draft.
    pub fn confirm(&mut self, current_name: &str) -> Result<ItemName, ValidationError> {
        let draft = match std::mem::take(self) {
            RenameFlow::Open(draft) => draft.input,
            RenameFlow::Closed => String::new(),
        };
        let name = ItemName::parse(draft)?;
        if name.as_str() == current_name {
            return Err(ValidationError::Unchanged);
        }
        Ok(name)
    }
}
