use tracing::debug;

use crate::command::Command;
use crate::error::Result;
use crate::render::{build_lines, visible_lines, ViewLine};
use crate::tree::FileTree;

/// Cursor, scroll offset and viewport over one [`FileTree`].
///
/// After every transition `offset <= position`, and when the viewport has
/// any height, `position < offset + height`.
pub struct NavState {
    tree: FileTree,
    position: usize,
    offset: usize,
    width: usize,
    height: usize,
}

impl NavState {
    pub fn new(tree: FileTree, width: usize, height: usize) -> Self {
        let mut state = Self {
            tree,
            position: 0,
            offset: 0,
            width,
            height,
        };
        state.adjust();
        state
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Viewport as (width, height).
    pub fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn move_up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.adjust();
    }

    pub fn move_down(&mut self) {
        if self.position + 1 < self.tree.visible_len() {
            self.position += 1;
        }
        self.adjust();
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.adjust();
    }

    /// Open or close the directory under the cursor. Files are ignored.
    ///
    /// On error nothing changes. Closing a directory can shrink the listing,
    /// so the cursor is pulled back onto the last visible row if needed.
    pub fn toggle_selection(&mut self) -> Result<()> {
        let id = self.tree.get(self.position)?;
        if self.tree.entry(id).is_dir() {
            self.tree.toggle(id)?;
            let last = self.tree.visible_len().saturating_sub(1);
            self.position = self.position.min(last);
        }
        self.adjust();
        Ok(())
    }

    /// Apply one navigation command. `Quit` belongs to the caller.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        debug!(?command, position = self.position, "apply command");
        match command {
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Resize { width, height } => self.resize(width, height),
            Command::ToggleSelection => self.toggle_selection()?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Display lines starting at the first scrolled-in row.
    pub fn view(&self) -> Vec<ViewLine> {
        let lines = build_lines(&self.tree, self.position);
        visible_lines(&lines, self.offset).to_vec()
    }

    fn adjust(&mut self) {
        if self.position < self.offset {
            self.offset = self.position;
        } else if self.height > 0 && self.position - self.offset >= self.height {
            self.offset = self.position + 1 - self.height;
        }
    }
}
