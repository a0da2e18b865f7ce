use indextree::{Arena, NodeId};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Open/closed bookkeeping for a directory node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirState {
    open: bool,
    /// Children have been read from disk and live in the arena.
    loaded: bool,
    show_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory(DirState),
}

/// A node in the lazily-read directory tree
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    path: PathBuf,
    depth: usize,
    kind: EntryKind,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Distance from the root (root = 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(DirState { open: true, .. }))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(DirState { loaded: true, .. }))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One item of a directory listing, before it becomes a node.
struct Listed {
    /// Raw on-disk name; paths and ordering use this.
    file_name: OsString,
    /// Lossy form, for display only.
    name: String,
    is_dir: bool,
}

/// Directory tree whose directories are read on first open.
///
/// Every directory exclusively owns its children (they are its arena
/// children); nothing below ever walks upward.
pub struct FileTree {
    arena: Arena<Entry>,
    root: NodeId,
}

impl FileTree {
    /// Resolve `path` and build an already-open root for it.
    pub fn open_root<P: AsRef<Path>>(path: P, show_hidden: bool) -> Result<Self> {
        let path = path.as_ref();
        let root_path = fs::canonicalize(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.display().to_string());

        let mut arena = Arena::new();
        let root = arena.new_node(Entry {
            name,
            path: root_path,
            depth: 0,
            kind: EntryKind::Directory(DirState {
                open: false,
                loaded: false,
                show_hidden,
            }),
        });

        let mut tree = Self { arena, root };
        tree.open(root)?;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn entry(&self, id: NodeId) -> &Entry {
        self.arena[id].get()
    }

    /// Children in display order. Empty for files and unread directories.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Open a directory, reading it from disk the first time.
    ///
    /// On a failed read the directory keeps its previous state and caches
    /// nothing. Files are left alone.
    pub fn open(&mut self, id: NodeId) -> Result<()> {
        let EntryKind::Directory(state) = self.entry(id).kind else {
            return Ok(());
        };
        if state.open {
            return Ok(());
        }
        if !state.loaded {
            self.load(id, state.show_hidden)?;
        }
        self.set_open(id, true);
        Ok(())
    }

    /// Hide a directory's children; the cached listing is kept for reopening.
    pub fn close(&mut self, id: NodeId) {
        if self.entry(id).is_open() {
            self.set_open(id, false);
        }
    }

    pub fn toggle(&mut self, id: NodeId) -> Result<()> {
        if self.entry(id).is_open() {
            self.close(id);
            Ok(())
        } else {
            self.open(id)
        }
    }

    /// Number of entries a full open-aware traversal from `id` visits.
    pub fn size(&self, id: NodeId) -> usize {
        let mut count = 0;
        let _ = self.traverse(id, &mut |_, _| {
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        count
    }

    /// Depth-first pre-order walk that only descends into open directories.
    ///
    /// Breaking out of `visit` stops the whole walk and hands the value back.
    pub fn traverse<B>(
        &self,
        id: NodeId,
        visit: &mut impl FnMut(NodeId, &Entry) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let entry = self.entry(id);
        visit(id, entry)?;
        if entry.is_open() {
            for child in id.children(&self.arena) {
                self.traverse(child, visit)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn set_open(&mut self, id: NodeId, open: bool) {
        if let EntryKind::Directory(state) = &mut self.arena[id].get_mut().kind {
            state.open = open;
        }
        debug!(path = %self.entry(id).path.display(), open, "toggled directory");
    }

    fn load(&mut self, id: NodeId, show_hidden: bool) -> Result<()> {
        let (parent_path, depth) = {
            let entry = self.entry(id);
            (entry.path.clone(), entry.depth + 1)
        };

        let mut listing = read_listing(&parent_path, show_hidden)?;
        listing.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        debug!(path = %parent_path.display(), entries = listing.len(), "read directory");

        for item in listing {
            let kind = if item.is_dir {
                EntryKind::Directory(DirState {
                    open: false,
                    loaded: false,
                    show_hidden,
                })
            } else {
                EntryKind::File
            };
            let child = self.arena.new_node(Entry {
                path: parent_path.join(&item.file_name),
                name: item.name,
                depth,
                kind,
            });
            id.append(child, &mut self.arena);
        }

        if let EntryKind::Directory(state) = &mut self.arena[id].get_mut().kind {
            state.loaded = true;
        }
        Ok(())
    }
}

/// Read one directory level. Any failure, including one on a single item,
/// fails the whole listing.
fn read_listing(path: &Path, show_hidden: bool) -> Result<Vec<Listed>> {
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut listing = Vec::new();
    for dir_entry in fs::read_dir(path).map_err(read_error)? {
        let dir_entry = dir_entry.map_err(read_error)?;
        let file_name = dir_entry.file_name();
        let name = file_name.to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let is_dir = dir_entry.file_type().map_err(read_error)?.is_dir();
        listing.push(Listed {
            file_name,
            name,
            is_dir,
        });
    }
    Ok(listing)
}
