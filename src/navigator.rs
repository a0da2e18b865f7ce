//! Positional view over the currently visible part of a [`FileTree`].
//!
//! Nothing here is cached: every call walks the tree again, which is fine
//! for trees a person scrolls through by hand.

use indextree::NodeId;
use std::ops::ControlFlow;

use crate::error::{Error, Result};
use crate::tree::FileTree;

impl FileTree {
    /// Every visible entry in traversal order; the root is always first.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        let _ = self.traverse(self.root(), &mut |id, _| {
            visible.push(id);
            ControlFlow::<()>::Continue(())
        });
        visible
    }

    /// Entry at `index` in the flattened listing.
    pub fn get(&self, index: usize) -> Result<NodeId> {
        let mut seen = 0;
        let found = self.traverse(self.root(), &mut |id, _| {
            if seen == index {
                return ControlFlow::Break(id);
            }
            seen += 1;
            ControlFlow::Continue(())
        });

        match found {
            ControlFlow::Break(id) => Ok(id),
            ControlFlow::Continue(()) => Err(Error::NotFound { index, len: seen }),
        }
    }

    /// Number of visible entries, root included.
    pub fn visible_len(&self) -> usize {
        self.size(self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::sample_tree;

    fn name_at(tree: &FileTree, index: usize) -> String {
        tree.entry(tree.get(index).unwrap()).name().to_string()
    }

    #[test]
    fn test_get_root_is_first() {
        let dir = sample_tree();
        let tree = FileTree::open_root(dir.path(), false).unwrap();
        assert_eq!(tree.get(0).unwrap(), tree.root());
    }

    #[test]
    fn test_get_found() {
        let dir = sample_tree();
        let tree = FileTree::open_root(dir.path(), false).unwrap();
        assert_eq!(name_at(&tree, 1), "a");
        assert_eq!(name_at(&tree, 3), "sample2.txt");
    }

    #[test]
    fn test_get_not_found() {
        let dir = sample_tree();
        let tree = FileTree::open_root(dir.path(), false).unwrap();

        let err = tree.get(4).unwrap_err();
        assert!(matches!(err, Error::NotFound { index: 4, len: 4 }));
        assert!(tree.get(usize::MAX).is_err());
    }

    #[test]
    fn test_get_after_open() {
        let dir = sample_tree();
        let mut tree = FileTree::open_root(dir.path(), false).unwrap();
        let a = tree.get(1).unwrap();
        tree.open(a).unwrap();

        assert_eq!(name_at(&tree, 3), "c");
        assert_eq!(name_at(&tree, 4), "sample3.txt");
        assert_eq!(name_at(&tree, 6), "sample2.txt");
        assert!(tree.get(7).is_err());
    }

    #[test]
    fn test_flatten_agrees_with_get_and_size() {
        let dir = sample_tree();
        let mut tree = FileTree::open_root(dir.path(), false).unwrap();
        tree.open(tree.get(1).unwrap()).unwrap();
        tree.open(tree.get(2).unwrap()).unwrap();

        let visible = tree.flatten();
        assert_eq!(visible.len(), tree.visible_len());
        assert_eq!(visible.len(), 9);
        for (index, id) in visible.iter().enumerate() {
            assert_eq!(tree.get(index).unwrap(), *id);
        }

        let depths: Vec<usize> = visible.iter().map(|&id| tree.entry(id).depth()).collect();
        assert_eq!(depths, [0, 1, 2, 3, 3, 2, 2, 1, 1]);
    }
}
