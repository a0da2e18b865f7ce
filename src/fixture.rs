//! On-disk tree shared by the unit tests:
//!
//! ```text
//! root
//! ├── a
//! │   ├── b
//! │   │   ├── sample4.txt
//! │   │   └── sample5.txt
//! │   ├── c
//! │   │   └── sample6.txt
//! │   └── sample3.txt
//! ├── sample1.txt
//! └── sample2.txt
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::create_dir_all(root.join("a/c")).unwrap();
    touch(&root.join("a/b/sample4.txt"));
    touch(&root.join("a/b/sample5.txt"));
    touch(&root.join("a/c/sample6.txt"));
    touch(&root.join("a/sample3.txt"));
    touch(&root.join("sample1.txt"));
    touch(&root.join("sample2.txt"));

    dir
}

/// Same tree plus dot-prefixed entries at the top level and inside `a`.
pub fn sample_tree_with_hidden() -> TempDir {
    let dir = sample_tree();
    let root = dir.path();

    fs::create_dir_all(root.join(".config")).unwrap();
    touch(&root.join(".env"));
    touch(&root.join("a/.keep"));

    dir
}

pub fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}
