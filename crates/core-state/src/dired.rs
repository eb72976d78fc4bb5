//! Directory tree over buffer names.
//!
//! Buffer names are slash-separated paths; the tree groups them for the
//! sidebar. Directories remember whether they are expanded, and the visible
//! entries are produced in render order so a selection index maps straight
//! back onto the entry it addresses.

use core_doc::Buffer;

#[derive(Debug, Default)]
pub struct DirTree {
    name: String,
    open: bool,
    subdirs: Vec<DirTree>,
    /// Buffer indices whose names bottom out in this directory.
    files: Vec<usize>,
}

/// One visible sidebar entry, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirEntry<'a> {
    /// A directory at the given nesting depth; `path` addresses it for
    /// [`DirTree::toggle`].
    Dir {
        name: &'a str,
        depth: usize,
        open: bool,
    },
    /// A buffer, by index into the state's buffer list.
    File { buf: usize, depth: usize },
}

impl DirTree {
    /// Rebuild the tree from buffer names. Previously expanded directories
    /// that still exist stay expanded.
    pub fn build(bufs: &[Buffer], previous: Option<&DirTree>) -> DirTree {
        let mut root = DirTree {
            open: true,
            ..DirTree::default()
        };
        for (idx, buf) in bufs.iter().enumerate() {
            root.insert(idx, buf.name());
        }
        root.sort(bufs);
        if let Some(prev) = previous {
            root.restore_open(prev);
        }
        root
    }

    fn insert(&mut self, idx: usize, partial: &str) {
        match partial.split_once('/') {
            None => self.files.push(idx),
            Some((dir, rest)) => {
                if let Some(sub) = self.subdirs.iter_mut().find(|d| d.name == dir) {
                    sub.insert(idx, rest);
                    return;
                }
                let mut sub = DirTree {
                    name: dir.to_string(),
                    ..DirTree::default()
                };
                sub.insert(idx, rest);
                self.subdirs.push(sub);
            }
        }
    }

    fn sort(&mut self, bufs: &[Buffer]) {
        for sub in &mut self.subdirs {
            sub.sort(bufs);
        }
        self.subdirs.sort_by(|a, b| a.name.cmp(&b.name));
        self.files.sort_by(|a, b| bufs[*a].name().cmp(bufs[*b].name()));
    }

    fn restore_open(&mut self, previous: &DirTree) {
        for sub in &mut self.subdirs {
            if let Some(prev) = previous.subdirs.iter().find(|d| d.name == sub.name) {
                sub.open = prev.open;
                sub.restore_open(prev);
            }
        }
    }

    /// Flatten the tree into its visible entries: each subdirectory (its
    /// contents only when expanded), then this directory's files.
    pub fn visible(&self) -> Vec<DirEntry<'_>> {
        let mut out = Vec::new();
        self.walk(0, &mut out);
        out
    }

    fn walk<'a>(&'a self, depth: usize, out: &mut Vec<DirEntry<'a>>) {
        for sub in &self.subdirs {
            out.push(DirEntry::Dir {
                name: &sub.name,
                depth,
                open: sub.open,
            });
            if sub.open {
                sub.walk(depth + 1, out);
            }
        }
        for &buf in &self.files {
            out.push(DirEntry::File { buf, depth });
        }
    }

    /// Toggle the expansion of the directory at the given visible position.
    /// Returns false when the position is not a directory.
    pub fn toggle(&mut self, pos: usize) -> bool {
        let mut cursor = 0usize;
        self.toggle_walk(pos, &mut cursor)
    }

    fn toggle_walk(&mut self, pos: usize, cursor: &mut usize) -> bool {
        for sub in &mut self.subdirs {
            if *cursor == pos {
                sub.open = !sub.open;
                return true;
            }
            *cursor += 1;
            if sub.open && sub.toggle_walk(pos, cursor) {
                return true;
            }
        }
        *cursor += self.files.len();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bufs(names: &[&str]) -> Vec<Buffer> {
        names.iter().map(|n| Buffer::new(*n)).collect()
    }

    #[test]
    fn groups_and_sorts_by_path() {
        let bufs = bufs(&["notes/b", "a", "notes/a", "drafts/x"]);
        let tree = DirTree::build(&bufs, None);
        let entries = tree.visible();
        // Collapsed directories first (sorted), then root files.
        assert_eq!(
            entries,
            vec![
                DirEntry::Dir {
                    name: "drafts",
                    depth: 0,
                    open: false
                },
                DirEntry::Dir {
                    name: "notes",
                    depth: 0,
                    open: false
                },
                DirEntry::File { buf: 1, depth: 0 },
            ]
        );
    }

    #[test]
    fn expanded_directory_shows_sorted_children() {
        let bufs = bufs(&["notes/b", "notes/a"]);
        let mut tree = DirTree::build(&bufs, None);
        assert!(tree.toggle(0));
        let entries = tree.visible();
        assert_eq!(
            entries,
            vec![
                DirEntry::Dir {
                    name: "notes",
                    depth: 0,
                    open: true
                },
                DirEntry::File { buf: 1, depth: 1 },
                DirEntry::File { buf: 0, depth: 1 },
            ]
        );
    }

    #[test]
    fn rebuild_preserves_open_state() {
        let mut names = bufs(&["notes/a"]);
        let mut tree = DirTree::build(&names, None);
        tree.toggle(0);
        names.push(Buffer::new("notes/b"));
        let tree = DirTree::build(&names, Some(&tree));
        let entries = tree.visible();
        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0], DirEntry::Dir { open: true, .. }));
    }

    #[test]
    fn toggle_on_file_position_is_rejected() {
        let bufs = bufs(&["plain"]);
        let mut tree = DirTree::build(&bufs, None);
        assert!(!tree.toggle(0));
    }
}
