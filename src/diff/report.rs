use super::FileChange;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// The five change categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// File appeared
    Added,
    /// File disappeared
    Deleted,
    /// File moved to another directory
    Moved,
    /// File name changed
    Renamed,
    /// Modification time changed
    Modified,
}

impl ChangeKind {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Added,
        Self::Deleted,
        Self::Moved,
        Self::Renamed,
        Self::Modified,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Deleted => "Deleted",
            Self::Moved => "Moved",
            Self::Renamed => "Renamed",
            Self::Modified => "Modified",
        }
    }

    /// Single-character code used by the short report format.
    #[must_use]
    pub const fn status_char(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Moved => 'V',
            Self::Renamed => 'R',
            Self::Modified => 'M',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A path that changed location: `from => to`.
///
/// For moves `to` is the new directory, for renames the new file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Relocation {
    /// Old full path
    pub from: PathBuf,
    /// New directory or new file name
    pub to: PathBuf,
}

impl fmt::Display for Relocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.from.display(), self.to.display())
    }
}

/// Result of comparing two snapshots.
///
/// Each list is sorted by old path (added by new path). A single file may
/// appear in several of `modified`, `moved` and `renamed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub added: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub moved: Vec<Relocation>,
    pub renamed: Vec<Relocation>,
}

impl ChangeReport {
    /// Collect per-identity changes into the five lists.
    pub fn from_changes<'a, I>(changes: I) -> Self
    where
        I: IntoIterator<Item = FileChange<'a>>,
    {
        let mut report = Self::default();

        for change in changes {
            match change {
                FileChange::Added(record) => report.added.push(record.path()),
                FileChange::Deleted(record) => report.deleted.push(record.path()),
                FileChange::Changed { old, new, flags } => {
                    let old_path = old.path();
                    if flags.modified {
                        report.modified.push(old_path.clone());
                    }
                    if flags.moved {
                        report.moved.push(Relocation {
                            from: old_path.clone(),
                            to: new.dir.clone(),
                        });
                    }
                    if flags.renamed {
                        report.renamed.push(Relocation {
                            from: old_path,
                            to: PathBuf::from(&new.filename),
                        });
                    }
                }
            }
        }

        report.sort();
        report
    }

    fn sort(&mut self) {
        self.added.sort();
        self.deleted.sort();
        self.modified.sort();
        self.moved.sort();
        self.renamed.sort();
    }

    /// True when every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ChangeKind::ALL.iter().all(|kind| self.count(*kind) == 0)
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        ChangeKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Added => self.added.len(),
            ChangeKind::Deleted => self.deleted.len(),
            ChangeKind::Modified => self.modified.len(),
            ChangeKind::Moved => self.moved.len(),
            ChangeKind::Renamed => self.renamed.len(),
        }
    }

    /// Rendered lines for one category.
    #[must_use]
    pub fn entries(&self, kind: ChangeKind) -> Vec<String> {
        fn paths(list: &[PathBuf]) -> Vec<String> {
            list.iter().map(|p| p.display().to_string()).collect()
        }
        fn relocations(list: &[Relocation]) -> Vec<String> {
            list.iter().map(ToString::to_string).collect()
        }

        match kind {
            ChangeKind::Added => paths(&self.added),
            ChangeKind::Deleted => paths(&self.deleted),
            ChangeKind::Modified => paths(&self.modified),
            ChangeKind::Moved => relocations(&self.moved),
            ChangeKind::Renamed => relocations(&self.renamed),
        }
    }

    /// Rewrite every path under `root` as `../<relative path>`.
    ///
    /// Paths outside `root` (such as the bare file name on the right of a
    /// rename) are left untouched.
    #[must_use]
    pub fn relative_to(&self, root: &Path) -> Self {
        let rel = |path: &PathBuf| under_root(root, path);
        let rel_move = |r: &Relocation| Relocation {
            from: rel(&r.from),
            to: rel(&r.to),
        };

        Self {
            added: self.added.iter().map(rel).collect(),
            deleted: self.deleted.iter().map(rel).collect(),
            modified: self.modified.iter().map(rel).collect(),
            moved: self.moved.iter().map(rel_move).collect(),
            renamed: self.renamed.iter().map(rel_move).collect(),
        }
    }
}

/// `root/a/b` becomes `../a/b`, `root` itself becomes `..`
fn under_root(root: &Path, path: &Path) -> PathBuf {
    if !path.is_absolute() {
        return path.to_path_buf();
    }
    match path.strip_prefix(root) {
        Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from(".."),
        Ok(rest) => Path::new("..").join(rest),
        Err(_) => path.to_path_buf(),
    }
}
