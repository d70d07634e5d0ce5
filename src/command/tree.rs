//! Builds the duration tree for a list of command line paths.
//!
//! Without `--recursive` every directory named on the command line becomes a
//! nested tree of its immediate children, and any directory found inside it is
//! reported rather than expanded. With `--recursive` every file below each
//! directory is flattened into the top level under its full path.

use std::collections::btree_map::{self, BTreeMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{LengthError, Problem};
use crate::utils::probe::{DurationProbe, Length};
use crate::utils::{get_walker, list_dir};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DurationEntry {
    Leaf(Length),
    Subtree(DurationTree),
}

impl DurationEntry {
    pub fn total_seconds(&self) -> u64 {
        match self {
            DurationEntry::Leaf(Length::Seconds(s)) => *s,
            DurationEntry::Leaf(Length::NotAudio) => 0,
            DurationEntry::Subtree(tree) => tree.total_seconds(),
        }
    }
}

/// Path-keyed durations, iterated in byte order of the path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DurationTree {
    entries: BTreeMap<OsString, DurationEntry>,
}

impl DurationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, entry: DurationEntry) {
        self.entries.insert(path.into_os_string(), entry);
    }

    pub fn get(&self, path: &Path) -> Option<&DurationEntry> {
        self.entries.get(path.as_os_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Sum of every measured file; files that are not audio add nothing.
    pub fn total_seconds(&self) -> u64 {
        self.iter().map(|(_, entry)| entry.total_seconds()).sum()
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, OsString, DurationEntry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Path, &'a DurationEntry);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, entry)| (Path::new(key.as_os_str()), entry))
    }
}

impl<'a> IntoIterator for &'a DurationTree {
    type Item = (&'a Path, &'a DurationEntry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Measures `paths`, pushing paths that could not be measured onto `problems`.
///
/// Problems are collected even when a later path fails fatally, so callers can
/// report them before the error.
pub fn build<P: DurationProbe + ?Sized>(
    paths: &[PathBuf],
    recursive: bool,
    probe: &P,
    problems: &mut Vec<Problem>,
) -> Result<DurationTree, LengthError> {
    if recursive {
        build_recursive(paths, probe, problems)
    } else {
        build_listing(paths, true, probe, problems)
    }
}

fn build_listing<P: DurationProbe + ?Sized>(
    paths: &[PathBuf],
    toplevel: bool,
    probe: &P,
    problems: &mut Vec<Problem>,
) -> Result<DurationTree, LengthError> {
    let mut tree = DurationTree::new();

    for path in paths {
        if path.is_dir() && toplevel {
            debug!("listing {}", path.display());
            let children = list_dir(path).map_err(|e| LengthError::io(path, e))?;
            let subtree = build_listing(&children, false, probe, problems)?;
            tree.insert(path.clone(), DurationEntry::Subtree(subtree));
        } else if path.is_dir() {
            problems.push(Problem::IsDirectory(path.clone()));
        } else if path.is_file() {
            tree.insert(path.clone(), DurationEntry::Leaf(probe.length(path)?));
        } else {
            problems.push(Problem::NotFound(path.clone()));
        }
    }

    Ok(tree)
}

fn build_recursive<P: DurationProbe + ?Sized>(
    paths: &[PathBuf],
    probe: &P,
    problems: &mut Vec<Problem>,
) -> Result<DurationTree, LengthError> {
    let mut tree = DurationTree::new();

    for path in paths {
        if path.is_dir() {
            debug!("walking {}", path.display());
            for entry in get_walker(path) {
                let found = entry?.into_path();
                if found.is_file() {
                    let length = probe.length(&found)?;
                    tree.insert(found, DurationEntry::Leaf(length));
                } else if !found.is_dir() {
                    // dangling symlink
                    problems.push(Problem::NotFound(found));
                }
            }
        } else if path.is_file() {
            tree.insert(path.clone(), DurationEntry::Leaf(probe.length(path)?));
        } else {
            problems.push(Problem::NotFound(path.clone()));
        }
    }

    Ok(tree)
}
