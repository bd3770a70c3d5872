//! Name-based predicates used by the traversal engine.
//!
//! All comparisons are case-insensitive. The configured lists are already
//! lower-cased by [`ScanBuilder`](crate::ScanBuilder), so only the candidate
//! side is folded here.

use std::path::Path;

/// Lower-cased extension of the final path component, dot included.
///
/// The extension starts at the last `.` of the file name, so `.bashrc` yields
/// `.bashrc`, `archive.tar.gz` yields `.gz` and `Makefile` yields an empty
/// string.
pub fn extension_of(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    match name.rfind('.') {
        Some(idx) => name[idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Extension gate. A non-empty exclude list is consulted first and wins over
/// the include list.
pub fn extension_allowed(path: &Path, include: &[String], exclude: &[String]) -> bool {
    let ext = extension_of(path);
    if !exclude.is_empty() && contains_folded(exclude, &ext) {
        return false;
    }
    if !include.is_empty() && !contains_folded(include, &ext) {
        return false;
    }
    true
}

/// Whether a directory with this name must be pruned together with its subtree.
pub fn dir_excluded(name: &str, exclude: &[String]) -> bool {
    contains_folded(exclude, name)
}

/// Whether a directory name appears in the include list.
///
/// This never gates descent: a directory outside the list may still hold
/// descendants whose names match.
pub fn dir_included(name: &str, include: &[String]) -> bool {
    contains_folded(include, name)
}

fn contains_folded(list: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    list.iter().any(|item| item.to_lowercase() == candidate)
}
