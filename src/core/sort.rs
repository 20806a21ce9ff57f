//! Sort engine.
//!
//! Folders always come before files. Folders are ordered by name; files by
//! the configured key. Name comparison is numeric-aware (`file2` < `file10`)
//! and ignores case and accents.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{OverviewConfig, SortBy, VaultEntry};

/// Fold a name to its comparison key: accents stripped, lowercased.
fn fold(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-style, numeric-aware name comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(fold(a), fold(b))
}

/// Comparator for two entries under a configuration.
pub fn compare_entries(a: &VaultEntry, b: &VaultEntry, config: &OverviewConfig) -> Ordering {
    let directed = |ord: Ordering| {
        if config.sort_by_asc {
            ord
        } else {
            ord.reverse()
        }
    };

    match (a, b) {
        (VaultEntry::Folder(_), VaultEntry::File(_)) => Ordering::Less,
        (VaultEntry::File(_), VaultEntry::Folder(_)) => Ordering::Greater,
        (VaultEntry::Folder(x), VaultEntry::Folder(y)) => directed(compare_names(&x.name, &y.name)),
        (VaultEntry::File(x), VaultEntry::File(y)) => directed(match config.sort_by {
            SortBy::Name => compare_names(&x.basename, &y.basename),
            SortBy::Created => x.created.cmp(&y.created),
            SortBy::Modified => x.modified.cmp(&y.modified),
        }),
    }
}

/// Stable in-place sort.
pub fn sort_entries(entries: &mut [&VaultEntry], config: &OverviewConfig) {
    entries.sort_by(|a, b| compare_entries(a, b, config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileNode, FolderNode};

    fn folder(name: &str) -> VaultEntry {
        VaultEntry::Folder(FolderNode {
            path: name.to_string(),
            name: name.to_string(),
            children: Vec::new(),
            collapsed: false,
        })
    }

    fn file(path: &str, created: u64, modified: u64) -> VaultEntry {
        VaultEntry::File(FileNode::new(path, created, modified))
    }

    fn names(entries: &[&VaultEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    fn sample() -> Vec<VaultEntry> {
        vec![
            file("note.md", 30, 10),
            folder("B"),
            file("file10.md", 10, 30),
            folder("A"),
            file("file2.md", 20, 20),
        ]
    }

    #[test]
    fn test_compare_names_numeric_and_folded() {
        assert_eq!(compare_names("file2", "file10"), Ordering::Less);
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Éclair", "eclair"), Ordering::Equal);
        assert_eq!(compare_names("zebra", "Äpfel"), Ordering::Greater);
    }

    #[test]
    fn test_folders_first_by_name() {
        let entries = sample();
        let mut refs: Vec<&VaultEntry> = entries.iter().collect();
        sort_entries(&mut refs, &OverviewConfig::default());
        assert_eq!(names(&refs), vec!["A", "B", "file2.md", "file10.md", "note.md"]);
    }

    #[test]
    fn test_flat_root_order() {
        let entries = vec![file("note.md", 0, 0), folder("B"), folder("A")];
        let mut refs: Vec<&VaultEntry> = entries.iter().collect();
        sort_entries(&mut refs, &OverviewConfig::default());
        assert_eq!(names(&refs), vec!["A", "B", "note.md"]);
    }

    #[test]
    fn test_descending_keeps_folders_first() {
        let entries = sample();
        let mut refs: Vec<&VaultEntry> = entries.iter().collect();
        let config = OverviewConfig {
            sort_by_asc: false,
            ..OverviewConfig::default()
        };
        sort_entries(&mut refs, &config);
        assert_eq!(names(&refs), vec!["B", "A", "note.md", "file10.md", "file2.md"]);
    }

    #[test]
    fn test_sort_by_timestamps() {
        let entries = sample();
        let mut refs: Vec<&VaultEntry> = entries.iter().collect();

        let created_desc = OverviewConfig {
            sort_by: SortBy::Created,
            sort_by_asc: false,
            ..OverviewConfig::default()
        };
        sort_entries(&mut refs, &created_desc);
        assert_eq!(names(&refs), vec!["B", "A", "note.md", "file2.md", "file10.md"]);

        let modified_asc = OverviewConfig {
            sort_by: SortBy::Modified,
            ..OverviewConfig::default()
        };
        sort_entries(&mut refs, &modified_asc);
        assert_eq!(names(&refs), vec!["A", "B", "note.md", "file2.md", "file10.md"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let entries = vec![
            file("Same.md", 1, 1),
            file("same.md", 1, 1),
            folder("x"),
            file("other.md", 5, 5),
            folder("X"),
        ];
        for sort_by in [SortBy::Name, SortBy::Created, SortBy::Modified] {
            for sort_by_asc in [true, false] {
                let config = OverviewConfig {
                    sort_by,
                    sort_by_asc,
                    ..OverviewConfig::default()
                };
                let mut once: Vec<&VaultEntry> = entries.iter().collect();
                sort_entries(&mut once, &config);
                let mut twice = once.clone();
                sort_entries(&mut twice, &config);
                assert_eq!(names(&once), names(&twice));
                assert!(once[0].is_folder() && once[1].is_folder());
            }
        }
    }
}
