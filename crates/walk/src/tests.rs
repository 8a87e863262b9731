use super::*;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// In-memory tree
// ============================================================================

#[derive(Clone, Debug)]
struct MemPath {
    path: PathBuf,
    is_dir: bool,
    tree: Arc<BTreeMap<PathBuf, Vec<Child>>>,
    unreadable: Arc<BTreeSet<PathBuf>>,
}

impl PathEntity for MemPath {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn is_file(&self) -> bool {
        !self.is_dir
    }

    fn enumerate_children(&self) -> io::Result<Vec<Child>> {
        if self.unreadable.contains(&self.path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        // Reverse the stored order so the walker has to sort.
        let mut children = self
            .tree
            .get(&self.path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        children.reverse();
        Ok(children)
    }

    fn join(&self, child: &Child) -> Self {
        Self {
            path: self.path.join(&child.name),
            is_dir: child.is_dir,
            tree: Arc::clone(&self.tree),
            unreadable: Arc::clone(&self.unreadable),
        }
    }
}

/// Builds a tree under `/m` from relative entries; a trailing `/` marks a
/// directory.
fn mem_tree(entries: &[&str], unreadable: &[&str]) -> MemPath {
    let root = PathBuf::from("/m");
    let mut tree: BTreeMap<PathBuf, Vec<Child>> = BTreeMap::new();
    tree.insert(root.clone(), Vec::new());
    for entry in entries {
        let is_dir = entry.ends_with('/');
        let relative = Path::new(entry.trim_end_matches('/'));
        let full = root.join(relative);
        let parent = full.parent().expect("parent").to_path_buf();
        let name = full.file_name().expect("name").to_os_string();
        tree.entry(parent).or_default().push(Child::new(name, is_dir));
        if is_dir {
            tree.entry(full).or_default();
        }
    }
    MemPath {
        path: root.clone(),
        is_dir: true,
        tree: Arc::new(tree),
        unreadable: Arc::new(unreadable.iter().map(|path| root.join(path)).collect()),
    }
}

fn sample() -> MemPath {
    mem_tree(
        &[
            "1.txt",
            "bar/",
            "bar/2.txt",
            "boo/",
            "boo/3.txt",
            "boo/baz/",
            "boo/baz/4.txt",
        ],
        &[],
    )
}

fn relative(walker: &PathIterator<MemPath>) -> Vec<String> {
    walker
        .iter()
        .map(|entry| entry.expect("entry").relative_path().to_owned())
        .collect()
}

// ============================================================================
// Order and depth
// ============================================================================

#[test]
fn walk_is_preorder_with_files_first() {
    let walker = PathIterator::new(sample());
    assert_eq!(
        relative(&walker),
        [
            "1.txt",
            "bar",
            "bar/2.txt",
            "boo",
            "boo/3.txt",
            "boo/baz",
            "boo/baz/4.txt"
        ]
    );
}

#[test]
fn depth_bounds_the_walk() {
    let walker = PathIterator::new(sample());
    assert!(relative(&walker.copy().depth(0)).is_empty());
    assert_eq!(relative(&walker.copy().depth(1)), ["1.txt", "bar", "boo"]);
    assert_eq!(
        relative(&walker.copy().depth(2)),
        ["1.txt", "bar", "bar/2.txt", "boo", "boo/3.txt", "boo/baz"]
    );
    assert_eq!(relative(&walker.copy().recursive(false)), ["1.txt", "bar", "boo"]);
    assert_eq!(relative(&walker.depth(5).recursive(true)).len(), 7);
}

#[test]
fn entries_carry_depth() {
    let walker = PathIterator::new(sample());
    let depths: Vec<usize> = walker
        .iter()
        .map(|entry| entry.expect("entry").depth())
        .collect();
    assert_eq!(depths, [1, 1, 2, 1, 2, 2, 3]);
}

#[test]
fn traversal_depth_override_replaces_budget() {
    let walker = PathIterator::new(sample())
        .depth(1)
        .in_dir(Needle::value("boo").depth(-1))
        .expect("criterion");
    assert_eq!(
        relative(&walker),
        ["1.txt", "bar", "boo", "boo/3.txt", "boo/baz"]
    );
}

// ============================================================================
// Balance
// ============================================================================

#[test]
fn files_and_dirs_balance() {
    let walker = PathIterator::new(sample());
    assert_eq!(
        relative(&walker.copy().files()),
        ["1.txt", "bar/2.txt", "boo/3.txt", "boo/baz/4.txt"]
    );
    assert_eq!(relative(&walker.copy().dirs()), ["bar", "boo", "boo/baz"]);
    assert_eq!(relative(&walker.copy().files().dirs()).len(), 7);
    assert_eq!(
        relative(&walker.copy().include_files(false)),
        ["bar", "boo", "boo/baz"]
    );
    assert_eq!(
        relative(&walker.files().files().dirs().dirs().dirs().files()).len(),
        7
    );
}

// ============================================================================
// Pruning
// ============================================================================

#[test]
fn match_finish_reports_but_does_not_descend() {
    let walker = PathIterator::new(sample())
        .add(Needle::value("boo").dirs().finish())
        .expect("criterion");
    assert_eq!(relative(&walker), ["1.txt", "bar/2.txt", "boo"]);
}

fn is_boo() -> EntryNeedle<MemPath> {
    Needle::callback(|haystack| {
        haystack
            .subject()
            .is_some_and(|entry: &WalkEntry<MemPath>| entry.relative_path() == "boo")
    })
}

#[test]
fn callback_needle_carries_finish() {
    let walker = PathIterator::new(sample())
        .callback_needle(is_boo().dirs().finish())
        .expect("criterion");
    assert_eq!(relative(&walker), ["1.txt", "bar/2.txt", "boo"]);
}

#[test]
fn ne_callback_needle_inverts_configured_needle() {
    let walker = PathIterator::new(sample())
        .ne_callback_needle(is_boo().dirs())
        .expect("criterion");
    assert_eq!(
        relative(&walker),
        ["1.txt", "bar", "bar/2.txt", "boo/3.txt", "boo/baz", "boo/baz/4.txt"]
    );
}

#[test]
fn traversal_finish_stops_descent() {
    let walker = PathIterator::new(sample())
        .in_dir(Needle::pattern("*").finish())
        .expect("criterion");
    assert_eq!(relative(&walker), ["1.txt", "bar", "boo"]);
}

#[test]
fn nin_dir_skips_matching_subtree() {
    let walker = PathIterator::new(sample())
        .nin_dir("boo")
        .expect("criterion");
    assert_eq!(relative(&walker), ["1.txt", "bar", "bar/2.txt", "boo"]);
}

#[test]
fn finish_after_receiving_directory_prunes_it() {
    let walker = PathIterator::new(sample());
    let mut walk = walker.iter();
    let mut seen = Vec::new();
    while let Some(entry) = walk.next() {
        let entry = entry.expect("entry");
        if entry.relative_path() == "boo" {
            walk.finish(entry.path());
        }
        seen.push(entry.relative_path().to_owned());
    }
    assert_eq!(seen, ["1.txt", "bar", "bar/2.txt", "boo"]);
}

#[test]
fn finish_abandons_open_directory() {
    let walker = PathIterator::new(sample());
    let mut walk = walker.iter();
    let mut seen = Vec::new();
    while let Some(entry) = walk.next() {
        let entry = entry.expect("entry");
        if entry.relative_path() == "boo/3.txt" {
            walk.finish("/m/boo");
        }
        seen.push(entry.relative_path().to_owned());
    }
    assert_eq!(seen, ["1.txt", "bar", "bar/2.txt", "boo", "boo/3.txt"]);
}

#[test]
fn finish_on_unvisited_path_is_noop() {
    let walker = PathIterator::new(sample());
    let mut walk = walker.iter();
    walk.finish("/elsewhere");
    walk.finish("/elsewhere");
    assert_eq!(walk.count(), 7);
}

#[test]
fn finish_on_empty_path_is_ignored() {
    let walker = PathIterator::new(sample());
    let mut walk = walker.iter();
    let first = walk.next().expect("first").expect("entry");
    assert_eq!(first.relative_path(), "1.txt");

    walk.finish("");
    assert_eq!(walk.filter_map(Result::ok).count(), 6);
}

#[test]
fn pruning_does_not_leak_between_passes() {
    let walker = PathIterator::new(sample());
    let mut walk = walker.iter();
    walk.finish("/m/boo");
    assert_eq!(walk.filter_map(Result::ok).count(), 4);
    assert_eq!(relative(&walker).len(), 7);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unreadable_directory_ends_the_walk() {
    let root = mem_tree(&["a.txt", "locked/", "locked/x", "z/", "z/y"], &["locked"]);
    let walker = PathIterator::new(root);
    let mut walk = walker.iter();

    assert_eq!(walk.next().expect("a").expect("ok").relative_path(), "a.txt");
    assert_eq!(walk.next().expect("locked").expect("ok").relative_path(), "locked");
    let error = walk.next().expect("error").expect_err("read failure");
    assert!(matches!(error.kind(), WalkErrorKind::ReadDir { .. }));
    assert_eq!(error.path(), Some(Path::new("/m/locked")));
    assert!(walk.next().is_none());
}

#[test]
fn ignore_errors_skips_unreadable_directory() {
    let root = mem_tree(&["a.txt", "locked/", "locked/x", "z/", "z/y"], &["locked"]);
    let walker = PathIterator::new(root).ignore_errors(true);
    assert_eq!(relative(&walker), ["a.txt", "locked", "z", "z/y"]);
}

#[test]
fn missing_root_is_a_read_error() {
    let root = mem_tree(&[], &[""]);
    let walker = PathIterator::new(root);
    let error = walker.count().expect_err("unreadable root");
    assert!(matches!(error.kind(), WalkErrorKind::ReadDir { .. }));
    assert_eq!(walker.copy().ignore_errors(true).count().expect("count"), 0);
}

#[test]
fn unknown_attribute_fails_first_evaluation() {
    let walker = PathIterator::new(sample())
        .add(Needle::value("x").attribute("colour"))
        .expect("registration does not validate attributes");
    let mut walk = walker.iter();
    let error = walk.next().expect("error").expect_err("evaluation");
    match error.kind() {
        WalkErrorKind::Evaluate { path, source } => {
            assert_eq!(path, Path::new("/m/1.txt"));
            assert_eq!(
                source,
                &MatchError::UnknownAttribute {
                    name: "colour".into()
                }
            );
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert!(walk.next().is_none());
}

#[test]
fn unknown_attribute_rejected_by_builder() {
    let result = PathIterator::new(sample()).eq("colour", "red");
    assert!(matches!(result, Err(BuildError::UnknownAttribute { name }) if name == "colour"));
}

#[test]
fn invalid_regex_fails_at_registration() {
    let result = PathIterator::new(sample()).regex("(");
    assert!(matches!(result, Err(PatternError::Regex { .. })));
}

// ============================================================================
// Sorting and access
// ============================================================================

#[test]
fn reverse_without_sort_reverses_walk_order() {
    let walker = PathIterator::new(sample()).files().reverse();
    assert_eq!(
        relative(&walker),
        ["boo/baz/4.txt", "boo/3.txt", "bar/2.txt", "1.txt"]
    );
}

#[test]
fn sort_orders_by_path() {
    let walker = PathIterator::new(sample()).sort();
    assert_eq!(
        relative(&walker),
        [
            "1.txt",
            "bar",
            "bar/2.txt",
            "boo",
            "boo/3.txt",
            "boo/baz",
            "boo/baz/4.txt"
        ]
    );
}

#[test]
fn sort_by_then_reverse() {
    let walker = PathIterator::new(sample())
        .files()
        .sort_by(|left, right| left.depth().cmp(&right.depth()))
        .reverse();
    assert_eq!(
        relative(&walker),
        ["boo/baz/4.txt", "boo/3.txt", "bar/2.txt", "1.txt"]
    );
}

#[test]
fn sorted_walk_reports_errors_first() {
    let root = mem_tree(&["a.txt", "locked/"], &["locked"]);
    let walker = PathIterator::new(root).sort();
    let mut walk = walker.iter();
    assert!(walk.next().expect("error").is_err());
    assert!(walk.next().is_none());
}

#[test]
fn into_iterator_matches_iter() {
    let walker = PathIterator::new(sample()).dirs();
    let mut seen = Vec::new();
    for entry in &walker {
        seen.push(entry.expect("entry").relative_path().to_owned());
    }
    assert_eq!(seen, relative(&walker));
}

#[test]
fn copy_is_independent() {
    let original = PathIterator::new(sample());
    let narrowed = original.copy().pattern("*.txt").expect("glob");
    assert_eq!(relative(&narrowed), ["1.txt"]);
    assert_eq!(relative(&original).len(), 7);
    assert!(original.criteria().is_empty());
}

#[test]
fn get_and_slice_follow_sequence_rules() {
    let walker = PathIterator::new(sample()).files();
    assert_eq!(walker.count().expect("count"), 4);
    assert_eq!(walker.get(0).expect("first").relative_path(), "1.txt");
    assert_eq!(walker.get(-1).expect("last").relative_path(), "boo/baz/4.txt");

    let error = walker.get(4).expect_err("out of range");
    assert!(matches!(
        error.kind(),
        WalkErrorKind::IndexOutOfRange { index: 4, len: 4 }
    ));

    let picked: Vec<_> = walker
        .slice(None, None, -2)
        .expect("slice")
        .into_iter()
        .map(|entry| entry.relative_path().to_owned())
        .collect();
    assert_eq!(picked, ["boo/baz/4.txt", "bar/2.txt"]);

    assert!(walker.slice(Some(10), None, 1).expect("clamped").is_empty());
    assert!(matches!(
        walker.slice(None, None, 0).expect_err("zero step").kind(),
        WalkErrorKind::InvalidSlice
    ));
}
