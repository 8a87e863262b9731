//! End-to-end walks through the `Dirpath` facade.

use std::collections::BTreeSet;

use dirpath::{Dirpath, EntryNeedle, FsPath, Needle, PathIterator, WalkEntry, WalkErrorKind};
use test_support::TreeFixture;

fn sample() -> TreeFixture {
    TreeFixture::sample().expect("fixture")
}

fn names(walker: &PathIterator<FsPath>) -> BTreeSet<String> {
    walker
        .iter()
        .map(|entry| entry.expect("entry").relative_path().to_owned())
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[test]
fn depth_one() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path()).iterator().depth(1);
    assert_eq!(names(&walker), set(&["1.txt", "bar", "boo"]));
}

#[test]
fn recursive_files() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path())
        .iterator()
        .recursive(true)
        .files();
    assert_eq!(
        names(&walker),
        set(&["1.txt", "bar/2.txt", "boo/3.txt", "boo/baz/4.txt"])
    );
}

#[test]
fn unanchored_glob_matches_top_level_only() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path())
        .iterator()
        .pattern("*.txt")
        .expect("glob");
    assert_eq!(names(&walker), set(&["1.txt"]));
}

#[test]
fn regex_reaches_every_level() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path())
        .iterator()
        .regex(r"[^/]+\.txt$")
        .expect("regex");
    assert_eq!(
        names(&walker),
        set(&["1.txt", "bar/2.txt", "boo/3.txt", "boo/baz/4.txt"])
    );
}

#[test]
fn sentinel_directories_are_not_descended() {
    let fixture = TreeFixture::with_entries(&[
        "project/sentinel",
        "project/nested/sentinel",
        "loose/inner/sentinel",
        "loose/inner/deeper/sentinel",
        "empty/",
    ])
    .expect("fixture");

    let marked: EntryNeedle<FsPath> = Needle::callback(|haystack| {
        haystack
            .subject()
            .is_some_and(|entry: &WalkEntry<FsPath>| entry.entity().has_file("sentinel"))
    });
    let walker = Dirpath::new(fixture.path())
        .iterator()
        .dirs()
        .add(marked.finish())
        .expect("callback");

    assert_eq!(names(&walker), set(&["loose/inner", "project"]));
}

#[test]
fn literal_needles_agree() {
    let fixture = TreeFixture::with_entries(&["a/foo.txt", "a/foo.txt.bak", "b/bar.txt", "c.md"])
        .expect("fixture");
    let base = Dirpath::new(fixture.path()).iterator();
    let expected = set(&["a/foo.txt"]);

    let walkers = [
        base.copy().eq_value("foo.txt").expect("value"),
        base.copy().eq_pattern("foo.txt").expect("pattern"),
        base.copy().eq_regex(r"foo\.txt$").expect("regex"),
        base.copy()
            .eq_callback(|haystack| haystack.text().ends_with("foo.txt"))
            .expect("callback"),
    ];
    for walker in &walkers {
        assert_eq!(names(walker), expected);
    }
}

#[test]
fn sorted_and_reversed_walk() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path())
        .iterator()
        .files()
        .sort()
        .reverse();
    let ordered: Vec<String> = walker
        .iter()
        .map(|entry| entry.expect("entry").relative_path().to_owned())
        .collect();
    assert_eq!(
        ordered,
        ["boo/baz/4.txt", "boo/3.txt", "bar/2.txt", "1.txt"]
    );
}

#[test]
fn indexing_past_the_end_fails() {
    let fixture = sample();
    let walker = Dirpath::new(fixture.path()).iterator().files();
    let error = walker.get(-5).expect_err("only four files");
    assert!(matches!(
        error.kind(),
        WalkErrorKind::IndexOutOfRange { index: -5, len: 4 }
    ));
    assert_eq!(
        walker.get(-4).expect("first").relative_path(),
        "1.txt"
    );
}

#[cfg(unix)]
#[test]
fn facade_can_follow_symlinks() {
    use std::os::unix::fs::symlink;

    let fixture = TreeFixture::with_entries(&["real/inner.txt"]).expect("fixture");
    symlink(fixture.join("real"), fixture.join("alias")).expect("symlink");

    let plain = Dirpath::new(fixture.path()).iterator().files();
    assert_eq!(names(&plain), set(&["alias", "real/inner.txt"]));

    let following = Dirpath::new(fixture.path())
        .follow_symlinks(true)
        .iterator()
        .files();
    // Both names resolve to one directory, which is walked once.
    assert_eq!(names(&following), set(&["alias/inner.txt"]));
}
