//! Property tests: a criterion and its inverse partition every subject.

use std::borrow::Cow;

use filters::{AttrValue, BucketName, CriteriaStore, MatchMode, Needle, NeedleKind, Subject, evaluate};
use proptest::prelude::*;

struct Path {
    relative: String,
}

impl Subject for Path {
    fn full_path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/tree/{}", self.relative))
    }

    fn relative_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.relative)
    }

    fn basename(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.relative.rsplit('/').next().unwrap_or_default())
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        (name == "basename").then(|| self.basename().into_owned().into())
    }
}

fn passes(needle: Needle<Path>, subject: &Path) -> bool {
    let mut store = CriteriaStore::new();
    store.add(needle).expect("compiled");
    evaluate(store.bucket(BucketName::Paths), MatchMode::Match, subject)
        .expect("evaluate")
        .passed
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-c]{1,3}(\\.txt)?", 1..4).prop_map(|parts| parts.join("/"))
}

fn needle_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*.txt".to_string()),
        Just("**/*.txt".to_string()),
        Just("a*".to_string()),
        Just("?b".to_string()),
        Just("a/b".to_string()),
        "[a-c]{1,3}",
    ]
}

fn kind() -> impl Strategy<Value = NeedleKind> {
    prop_oneof![
        Just(NeedleKind::Value),
        Just(NeedleKind::Pattern),
        Just(NeedleKind::Regex),
    ]
}

proptest! {
    #[test]
    fn eq_and_ne_partition(relative in relative_path(), text in needle_text(), kind in kind()) {
        let subject = Path { relative };
        let text = if kind == NeedleKind::Regex {
            text.replace('*', ".*").replace('?', ".")
        } else {
            text
        };
        let eq = Needle::value(text).into_kind(kind);
        let ne = eq.clone().inverse();

        let matched = passes(eq, &subject);
        let unmatched = passes(ne, &subject);
        prop_assert!(matched != unmatched);
    }

    #[test]
    fn attribute_inversion_partitions(relative in relative_path(), text in "[a-c]{1,3}") {
        let subject = Path { relative };
        let eq = Needle::pattern(text).attribute("basename");
        let ne = eq.clone().inverse();
        prop_assert!(passes(eq, &subject) != passes(ne, &subject));
    }
}
