//! Canonical identity and duplicate filtering.
//!
//! The backend may return duplicate rows (e.g. a class a student joined
//! twice). Views collapse every fetched collection through [`dedup_by_key`]
//! before rendering. One identity rule per entity: a class keys on its class
//! code (the user-facing natural key), everything else keys on its numeric
//! id.

use std::collections::HashSet;
use std::hash::Hash;

use crate::id::{AssignmentId, CommentId, ForumId, MaterialId, UserId};
use crate::resource::{Assignment, Class, Comment, ForumPost, Material, Member};

/// Canonical identity of a resource within a rendered collection.
pub trait Keyed {
    type Key: Eq + Hash;

    fn key(&self) -> Self::Key;
}

/// Drop duplicates, keeping the first occurrence of each key and preserving
/// the incoming order otherwise.
pub fn dedup_by_key<T: Keyed>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.key())).collect()
}

impl Keyed for Class {
    type Key = String;

    fn key(&self) -> String {
        self.class_code.clone()
    }
}

impl Keyed for Member {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

impl Keyed for Material {
    type Key = MaterialId;

    fn key(&self) -> MaterialId {
        self.id
    }
}

impl Keyed for Assignment {
    type Key = AssignmentId;

    fn key(&self) -> AssignmentId {
        self.id
    }
}

impl Keyed for ForumPost {
    type Key = ForumId;

    fn key(&self) -> ForumId {
        self.id
    }
}

impl Keyed for Comment {
    type Key = CommentId;

    fn key(&self) -> CommentId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use crate::id::ClassId;

    fn class(id: i64, code: &str) -> Class {
        Class {
            id: ClassId::new(id),
            name: format!("Class {id}"),
            schedule: "08:00".to_string(),
            teacher: "T".to_string(),
            class_code: code.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn classes_collapse_on_class_code_keeping_first() {
        let deduped = dedup_by_key(vec![class(1, "AAA"), class(2, "BBB"), class(3, "AAA")]);
        let ids: Vec<i64> = deduped.iter().map(|c| c.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn members_collapse_on_user_id() {
        let member = |id: i64| Member {
            id: UserId::new(id),
            username: format!("user{id}"),
            role: "Siswa".to_string(),
        };
        let deduped = dedup_by_key(vec![member(5), member(6), member(5), member(6)]);
        assert_eq!(deduped.len(), 2);
    }

    proptest! {
        #[test]
        fn dedup_output_has_unique_keys(codes in proptest::collection::vec("[A-C]{1,2}", 0..20)) {
            let classes: Vec<Class> = codes
                .iter()
                .enumerate()
                .map(|(i, code)| class(i as i64, code))
                .collect();

            let deduped = dedup_by_key(classes);
            let keys: HashSet<String> = deduped.iter().map(Keyed::key).collect();
            prop_assert_eq!(keys.len(), deduped.len());
        }

        #[test]
        fn dedup_is_idempotent(codes in proptest::collection::vec("[A-C]{1,2}", 0..20)) {
            let classes: Vec<Class> = codes
                .iter()
                .enumerate()
                .map(|(i, code)| class(i as i64, code))
                .collect();

            let once = dedup_by_key(classes);
            let twice = dedup_by_key(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn dedup_preserves_relative_order(codes in proptest::collection::vec("[A-C]{1,2}", 0..20)) {
            let classes: Vec<Class> = codes
                .iter()
                .enumerate()
                .map(|(i, code)| class(i as i64, code))
                .collect();

            let deduped = dedup_by_key(classes);
            let ids: Vec<i64> = deduped.iter().map(|c| c.id.as_i64()).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            prop_assert_eq!(ids, sorted);
        }
    }
}
