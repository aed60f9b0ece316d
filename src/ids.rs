//! Identifier and name generation shared by the setup and workflow code.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use uuid::Uuid;

use crate::models::Member;

const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

lazy_static::lazy_static! {
    static ref UUID_V4: Regex = Regex::new(
        r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$"
    ).expect("static UUID pattern");
}

pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Lower-case alphanumeric string of `len` characters.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| NAME_CHARSET[rng.gen_range(0..NAME_CHARSET.len())] as char)
        .collect()
}

/// Uniform pick; `None` only for an empty slice.
pub fn random_item<T: Clone>(items: &[T]) -> Option<T> {
    items.choose(&mut rand::thread_rng()).cloned()
}

pub fn is_uuid_v4(candidate: &str) -> bool {
    UUID_V4.is_match(candidate)
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn team_name() -> String {
    format!("team_{}_{}", now_millis(), random_string(8))
}

pub fn seed_team_name(index: usize) -> String {
    format!("init_team_{}_{}", index, now_millis())
}

pub fn temp_team_name() -> String {
    format!("temp_team_{}_{}", now_millis(), random_string(8))
}

pub fn pull_request_name() -> String {
    format!("PR_{}", random_string(10))
}

/// Two brand-new members; user ids are never shared between teams.
pub fn fresh_members() -> Vec<Member> {
    vec![
        Member {
            user_id: generate_uuid(),
            username: format!("user1_{}", random_string(6)),
        },
        Member {
            user_id: generate_uuid(),
            username: format!("user2_{}", random_string(6)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_uuids_are_v4_and_unique() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_uuid().to_string()).collect();
        assert_eq!(ids.len(), 1_000);
        assert!(ids.iter().all(|id| is_uuid_v4(id)));
    }

    #[test]
    fn test_uuid_pattern_rejects_other_versions() {
        assert!(!is_uuid_v4("00000000-0000-1000-8000-000000000000"));
        assert!(!is_uuid_v4("not-a-uuid"));
        assert!(is_uuid_v4("3f2504e0-4f89-41d3-9a0c-0305e82c3301"));
    }

    #[test]
    fn test_random_string_charset_and_length() {
        let s = random_string(32);
        assert_eq!(s.len(), 32);
        assert!(s.bytes().all(|b| NAME_CHARSET.contains(&b)));
    }

    #[test]
    fn test_random_item_empty() {
        let empty: Vec<u8> = Vec::new();
        assert!(random_item(&empty).is_none());
        assert_eq!(random_item(&[7]), Some(7));
    }

    #[test]
    fn test_name_shapes() {
        assert!(team_name().starts_with("team_"));
        assert!(seed_team_name(3).starts_with("init_team_3_"));
        assert!(temp_team_name().starts_with("temp_team_"));
        let pr = pull_request_name();
        assert!(pr.starts_with("PR_"));
        assert_eq!(pr.len(), 13);
    }

    #[test]
    fn test_fresh_members() {
        let members = fresh_members();
        assert_eq!(members.len(), 2);
        assert!(members[0].username.starts_with("user1_"));
        assert!(members[1].username.starts_with("user2_"));
        assert_ne!(members[0].user_id, members[1].user_id);
    }
}
