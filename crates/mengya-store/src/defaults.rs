//! Built-in values for well-known paths.
//!
//! A read that misses both tiers falls back to this table. The skeletons are
//! built fresh on every call and are never written back to either tier.

use chrono::{DateTime, SecondsFormat};
use serde_json::{Value, json};

/// The default for `path`, or `None` if the path has no default.
///
/// Date fields are filled with `now_ms` rendered as RFC 3339.
pub fn default_value(path: &str, now_ms: u64) -> Option<Value> {
    let value = match path {
        "child.profile" => json!({
            "nickname": "Little Friend",
            "avatar": "\u{1F476}",
            "level": 1,
            "experience": 0,
            "joinDate": iso_timestamp(now_ms),
        }),
        "child.progress" => json!({
            "totalTasks": 0,
            "completedTasks": 0,
            "currentStreak": 0,
            "maxStreak": 0,
            "abilities": {
                "expression": 0,
                "logic": 0,
                "creativity": 0,
                "exploration": 0,
                "habit": 0,
            },
        }),
        "child.achievements" => json!([]),
        "child.virtualPartner" => json!({
            "name": "Sprouty",
            "level": 1,
            "growth": 0,
            "activity": 0,
            "mood": "happy",
            "lastInteraction": iso_timestamp(now_ms),
        }),
        _ => return None,
    };
    Some(value)
}

/// Render epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn iso_timestamp(now_ms: u64) -> String {
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_child_record_has_a_default() {
        for path in [
            "child.profile",
            "child.progress",
            "child.achievements",
            "child.virtualPartner",
        ] {
            assert!(default_value(path, 0).is_some(), "{path} has no default");
        }
    }

    #[test]
    fn unknown_path_has_no_default() {
        assert_eq!(default_value("child.secrets", 0), None);
        assert_eq!(default_value("child", 0), None);
    }

    #[test]
    fn achievements_default_is_empty_list() {
        assert_eq!(default_value("child.achievements", 0), Some(json!([])));
    }

    #[test]
    fn profile_skeleton_fields() {
        let profile = default_value("child.profile", 1_700_000_000_000).unwrap();
        assert_eq!(profile["level"], json!(1));
        assert_eq!(profile["experience"], json!(0));
        assert_eq!(profile["joinDate"], json!("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn progress_has_all_abilities() {
        let progress = default_value("child.progress", 0).unwrap();
        let abilities = progress["abilities"].as_object().unwrap();
        for name in ["expression", "logic", "creativity", "exploration", "habit"] {
            assert_eq!(abilities[name], json!(0));
        }
    }

    #[test]
    fn partner_starts_happy() {
        let partner = default_value("child.virtualPartner", 0).unwrap();
        assert_eq!(partner["mood"], json!("happy"));
        assert_eq!(partner["lastInteraction"], json!("1970-01-01T00:00:00.000Z"));
    }
}
