//! Queries over fetched items.
//!
//! Both functions are pure and return borrowed items in input order.

use super::types::{Item, ItemKind};

/// Returns the items whose tag is `kind`.
pub fn filter_by_kind(items: &[Item], kind: ItemKind) -> Vec<&Item> {
    items.iter().filter(|item| item.kind() == kind).collect()
}

/// Returns the items where `keyword` appears, ignoring case, in any of the
/// variant's searchable fields. An empty keyword matches everything.
pub fn search<'a>(items: &'a [Item], keyword: &str) -> Vec<&'a Item> {
    let needle = keyword.to_lowercase();
    items
        .iter()
        .filter(|item| matches_keyword(item, &needle))
        .collect()
}

fn matches_keyword(item: &Item, needle: &str) -> bool {
    item.searchable_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{Event, Meeting, Task, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn stamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn event(id: u64, name: &str, tags: &[&str]) -> Item {
        Item::Event(Event {
            id,
            name: name.to_string(),
            description: None,
            date: day(),
            location: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: stamp(),
            updated_at: stamp(),
        })
    }

    fn meeting(id: u64, title: &str, attendees: &[&str]) -> Item {
        Item::Meeting(Meeting {
            id,
            title: title.to_string(),
            description: Some("Quarterly planning".to_string()),
            date: day(),
            time: "10:00".to_string(),
            attendees: attendees.iter().map(|a| a.to_string()).collect(),
            tags: Vec::new(),
            created_at: stamp(),
            updated_at: stamp(),
        })
    }

    fn task(id: u64, title: &str, tags: &[&str]) -> Item {
        Item::Task(Task {
            id,
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: stamp(),
            updated_at: stamp(),
        })
    }

    fn mixed() -> Vec<Item> {
        vec![
            event(1, "Team Sync", &[]),
            task(2, "Fix bug", &["team"]),
            meeting(3, "Roadmap", &["lee@example.com"]),
            task(4, "Write docs", &[]),
            event(5, "Launch party", &["social"]),
        ]
    }

    fn ids(items: &[&Item]) -> Vec<u64> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_filter_by_kind_preserves_order() {
        let items = mixed();
        assert_eq!(ids(&filter_by_kind(&items, ItemKind::Task)), vec![2, 4]);
        assert_eq!(ids(&filter_by_kind(&items, ItemKind::Event)), vec![1, 5]);
        assert_eq!(ids(&filter_by_kind(&items, ItemKind::Meeting)), vec![3]);
    }

    #[test]
    fn test_filter_by_kind_only_returns_kind() {
        let items = mixed();
        for kind in ItemKind::ALL {
            assert!(filter_by_kind(&items, kind)
                .iter()
                .all(|item| item.kind() == kind));
        }
    }

    #[test]
    fn test_filter_by_kind_empty_input() {
        assert!(filter_by_kind(&[], ItemKind::Event).is_empty());
    }

    #[test]
    fn test_search_matches_heading_and_tags() {
        let items = vec![event(1, "Team Sync", &[]), task(2, "Fix bug", &["team"])];
        assert_eq!(ids(&search(&items, "team")), vec![1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = mixed();
        assert_eq!(search(&items, "TEAM"), search(&items, "team"));
        assert_eq!(ids(&search(&items, "ROADMAP")), vec![3]);
    }

    #[test]
    fn test_search_variant_fields() {
        let items = mixed();
        assert_eq!(ids(&search(&items, "quarterly")), vec![3]);
        assert_eq!(ids(&search(&items, "social")), vec![5]);
    }

    #[test]
    fn test_search_skips_location_and_attendees() {
        let mut located = event(1, "Offsite", &[]);
        if let Item::Event(ref mut e) = located {
            e.location = Some("Team room".to_string());
        }
        let items = vec![located, meeting(2, "Roadmap", &["team@x.io"])];

        assert!(search(&items, "team").is_empty());
        assert!(search(&mixed(), "lee@").is_empty());
    }

    #[test]
    fn test_search_no_match_and_empty_keyword() {
        let items = mixed();
        assert!(search(&items, "nonexistent").is_empty());
        assert_eq!(search(&items, "").len(), items.len());
    }

    #[test]
    fn test_search_is_substring_only() {
        // No tokenization: the keyword has to appear verbatim.
        let items = mixed();
        assert!(search(&items, "sync team").is_empty());
        assert_eq!(ids(&search(&items, "m sy")), vec![1]);
    }
}
