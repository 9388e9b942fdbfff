//! Search, filter and sort parameters and the derivation of the visible list.

use crate::Note;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which notes pass the importance filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOption {
    #[default]
    All,
    Important,
}

/// Display order of the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Descending `created_at`.
    #[default]
    Newest,
    /// Ascending `created_at`.
    Oldest,
    /// Ascending title. Disables pinning.
    #[serde(rename = "a-z")]
    AToZ,
}

impl SortOption {
    fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::AToZ => "a-z",
        }
    }
}

impl FilterOption {
    fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Important => "important",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "a-z" => Ok(Self::AToZ),
            other => Err(format!("unknown sort option '{other}' (expected newest, oldest or a-z)")),
        }
    }
}

impl FromStr for FilterOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "important" => Ok(Self::Important),
            other => Err(format!("unknown filter option '{other}' (expected all or important)")),
        }
    }
}

/// Transient query parameters; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_query: String,
    pub filter_option: FilterOption,
    pub sort_option: SortOption,
}

/// Derives the visible list from `notes` under `query`.
///
/// Filters by search text (case-insensitive substring of title or content),
/// then by importance, sorts stably, and finally pins important notes above
/// the rest unless sorting alphabetically. Returns owned copies.
pub fn filter_and_sort(notes: &[Note], query: &QueryState) -> Vec<Note> {
    let needle = query.search_query.to_lowercase();

    let mut visible: Vec<Note> = notes
        .iter()
        .filter(|note| needle.is_empty() || matches_search(note, &needle))
        .filter(|note| query.filter_option == FilterOption::All || note.important)
        .cloned()
        .collect();

    match query.sort_option {
        SortOption::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::AToZ => {
            let mut collator = Collator::default();
            visible.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
        }
    }

    if query.sort_option == SortOption::AToZ {
        return visible;
    }

    let (mut pinned, regular): (Vec<Note>, Vec<Note>) =
        visible.into_iter().partition(|note| note.important);
    pinned.extend(regular);
    pinned
}

fn matches_search(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, content: &str, important: bool, created_at: i64) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            color: "#e5e7eb".to_string(),
            important,
            font_zoom: 100,
            created_at,
            updated_at: created_at,
        }
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn query(search: &str, filter: FilterOption, sort: SortOption) -> QueryState {
        QueryState {
            search_query: search.to_string(),
            filter_option: filter,
            sort_option: sort,
        }
    }

    #[test]
    fn test_important_note_pinned_under_newest() {
        let notes = vec![
            note("a", "Banana", "", true, 10),
            note("b", "Apple", "", false, 20),
        ];
        let result = filter_and_sort(&notes, &QueryState::default());
        assert_eq!(ids(&result), ["a", "b"]);
    }

    #[test]
    fn test_a_to_z_ignores_importance() {
        let notes = vec![
            note("a", "Banana", "", true, 10),
            note("b", "Apple", "", false, 20),
        ];
        let result = filter_and_sort(&notes, &query("", FilterOption::All, SortOption::AToZ));
        assert_eq!(ids(&result), ["b", "a"]);
    }

    #[test]
    fn test_oldest_with_pinning_keeps_partition_order() {
        let notes = vec![
            note("r1", "r1", "", false, 10),
            note("i1", "i1", "", true, 40),
            note("r2", "r2", "", false, 20),
            note("i2", "i2", "", true, 30),
        ];
        let result = filter_and_sort(&notes, &query("", FilterOption::All, SortOption::Oldest));
        assert_eq!(ids(&result), ["i2", "i1", "r1", "r2"]);

        let result = filter_and_sort(&notes, &query("", FilterOption::All, SortOption::Newest));
        assert_eq!(ids(&result), ["i1", "i2", "r2", "r1"]);
    }

    #[test]
    fn test_search_matches_content_substring_case_insensitively() {
        let notes = vec![
            note("hit", "Words", "Concatenate strings", false, 10),
            note("title", "CATalog", "", false, 20),
            note("miss", "Dogs", "bark", false, 30),
        ];
        let result = filter_and_sort(&notes, &query("cat", FilterOption::All, SortOption::Oldest));
        assert_eq!(ids(&result), ["hit", "title"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_query_side() {
        let notes = vec![note("a", "shopping", "", false, 10)];
        let result = filter_and_sort(&notes, &query("SHOP", FilterOption::All, SortOption::Newest));
        assert_eq!(ids(&result), ["a"]);
    }

    #[test]
    fn test_important_filter_and_search_combine() {
        let notes = vec![
            note("both", "cat facts", "", true, 10),
            note("search-only", "cat pics", "", false, 20),
            note("important-only", "dog facts", "", true, 30),
        ];
        let result =
            filter_and_sort(&notes, &query("cat", FilterOption::Important, SortOption::Newest));
        assert_eq!(ids(&result), ["both"]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let notes = vec![
            note("first", "x", "", false, 10),
            note("second", "y", "", false, 10),
        ];
        let result = filter_and_sort(&notes, &QueryState::default());
        assert_eq!(ids(&result), ["first", "second"]);
    }

    #[test]
    fn test_a_to_z_collates_accents_and_case() {
        let notes = vec![
            note("zebra", "Zebra", "", false, 10),
            note("eclair", "Éclair", "", false, 20),
            note("upper", "Apple", "", false, 30),
            note("lower", "apple", "", false, 40),
        ];
        let result = filter_and_sort(&notes, &query("", FilterOption::All, SortOption::AToZ));
        assert_eq!(ids(&result), ["lower", "upper", "eclair", "zebra"]);
    }

    #[test]
    fn test_title_comparison_ignores_case() {
        let notes = vec![
            note("b", "banana", "", false, 10),
            note("a", "Apple", "", false, 20),
            note("c", "Cherry", "", false, 30),
        ];
        let result = filter_and_sort(&notes, &query("", FilterOption::All, SortOption::AToZ));
        assert_eq!(ids(&result), ["a", "b", "c"]);
    }

    #[test]
    fn test_option_parsing_and_serde() {
        assert_eq!("a-z".parse::<SortOption>().unwrap(), SortOption::AToZ);
        assert_eq!("important".parse::<FilterOption>().unwrap(), FilterOption::Important);
        assert!("title".parse::<SortOption>().is_err());
        assert_eq!(serde_json::to_string(&SortOption::AToZ).unwrap(), r#""a-z""#);
        assert_eq!(serde_json::to_string(&FilterOption::Important).unwrap(), r#""important""#);
        assert_eq!(SortOption::Oldest.to_string(), "oldest");
    }
}
