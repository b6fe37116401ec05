use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::topics::{Topic, TopicList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    #[default]
    Live,
    Paused,
    Finalized,
}

impl PollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollStatus::Live => "live",
            PollStatus::Paused => "paused",
            PollStatus::Finalized => "finalized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "live" => Some(PollStatus::Live),
            "paused" => Some(PollStatus::Paused),
            "finalized" => Some(PollStatus::Finalized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Poll {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: PollStatus,
    pub topics: TopicList,
    pub user_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Criteria for listing polls. All present criteria must hold.
#[derive(Debug, Clone, Default)]
pub struct PollFilters {
    pub topics: Vec<Topic>,
    pub status: Option<PollStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

impl PollFilters {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.page_size())
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Topic OR-membership, status equality and title/topic search, combined with AND.
    pub fn matches(&self, poll: &Poll) -> bool {
        if !poll.topics.matches_any(&self.topics) {
            return false;
        }
        if self.status.is_some_and(|s| s != poll.status) {
            return false;
        }
        if let Some(term) = self.search_term() {
            let in_title = poll.title.to_lowercase().contains(&term);
            let in_topics = poll
                .topics
                .iter()
                .any(|t| t.as_str().to_lowercase().contains(&term));
            if !in_title && !in_topics {
                return false;
            }
        }
        true
    }

    /// Pattern for SQL `ILIKE ... ESCAPE '\'`, `None` when no search term is set.
    /// The term is matched literally, like `matches` does.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone)]
pub struct PollPage {
    pub polls: Vec<Poll>,
    pub total: u64,
    pub has_next_page: bool,
}

#[derive(Debug, Clone)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub topics: TopicList,
    pub user_id: Option<Uuid>,
}

/// Partial update. `None` leaves a field untouched; `Some(TopicList::new())` clears topics
/// and `Some(None)` clears `description` / `location`.
#[derive(Debug, Clone, Default)]
pub struct PollPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub status: Option<PollStatus>,
    pub topics: Option<TopicList>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(title: &str, status: PollStatus, topics: &str) -> Poll {
        let now = chrono::Utc::now();
        Poll {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            location: None,
            status,
            topics: TopicList::parse(topics),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filters_match_everything() {
        let f = PollFilters::default();
        assert!(f.matches(&poll("Budget", PollStatus::Live, "")));
        assert!(f.matches(&poll("Review", PollStatus::Finalized, "review")));
    }

    #[test]
    fn topics_and_status_combine_with_and() {
        let f = PollFilters {
            topics: TopicList::parse("meeting").into_vec(),
            status: Some(PollStatus::Live),
            ..Default::default()
        };
        assert!(f.matches(&poll("Standup", PollStatus::Live, "meeting, daily")));
        assert!(!f.matches(&poll("Standup", PollStatus::Paused, "meeting")));
        assert!(!f.matches(&poll("Planning", PollStatus::Live, "planning")));
    }

    #[test]
    fn search_looks_at_title_and_topics() {
        let f = PollFilters {
            search: Some("PLAN".into()),
            ..Default::default()
        };
        assert!(f.matches(&poll("Project Planning", PollStatus::Paused, "")));
        assert!(f.matches(&poll("Kickoff", PollStatus::Live, "planning")));
        assert!(!f.matches(&poll("Team Meeting", PollStatus::Live, "meeting")));
    }

    #[test]
    fn blank_search_is_ignored() {
        let f = PollFilters {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(f.matches(&poll("Anything", PollStatus::Live, "")));
        assert_eq!(f.search_pattern(), None);
    }

    #[test]
    fn search_pattern_escapes_like_wildcards() {
        let f = PollFilters {
            search: Some(" 50%_off ".into()),
            ..Default::default()
        };
        assert_eq!(f.search_pattern().as_deref(), Some(r"%50\%\_off%"));
        let f = PollFilters {
            search: Some(r"C:\tmp".into()),
            ..Default::default()
        };
        assert_eq!(f.search_pattern().as_deref(), Some(r"%C:\\tmp%"));
    }

    #[test]
    fn search_treats_underscore_literally() {
        let f = PollFilters {
            search: Some("a_b".into()),
            ..Default::default()
        };
        assert!(f.matches(&poll("a_b review", PollStatus::Live, "")));
        assert!(!f.matches(&poll("axb review", PollStatus::Live, "")));
    }

    #[test]
    fn paging_defaults_and_clamps() {
        let f = PollFilters::default();
        assert_eq!((f.page(), f.page_size(), f.offset()), (1, 20, 0));
        let f = PollFilters {
            page: Some(0),
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!((f.page(), f.page_size()), (1, 1));
        let f = PollFilters {
            page: Some(3),
            page_size: Some(5000),
            ..Default::default()
        };
        assert_eq!((f.page_size(), f.offset()), (1000, 2000));
    }

    #[test]
    fn status_round_trips_through_str() {
        for s in [PollStatus::Live, PollStatus::Paused, PollStatus::Finalized] {
            assert_eq!(PollStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(PollStatus::parse("closed"), None);
    }
}
