use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::poll_repository::PollRepository;
use crate::domain::polls::poll::{NewPoll, Poll, PollFilters, PollPage, PollPatch, PollStatus};
use crate::domain::topics::TopicList;

/// Process-local poll store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryPollRepository {
    polls: RwLock<Vec<Poll>>,
}

impl InMemoryPollRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polls(polls: Vec<Poll>) -> Self {
        Self {
            polls: RwLock::new(polls),
        }
    }
}

#[async_trait]
impl PollRepository for InMemoryPollRepository {
    async fn find_with_filters(&self, filters: &PollFilters) -> anyhow::Result<PollPage> {
        let polls = self.polls.read().await;
        let mut matched: Vec<&Poll> = polls.iter().filter(|p| filters.matches(p)).collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matched.len() as u64;
        let offset = usize::try_from(filters.offset()).unwrap_or(usize::MAX);
        let size = filters.page_size() as usize;
        let page: Vec<Poll> = matched
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();
        let has_next_page = filters.offset() + (page.len() as u64) < total;
        Ok(PollPage {
            polls: page,
            total,
            has_next_page,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Poll>> {
        let polls = self.polls.read().await;
        Ok(polls.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, poll: NewPoll) -> anyhow::Result<Poll> {
        let now = chrono::Utc::now();
        let row = Poll {
            id: Uuid::new_v4(),
            title: poll.title,
            description: poll.description,
            location: poll.location,
            status: PollStatus::Live,
            topics: poll.topics,
            user_id: poll.user_id,
            created_at: now,
            updated_at: now,
        };
        self.polls.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: PollPatch) -> anyhow::Result<Option<Poll>> {
        let mut polls = self.polls.write().await;
        let Some(row) = polls.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        if let Some(location) = patch.location {
            row.location = location;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(topics) = patch.topics {
            row.topics = topics;
        }
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }

    async fn topic_lists(&self) -> anyhow::Result<Vec<TopicList>> {
        let polls = self.polls.read().await;
        Ok(polls.iter().map(|p| p.topics.clone()).collect())
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixture(n: u32, status: PollStatus, topics: &str) -> Poll {
        let at = chrono::Utc.with_ymd_and_hms(2024, 1, n, 0, 0, 0).unwrap();
        Poll {
            id: Uuid::new_v4(),
            title: format!("Poll {n}"),
            description: None,
            location: None,
            status,
            topics: TopicList::parse(topics),
            user_id: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn pages_through_matches_in_creation_order() {
        let repo = InMemoryPollRepository::with_polls(vec![
            fixture(4, PollStatus::Live, "meeting, daily"),
            fixture(1, PollStatus::Live, "meeting, team"),
            fixture(2, PollStatus::Paused, "planning"),
        ]);
        let mut filters = PollFilters {
            topics: TopicList::parse("meeting").into_vec(),
            page: Some(1),
            page_size: Some(1),
            ..Default::default()
        };
        let first = repo.find_with_filters(&filters).await.unwrap();
        assert_eq!(first.total, 2);
        assert!(first.has_next_page);
        assert_eq!(first.polls[0].title, "Poll 1");

        filters.page = Some(2);
        let second = repo.find_with_filters(&filters).await.unwrap();
        assert_eq!(second.total, 2);
        assert!(!second.has_next_page);
        assert_eq!(second.polls[0].title, "Poll 4");

        filters.page = Some(3);
        let past_end = repo.find_with_filters(&filters).await.unwrap();
        assert!(past_end.polls.is_empty());
        assert!(!past_end.has_next_page);
    }

    #[tokio::test]
    async fn large_result_sets_are_paged() {
        let polls = (0..1000)
            .map(|i| fixture(1 + (i % 28), PollStatus::Live, "common"))
            .collect();
        let repo = InMemoryPollRepository::with_polls(polls);
        let page = repo
            .find_with_filters(&PollFilters {
                topics: TopicList::parse("common").into_vec(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.polls.len(), 20);
        assert_eq!(page.total, 1000);
        assert!(page.has_next_page);
    }
}
