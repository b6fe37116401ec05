use crate::domain::polls::poll::Poll;
use crate::domain::topics::{Topic, available_topics};
use crate::presentation::topics::filter::TopicsFilter;
use crate::presentation::topics::query_params::{
    Navigation, selected_topics_from_query, topics_navigation,
};

/// Available topics cached per snapshot revision of the loaded poll pages.
#[derive(Debug, Default)]
pub struct AvailableTopicsMemo {
    revision: Option<u64>,
    topics: Vec<Topic>,
}

impl AvailableTopicsMemo {
    pub fn derive(&mut self, revision: u64, pages: &[Vec<Poll>]) -> &[Topic] {
        if self.revision != Some(revision) {
            self.topics = available_topics(pages.iter().flatten().map(|p| &p.topics));
            self.revision = Some(revision);
        }
        &self.topics
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }
}

/// Binds a [`TopicsFilter`] to the page's query string.
#[derive(Debug, Default)]
pub struct TopicsFilterWrapper {
    query: String,
    memo: AvailableTopicsMemo,
}

impl TopicsFilterWrapper {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            memo: AvailableTopicsMemo::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_topics(&self) -> Vec<Topic> {
        selected_topics_from_query(&self.query).into_vec()
    }

    pub fn available_topics(&mut self, revision: u64, pages: &[Vec<Poll>]) -> Vec<Topic> {
        self.memo.derive(revision, pages).to_vec()
    }

    /// Builds a filter over the current poll snapshot and selection.
    pub fn filter<'a>(&mut self, revision: u64, pages: &[Vec<Poll>]) -> TopicsFilter<'a> {
        TopicsFilter::new(self.available_topics(revision, pages), self.selected_topics())
    }

    pub fn on_topics_change(&mut self, topics: &[Topic]) -> Navigation {
        let nav = topics_navigation(&self.query, topics);
        self.query = nav.href.trim_start_matches('?').to_string();
        tracing::debug!(href = %nav.href, "topics_filter_navigate");
        nav
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polls::poll::PollStatus;
    use crate::domain::topics::TopicList;

    fn poll(topics: &str) -> Poll {
        let now = chrono::Utc::now();
        Poll {
            id: uuid::Uuid::new_v4(),
            title: "p".into(),
            description: None,
            location: None,
            status: PollStatus::Live,
            topics: TopicList::parse(topics),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn memo_recomputes_only_on_new_revision() {
        let mut memo = AvailableTopicsMemo::default();
        let pages = vec![vec![poll("meeting, team")], vec![poll(""), poll("meeting, x")]];
        let names: Vec<String> = memo.derive(1, &pages).iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["meeting", "team", "x"]);

        let other = vec![vec![poll("zzz")]];
        assert_eq!(memo.derive(1, &other).len(), 3);
        assert_eq!(memo.derive(2, &other).len(), 1);
        assert_eq!(memo.revision(), Some(2));
    }

    #[test]
    fn selection_round_trips_through_query() {
        let mut wrapper = TopicsFilterWrapper::new("status=live&page=4");
        assert!(wrapper.selected_topics().is_empty());

        let pages = vec![vec![poll("meeting"), poll("planning")]];
        let mut filter = wrapper.filter(1, &pages);
        let next = filter.toggle(&Topic::new("meeting").unwrap());
        drop(filter);

        let nav = wrapper.on_topics_change(&next);
        assert_eq!(nav.href, "?status=live&topics=meeting");
        assert_eq!(wrapper.query(), "status=live&topics=meeting");
        assert_eq!(wrapper.selected_topics(), next);

        let nav = wrapper.on_topics_change(&[]);
        assert_eq!(nav.href, "?status=live");
    }

    #[test]
    fn no_polls_means_empty_candidates() {
        let mut wrapper = TopicsFilterWrapper::default();
        let filter = wrapper.filter(0, &[]);
        assert!(filter.candidates().is_empty());
        assert!(filter.empty_message().is_some());
    }
}
