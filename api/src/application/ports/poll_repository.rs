use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::polls::poll::{NewPoll, Poll, PollFilters, PollPage, PollPatch};
use crate::domain::topics::TopicList;

#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn find_with_filters(&self, filters: &PollFilters) -> anyhow::Result<PollPage>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Poll>>;

    async fn create(&self, poll: NewPoll) -> anyhow::Result<Poll>;

    // Fields left as None in the patch are not touched
    async fn update(&self, id: Uuid, patch: PollPatch) -> anyhow::Result<Option<Poll>>;

    /// Topic lists of every stored poll, used to derive the available topics.
    async fn topic_lists(&self) -> anyhow::Result<Vec<TopicList>>;

    async fn health_check(&self) -> anyhow::Result<()>;
}
