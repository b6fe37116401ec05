use crate::application::ports::poll_repository::PollRepository;
use crate::domain::polls::poll::{PollFilters, PollPage};

pub struct ListPolls<'a, R: PollRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PollRepository + ?Sized> ListPolls<'a, R> {
    pub async fn execute(&self, filters: PollFilters) -> anyhow::Result<PollPage> {
        tracing::debug!(
            topics = filters.topics.len(),
            status = ?filters.status,
            page = filters.page(),
            page_size = filters.page_size(),
            "poll_list"
        );
        self.repo.find_with_filters(&filters).await
    }
}
