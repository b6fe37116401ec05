use uuid::Uuid;

use crate::application::ports::poll_repository::PollRepository;
use crate::domain::polls::poll::Poll;

pub struct GetPoll<'a, R: PollRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PollRepository + ?Sized> GetPoll<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Poll>> {
        self.repo.get_by_id(id).await
    }
}
