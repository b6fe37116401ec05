use thiserror::Error;

use crate::application::ports::poll_repository::PollRepository;
use crate::domain::polls::poll::{NewPoll, Poll};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollValidationError {
    #[error("title is required")]
    TitleRequired,
}

impl PollValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            PollValidationError::TitleRequired => "title",
        }
    }
}

pub(crate) fn normalize_title(title: &str) -> Result<String, PollValidationError> {
    let t = title.trim();
    if t.is_empty() {
        return Err(PollValidationError::TitleRequired);
    }
    Ok(t.to_string())
}

pub struct CreatePoll<'a, R: PollRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PollRepository + ?Sized> CreatePoll<'a, R> {
    pub async fn execute(&self, mut poll: NewPoll) -> anyhow::Result<Poll> {
        poll.title = normalize_title(&poll.title)?;
        let created = self.repo.create(poll).await?;
        tracing::info!(poll_id = %created.id, topics = created.topics.len(), "poll_created");
        Ok(created)
    }
}
