use uuid::Uuid;

use crate::application::ports::poll_repository::PollRepository;
use crate::application::use_cases::polls::create_poll::normalize_title;
use crate::domain::polls::poll::{Poll, PollPatch};

pub struct UpdatePoll<'a, R: PollRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PollRepository + ?Sized> UpdatePoll<'a, R> {
    pub async fn execute(&self, id: Uuid, mut patch: PollPatch) -> anyhow::Result<Option<Poll>> {
        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(normalize_title(title)?);
        }
        let row = self.repo.update(id, patch).await?;
        if row.is_some() {
            tracing::info!(poll_id = %id, "poll_updated");
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polls::poll::NewPoll;
    use crate::domain::topics::TopicList;
    use crate::infrastructure::memory::poll_repository_memory::InMemoryPollRepository;

    async fn seeded(repo: &InMemoryPollRepository) -> Poll {
        repo.create(NewPoll {
            title: "Original".into(),
            description: Some("Quarterly review".into()),
            location: Some("Room 4".into()),
            topics: TopicList::parse("existing, topics"),
            user_id: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn replaces_topics() {
        let repo = InMemoryPollRepository::new();
        let poll = seeded(&repo).await;
        let uc = UpdatePoll { repo: &repo };
        let out = uc
            .execute(
                poll.id,
                PollPatch {
                    topics: Some(TopicList::parse("updated, topics, list")),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.topics.to_strings(), vec!["updated", "topics", "list"]);
    }

    #[tokio::test]
    async fn empty_list_clears_topics() {
        let repo = InMemoryPollRepository::new();
        let poll = seeded(&repo).await;
        let uc = UpdatePoll { repo: &repo };
        let out = uc
            .execute(
                poll.id,
                PollPatch {
                    topics: Some(TopicList::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(out.topics.is_empty());
    }

    #[tokio::test]
    async fn absent_topics_are_preserved() {
        let repo = InMemoryPollRepository::new();
        let poll = seeded(&repo).await;
        let uc = UpdatePoll { repo: &repo };
        let out = uc
            .execute(
                poll.id,
                PollPatch {
                    title: Some("Updated Title Only".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.title, "Updated Title Only");
        assert_eq!(out.topics.to_strings(), vec!["existing", "topics"]);
    }

    #[tokio::test]
    async fn null_clears_description_and_location() {
        let repo = InMemoryPollRepository::new();
        let poll = seeded(&repo).await;
        let uc = UpdatePoll { repo: &repo };
        let out = uc
            .execute(
                poll.id,
                PollPatch {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.description, None);
        assert_eq!(out.location.as_deref(), Some("Room 4"));

        let out = uc
            .execute(
                poll.id,
                PollPatch {
                    location: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.location, None);
    }

    #[tokio::test]
    async fn missing_poll_is_none() {
        let repo = InMemoryPollRepository::new();
        let uc = UpdatePoll { repo: &repo };
        let out = uc.execute(Uuid::new_v4(), PollPatch::default()).await.unwrap();
        assert!(out.is_none());
    }
}
