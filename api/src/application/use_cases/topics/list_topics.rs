use crate::application::ports::poll_repository::PollRepository;
use crate::domain::topics::{Topic, available_topics};

pub struct ListTopics<'a, R: PollRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PollRepository + ?Sized> ListTopics<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Topic>> {
        let lists = self.repo.topic_lists().await?;
        Ok(available_topics(lists.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::polls::poll::NewPoll;
    use crate::domain::topics::TopicList;
    use crate::infrastructure::memory::poll_repository_memory::InMemoryPollRepository;

    #[tokio::test]
    async fn derives_sorted_unique_topics() {
        let repo = InMemoryPollRepository::new();
        for topics in ["meeting, team", "", "meeting, x"] {
            repo.create(NewPoll {
                title: "p".into(),
                description: None,
                location: None,
                topics: TopicList::parse(topics),
                user_id: None,
            })
            .await
            .unwrap();
        }
        let out = ListTopics { repo: &repo }.execute().await.unwrap();
        let names: Vec<&str> = out.iter().map(Topic::as_str).collect();
        assert_eq!(names, vec!["meeting", "team", "x"]);
    }

    #[tokio::test]
    async fn no_polls_means_no_topics() {
        let repo = InMemoryPollRepository::new();
        let out = ListTopics { repo: &repo }.execute().await.unwrap();
        assert!(out.is_empty());
    }
}
