use std::collections::HashMap;

use crate::application::forms::{FormState, SetOptions};
use crate::application::use_cases::polls::create_poll::{PollValidationError, normalize_title};
use crate::domain::polls::poll::NewPoll;
use crate::domain::topics::TopicList;

pub const TOPICS_FIELD: &str = "topics";

/// Details step of the create-poll form.
#[derive(Debug, Clone, Default)]
pub struct PollDetailsForm {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    lists: HashMap<String, TopicList>,
    errors: Vec<PollValidationError>,
}

impl PollDetailsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(topics: TopicList) -> Self {
        let mut form = Self::default();
        form.lists.insert(TOPICS_FIELD.to_string(), topics);
        form
    }

    pub fn errors(&self) -> &[PollValidationError] {
        &self.errors
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if let Err(e) = normalize_title(&self.title) {
            self.errors.push(e);
        }
        self.errors.is_empty()
    }

    /// Topics are submitted as a list, empty when the field was never touched.
    pub fn submit(&mut self) -> Result<NewPoll, PollValidationError> {
        let title = normalize_title(&self.title).inspect_err(|e| {
            self.errors = vec![e.clone()];
        })?;
        self.errors.clear();
        Ok(NewPoll {
            title,
            description: non_blank(self.description.as_deref()),
            location: non_blank(self.location.as_deref()),
            topics: self.watch(TOPICS_FIELD),
            user_id: None,
        })
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

impl FormState for PollDetailsForm {
    fn get(&self, name: &str) -> Option<TopicList> {
        self.lists.get(name).cloned()
    }

    /// A validated set only re-checks `name`; errors on other fields are left alone.
    fn set(&mut self, name: &str, value: TopicList, opts: SetOptions) {
        self.lists.insert(name.to_string(), value);
        if opts.validate {
            // topic lists never fail validation
            self.errors.retain(|e| e.field() != name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_topics_submit_as_empty_list() {
        let mut form = PollDetailsForm::new();
        form.title = "Simple Poll".into();
        assert_eq!(form.get(TOPICS_FIELD), None);
        let poll = form.submit().unwrap();
        assert!(poll.topics.is_empty());
    }

    #[test]
    fn submits_topics_set_through_form_state() {
        let mut form = PollDetailsForm::new();
        form.title = "Team Meeting".into();
        form.set(
            TOPICS_FIELD,
            TopicList::parse("meeting, team"),
            SetOptions::validated(),
        );
        let poll = form.submit().unwrap();
        assert_eq!(poll.topics.to_strings(), vec!["meeting", "team"]);
    }

    #[test]
    fn missing_title_blocks_submission_regardless_of_topics() {
        let mut form = PollDetailsForm::with_topics(TopicList::parse("a, b"));
        form.description = Some("  ".into());
        assert_eq!(form.submit().unwrap_err(), PollValidationError::TitleRequired);
        assert_eq!(form.errors(), &[PollValidationError::TitleRequired]);
    }

    #[test]
    fn validated_topics_set_leaves_title_unchecked() {
        let mut form = PollDetailsForm::new();
        form.set(TOPICS_FIELD, TopicList::parse("x"), SetOptions::validated());
        assert!(form.errors().is_empty());
        assert!(!form.validate());
        assert_eq!(form.errors(), &[PollValidationError::TitleRequired]);
    }

    #[test]
    fn validated_topics_set_keeps_existing_title_error() {
        let mut form = PollDetailsForm::new();
        assert!(form.submit().is_err());
        form.set(TOPICS_FIELD, TopicList::parse("y"), SetOptions::validated());
        assert_eq!(form.errors(), &[PollValidationError::TitleRequired]);
        form.title = "Now titled".into();
        form.set(TOPICS_FIELD, TopicList::parse("y"), SetOptions::validated());
        assert_eq!(form.errors(), &[PollValidationError::TitleRequired]);
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }
}
