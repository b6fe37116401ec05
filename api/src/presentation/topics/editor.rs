use crate::application::forms::{FormState, SetOptions};
use crate::domain::topics::{TopicError, TopicList};
use crate::presentation::topics::{Key, KeyOutcome};

#[derive(Debug, Clone)]
pub struct TopicsInputConfig {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub max_topics: usize,
}

impl Default for TopicsInputConfig {
    fn default() -> Self {
        Self {
            name: "topics".into(),
            label: "Topics".into(),
            placeholder: "Add topics separated by commas".into(),
            max_topics: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovableTag {
    pub index: usize,
    pub label: String,
    pub remove_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorPreview {
    pub tags: Vec<RemovableTag>,
    pub overflow: Option<String>,
    pub notice: Option<String>,
}

/// Free-text topics field. The buffer is local; the parsed list lives in the form.
#[derive(Debug, Clone)]
pub struct TopicsEditor {
    config: TopicsInputConfig,
    buffer: String,
}

impl TopicsEditor {
    pub fn new<F: FormState + ?Sized>(config: TopicsInputConfig, form: &F) -> Self {
        let buffer = form.watch(&config.name).join();
        Self { config, buffer }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn on_text_change<F: FormState + ?Sized>(&mut self, form: &mut F, text: &str) -> TopicList {
        self.buffer = text.to_string();
        let topics = TopicList::parse(text);
        form.set(&self.config.name, topics.clone(), SetOptions::validated());
        topics
    }

    /// Drops one tag and rewrites the buffer from what is left.
    pub fn remove_at<F: FormState + ?Sized>(
        &mut self,
        form: &mut F,
        index: usize,
    ) -> Result<TopicList, TopicError> {
        let updated = form.watch(&self.config.name).remove_at(index)?;
        form.set(&self.config.name, updated.clone(), SetOptions::validated());
        self.buffer = updated.join();
        Ok(updated)
    }

    // Enter must not submit the surrounding form
    pub fn handle_key(&self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => KeyOutcome::PreventDefault,
            _ => KeyOutcome::Default,
        }
    }

    pub fn preview<F: FormState + ?Sized>(&self, form: &F) -> EditorPreview {
        let topics = form.watch(&self.config.name);
        let max = self.config.max_topics;
        let tags = topics
            .iter()
            .take(max)
            .enumerate()
            .map(|(index, t)| RemovableTag {
                index,
                label: t.to_string(),
                remove_label: format!("Remove topic: {t}"),
            })
            .collect();
        let hidden = topics.len().saturating_sub(max);
        if hidden == 0 {
            return EditorPreview {
                tags,
                ..Default::default()
            };
        }
        EditorPreview {
            tags,
            overflow: Some(format!("+{hidden} more")),
            notice: Some(format!(
                "Showing first {max} topics. {hidden} more topics will be saved."
            )),
        }
    }
}
