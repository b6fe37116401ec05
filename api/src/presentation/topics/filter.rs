use crate::domain::topics::Topic;
use crate::presentation::topics::{Key, KeyOutcome};

pub const DEFAULT_PLACEHOLDER: &str = "Filter by topics";
pub const NO_TOPICS_FOUND: &str = "No topics found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopoverState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub topic: Topic,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChip {
    pub topic: Topic,
    pub remove_label: String,
}

/// Removes the first occurrence of `topic`, or appends it when absent.
pub fn toggle_topic(selection: &[Topic], topic: &Topic) -> Vec<Topic> {
    match selection.iter().position(|t| t == topic) {
        Some(pos) => selection
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, t)| t.clone())
            .collect(),
        None => {
            let mut out = selection.to_vec();
            out.push(topic.clone());
            out
        }
    }
}

pub fn selected_count_label(count: usize) -> String {
    if count == 1 {
        "1 topic selected".to_string()
    } else {
        format!("{count} topics selected")
    }
}

/// Multi-select popover over the available topics.
///
/// The selection belongs to the caller: `toggle` and `clear_all` only
/// report a new selection through the change callback, and the caller
/// hands it back with [`TopicsFilter::set_selected`].
pub struct TopicsFilter<'a> {
    available: Vec<Topic>,
    selected: Vec<Topic>,
    placeholder: String,
    popover: PopoverState,
    search: String,
    on_topics_change: Option<Box<dyn FnMut(Vec<Topic>) + 'a>>,
}

impl<'a> TopicsFilter<'a> {
    pub fn new(available: Vec<Topic>, selected: Vec<Topic>) -> Self {
        Self {
            available,
            selected,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            popover: PopoverState::Closed,
            search: String::new(),
            on_topics_change: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn on_topics_change(mut self, f: impl FnMut(Vec<Topic>) + 'a) -> Self {
        self.on_topics_change = Some(Box::new(f));
        self
    }

    pub fn selected(&self) -> &[Topic] {
        &self.selected
    }

    pub fn set_selected(&mut self, selected: Vec<Topic>) {
        self.selected = selected;
    }

    pub fn toggle(&mut self, topic: &Topic) -> Vec<Topic> {
        let next = toggle_topic(&self.selected, topic);
        self.emit(next.clone());
        next
    }

    pub fn clear_all(&mut self) {
        self.emit(Vec::new());
    }

    fn emit(&mut self, topics: Vec<Topic>) {
        tracing::trace!(selected = topics.len(), "topics_filter_changed");
        if let Some(cb) = self.on_topics_change.as_mut() {
            cb(topics);
        }
    }

    pub fn trigger_label(&self) -> String {
        if self.selected.is_empty() {
            self.placeholder.clone()
        } else {
            selected_count_label(self.selected.len())
        }
    }

    pub fn popover(&self) -> PopoverState {
        self.popover
    }

    pub fn is_open(&self) -> bool {
        self.popover == PopoverState::Open
    }

    pub fn toggle_popover(&mut self) {
        self.popover = match self.popover {
            PopoverState::Closed => PopoverState::Open,
            PopoverState::Open => PopoverState::Closed,
        };
    }

    pub fn outside_click(&mut self) {
        self.popover = PopoverState::Closed;
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key == Key::Escape && self.is_open() {
            self.popover = PopoverState::Closed;
            return KeyOutcome::PreventDefault;
        }
        KeyOutcome::Default
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    pub fn candidates(&self) -> Vec<CandidateRow> {
        let needle = self.search.trim().to_lowercase();
        self.available
            .iter()
            .filter(|t| needle.is_empty() || t.as_str().to_lowercase().contains(&needle))
            .map(|t| CandidateRow {
                topic: t.clone(),
                checked: self.selected.contains(t),
            })
            .collect()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.candidates().is_empty().then_some(NO_TOPICS_FOUND)
    }

    pub fn chips(&self) -> Vec<SelectedChip> {
        self.selected
            .iter()
            .map(|t| SelectedChip {
                topic: t.clone(),
                remove_label: format!("Remove {t}"),
            })
            .collect()
    }

    pub fn shows_clear_all(&self) -> bool {
        self.selected.len() > 1
    }
}
