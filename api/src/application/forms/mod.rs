//! Form-state container the topic editor publishes into.
//!
//! Field values are always [`TopicList`]s; the raw edit text stays inside
//! the editor and never reaches the form.

pub mod poll_details;

use crate::domain::topics::TopicList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    pub validate: bool,
}

impl SetOptions {
    pub fn validated() -> Self {
        Self { validate: true }
    }
}

pub trait FormState {
    fn get(&self, name: &str) -> Option<TopicList>;

    fn set(&mut self, name: &str, value: TopicList, opts: SetOptions);

    /// Current value for rendering, empty when the field was never set.
    fn watch(&self, name: &str) -> TopicList {
        self.get(name).unwrap_or_default()
    }
}
