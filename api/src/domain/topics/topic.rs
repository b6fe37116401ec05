use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

use thiserror::Error;

pub const TOPIC_DELIMITER: char = ',';
pub const TOPIC_JOINER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    #[error("topic must not be empty")]
    Empty,
    #[error("topic must not contain ','")]
    ContainsDelimiter,
    #[error("topic index {index} out of range for {len} topics")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A single trimmed, non-empty label attached to a poll. Never contains the
/// delimiter, so any list of topics survives `join` and `parse` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn new(raw: &str) -> Result<Self, TopicError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }
        if trimmed.contains(TOPIC_DELIMITER) {
            return Err(TopicError::ContainsDelimiter);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Topic> for String {
    fn from(t: Topic) -> Self {
        t.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Topic {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Topic {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered topics of a poll. Order is significant and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicList(Vec<Topic>);

impl TopicList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Splits `text` on commas, trims every piece and drops the blank ones.
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(TOPIC_DELIMITER)
                .filter_map(|piece| Topic::new(piece).ok())
                .collect(),
        )
    }

    /// Normalizes values supplied one per entry (for example a JSON array).
    /// Every entry goes through `parse`, so `"a, b"` yields two topics.
    pub fn from_raw<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .flat_map(|v| Self::parse(v.as_ref()).0)
                .collect(),
        )
    }

    pub fn join(&self) -> String {
        self.join_with(TOPIC_JOINER)
    }

    pub fn join_with(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(Topic::as_str)
            .collect::<Vec<_>>()
            .join(sep)
    }

    pub fn remove_at(&self, index: usize) -> Result<Self, TopicError> {
        if index >= self.0.len() {
            return Err(TopicError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(Self(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, t)| t.clone())
                .collect(),
        ))
    }

    /// OR-membership: true when the selection is empty or shares at least one topic.
    pub fn matches_any(&self, selection: &[Topic]) -> bool {
        selection.is_empty() || self.0.iter().any(|t| selection.contains(t))
    }

    pub fn as_slice(&self) -> &[Topic] {
        &self.0
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.0.clone()).collect()
    }

    pub fn into_vec(self) -> Vec<Topic> {
        self.0
    }
}

impl Deref for TopicList {
    type Target = [Topic];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Topic>> for TopicList {
    fn from(v: Vec<Topic>) -> Self {
        Self(v)
    }
}

impl FromIterator<Topic> for TopicList {
    fn from_iter<T: IntoIterator<Item = Topic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TopicList {
    type Item = &'a Topic;
    type IntoIter = std::slice::Iter<'a, Topic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flattens topic lists into the unique topics they mention, in ascending byte order.
pub fn available_topics<'a, I>(lists: I) -> Vec<Topic>
where
    I: IntoIterator<Item = &'a TopicList>,
{
    let set: BTreeSet<&Topic> = lists.into_iter().flat_map(|l| l.iter()).collect();
    set.into_iter().cloned().collect()
}
