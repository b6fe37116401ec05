pub mod topic;

pub use topic::{Topic, TopicError, TopicList, available_topics};
