pub mod list_topics;
