pub mod create_poll;
pub mod get_poll;
pub mod list_polls;
pub mod update_poll;
