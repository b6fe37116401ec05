pub mod poll_repository_memory;
