pub mod poll_repository;
