pub mod poll_repository_sqlx;
